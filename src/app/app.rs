use std::io;

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::{Backend, CrosstermBackend},
    widgets::TableState,
};
use strum::IntoEnumIterator;

use crate::{
    api::StockApi,
    app::{StockStore, ui},
    models::{SortKey, SortOrder, StockQuery},
};

pub struct App<A: StockApi> {
    store: StockStore<A>,
    search: String,
    sort_by: Option<SortKey>,
    order: SortOrder,
    watchlist_only: bool,
    table_state: TableState,
    popup_message: Option<String>,
    show_detail: bool,
    show_recommendation: bool,
    search_input: Option<String>,
    selection_mode: bool,
}

impl<A: StockApi> App<A> {
    pub fn new(store: StockStore<A>) -> Self {
        Self {
            store,
            search: String::new(),
            sort_by: None,
            order: SortOrder::default(),
            watchlist_only: false,
            table_state: TableState::default(),
            popup_message: None,
            show_detail: false,
            show_recommendation: false,
            search_input: None,
            selection_mode: false,
        }
    }

    fn show_popup(&mut self, message: &str) {
        self.popup_message = Some(message.to_string());
    }

    fn clear_popup(&mut self) {
        self.popup_message = None;
    }

    pub async fn run(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.run_app(&mut terminal).await;

        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        result
    }

    async fn run_app<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        loop {
            self.draw(terminal)?;

            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                if self.search_input.is_some() {
                    match key.code {
                        KeyCode::Esc => self.search_input = None,
                        KeyCode::Enter => {
                            if let Some(input) = self.search_input.take() {
                                self.search = input;
                            }
                            self.refresh(terminal).await?;
                        }
                        KeyCode::Backspace => {
                            if let Some(input) = self.search_input.as_mut() {
                                input.pop();
                            }
                        }
                        KeyCode::Char(c) => {
                            if let Some(input) = self.search_input.as_mut() {
                                input.push(c);
                            }
                        }
                        _ => {}
                    }
                    continue;
                }

                match key.code {
                    KeyCode::Char('q') => return Ok(()),
                    KeyCode::Esc => {
                        if self.show_recommendation {
                            self.show_recommendation = false;
                        } else if self.show_detail {
                            self.show_detail = false;
                        } else {
                            self.selection_mode = false;
                            self.table_state.select(None);
                        }
                    }
                    KeyCode::Char('/') => {
                        self.search_input = Some(self.search.clone());
                    }
                    KeyCode::Enter => {
                        if let Some(symbol) = self.selected_symbol() {
                            self.show_popup(&format!("Loading {symbol}..."));
                            self.draw(terminal)?;
                            let ok = self.store.load_detail(&symbol).await;
                            self.clear_popup();
                            if ok {
                                self.show_detail = true;
                            }
                        }
                    }
                    KeyCode::Char('w') => {
                        if let Some(symbol) = self.selected_symbol().or_else(|| self.detail_symbol())
                        {
                            self.show_popup(&format!("Updating watchlist for {symbol}..."));
                            self.draw(terminal)?;
                            self.store.toggle_watchlist(&symbol).await;
                            self.clear_popup();
                        }
                    }
                    KeyCode::Char('r') => {
                        self.show_popup("Fetching recommendation...");
                        self.draw(terminal)?;
                        let ok = self.store.load_recommendation().await;
                        self.clear_popup();
                        if ok {
                            self.show_recommendation = true;
                        }
                    }
                    KeyCode::Char('s') => {
                        self.cycle_sort();
                        self.refresh(terminal).await?;
                    }
                    KeyCode::Char('o') => {
                        self.order = self.order.flipped();
                        self.refresh(terminal).await?;
                    }
                    KeyCode::Char('f') => {
                        self.watchlist_only = !self.watchlist_only;
                        self.refresh(terminal).await?;
                    }
                    KeyCode::F(5) => {
                        self.refresh(terminal).await?;
                    }
                    KeyCode::Down => {
                        self.selection_mode = true;
                        let stocks = self.store.state().stocks();
                        if !stocks.is_empty() {
                            let i = match self.table_state.selected() {
                                Some(i) => {
                                    if i >= stocks.len() - 1 {
                                        0
                                    } else {
                                        i + 1
                                    }
                                }
                                None => 0,
                            };
                            self.table_state.select(Some(i));
                        }
                    }
                    KeyCode::Up => {
                        self.selection_mode = true;
                        let stocks = self.store.state().stocks();
                        if !stocks.is_empty() {
                            let i = match self.table_state.selected() {
                                Some(i) => {
                                    if i == 0 {
                                        stocks.len() - 1
                                    } else {
                                        i - 1
                                    }
                                }
                                None => 0,
                            };
                            self.table_state.select(Some(i));
                        }
                    }
                    _ => {}
                }
            }
        }
    }

    fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        let filter_line = self.filter_line();
        terminal.draw(|frame| {
            ui::render(
                frame,
                self.store.state(),
                &filter_line,
                &mut self.table_state,
                &self.popup_message,
                self.show_detail,
                self.show_recommendation,
                &self.search_input,
            )
        })?;
        Ok(())
    }

    async fn refresh<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        self.show_popup("Refreshing stocks...");
        self.draw(terminal)?;
        let query = self.query();
        self.store.load_stocks(&query).await;
        self.clear_popup();

        // Keep the selection inside the (possibly shrunken) new list.
        let len = self.store.state().stocks().len();
        if self.table_state.selected().is_some_and(|i| i >= len) {
            self.table_state
                .select(if len == 0 { None } else { Some(len - 1) });
        }
        Ok(())
    }

    fn query(&self) -> StockQuery {
        let search = if self.search.is_empty() {
            None
        } else {
            Some(self.search.clone())
        };
        StockQuery::new(search, self.sort_by, self.order, self.watchlist_only)
    }

    fn filter_line(&self) -> String {
        let mut parts = Vec::new();
        if !self.search.is_empty() {
            parts.push(format!("search: {}", self.search));
        }
        if let Some(sort_by) = self.sort_by {
            parts.push(format!("sort: {} {}", sort_by, self.order));
        }
        if self.watchlist_only {
            parts.push(String::from("watchlist only"));
        }

        if parts.is_empty() {
            String::from("· all stocks")
        } else {
            format!("· {}", parts.join(" · "))
        }
    }

    fn selected_symbol(&self) -> Option<String> {
        let stocks = self.store.state().stocks();
        self.table_state
            .selected()
            .and_then(|i| stocks.get(i))
            .map(|stock| stock.symbol().clone())
    }

    fn detail_symbol(&self) -> Option<String> {
        if !self.show_detail {
            return None;
        }
        self.store
            .state()
            .current_stock()
            .as_ref()
            .map(|stock| stock.symbol().clone())
    }

    fn cycle_sort(&mut self) {
        self.sort_by = match self.sort_by {
            None => SortKey::iter().next(),
            Some(current) => {
                let mut keys = SortKey::iter().skip_while(|key| *key != current);
                keys.next();
                keys.next()
            }
        };
    }
}
