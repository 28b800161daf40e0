use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState, Wrap},
};
use rust_decimal::Decimal;

use crate::{
    app::store::StoreState,
    app::utils::{format_currency, format_percent, price_change},
    models::Stock,
};

pub fn render(
    frame: &mut Frame,
    state: &StoreState,
    filter_line: &str,
    table_state: &mut TableState,
    popup_message: &Option<String>,
    show_detail: bool,
    show_recommendation: bool,
    search_input: &Option<String>,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(frame.area());

    let title = Paragraph::new(format!("Stock Dashboard  {filter_line}"))
        .style(Style::default().fg(Color::Cyan))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(title, chunks[0]);

    if show_detail && state.current_stock().is_some() {
        let panes = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(chunks[1]);

        render_stock_table(frame, state, panes[0], table_state);
        render_detail(frame, state, panes[1]);
    } else {
        render_stock_table(frame, state, chunks[1], table_state);
    }

    render_status(frame, state, chunks[2], search_input);

    if show_recommendation {
        render_recommendation(frame, state, frame.area());
    }

    if let Some(message) = popup_message {
        let area = centered_rect(40, 3, frame.area());
        let popup = Paragraph::new(message.as_str())
            .style(Style::default().fg(Color::Yellow))
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(Clear, area);
        frame.render_widget(popup, area);
    }
}

fn render_stock_table(
    frame: &mut Frame,
    state: &StoreState,
    area: Rect,
    table_state: &mut TableState,
) {
    let stocks = state.stocks();

    if stocks.is_empty() {
        let empty_message = Paragraph::new("No stocks to display. Adjust the filters or refresh.")
            .style(Style::default().fg(Color::Yellow))
            .block(Block::default().title("Stocks").borders(Borders::ALL));
        frame.render_widget(empty_message, area);
        return;
    }

    let header_cells = [
        "Symbol", "Name", "Price", "Change", "Change %", "Watch", "Updated",
    ]
    .iter()
    .map(|h| Cell::from(*h).style(Style::default().fg(Color::Yellow)));
    let header = Row::new(header_cells).style(Style::default()).height(1);

    let rows = stocks.iter().map(|stock| {
        let change = price_change(*stock.current_price(), *stock.prev_close());
        let color_change = if *change.value() >= Decimal::ZERO {
            Color::Green
        } else {
            Color::Red
        };

        let watch = if *stock.in_watchlist() { "★" } else { "" };

        let cells = [
            Cell::from(stock.symbol().to_string()),
            Cell::from(stock.name().to_string()),
            Cell::from(format_currency(
                Some(*stock.current_price()),
                stock.currency(),
            )),
            Cell::from(format!("{:.2}", change.value())).style(Style::default().fg(color_change)),
            Cell::from(format_percent(*change.percent())).style(Style::default().fg(color_change)),
            Cell::from(watch).style(Style::default().fg(Color::Yellow)),
            Cell::from(stock.updated_at().format("%m-%d %H:%M").to_string()),
        ];

        Row::new(cells).height(1)
    });

    let widths = [
        Constraint::Length(8),
        Constraint::Min(20),
        Constraint::Length(12),
        Constraint::Length(10),
        Constraint::Length(10),
        Constraint::Length(6),
        Constraint::Length(12),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().title("Stocks").borders(Borders::ALL))
        .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED));

    frame.render_stateful_widget(table, area, table_state);
}

fn render_detail(frame: &mut Frame, state: &StoreState, area: Rect) {
    let Some(stock) = state.current_stock().as_ref() else {
        return;
    };

    let panes = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(9), Constraint::Min(0)])
        .split(area);

    let detail = Paragraph::new(info_lines(stock)).block(
        Block::default()
            .title(format!("Detail: {}", stock.symbol()))
            .borders(Borders::ALL),
    );
    frame.render_widget(detail, panes[0]);

    let header_cells = ["Time", "Price"]
        .iter()
        .map(|h| Cell::from(*h).style(Style::default().fg(Color::Yellow)));
    let header = Row::new(header_cells).height(1);

    let rows = state.history().iter().map(|price| {
        let cells = [
            Cell::from(price.timestamp().format("%Y-%m-%d %H:%M").to_string()),
            Cell::from(format_currency(Some(*price.price()), stock.currency())),
        ];
        Row::new(cells).height(1)
    });

    let widths = [Constraint::Length(18), Constraint::Min(10)];
    let history = Table::new(rows, widths)
        .header(header)
        .block(Block::default().title("History").borders(Borders::ALL));
    frame.render_widget(history, panes[1]);
}

fn info_lines(stock: &Stock) -> Vec<Line<'_>> {
    let change = price_change(*stock.current_price(), *stock.prev_close());
    let color_change = if *change.value() >= Decimal::ZERO {
        Color::Green
    } else {
        Color::Red
    };

    vec![
        Line::from(Span::styled(
            stock.name().to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(format!("{} · {}", stock.asset_type(), stock.currency())),
        Line::from(format!(
            "Price: {}",
            format_currency(Some(*stock.current_price()), stock.currency())
        )),
        Line::from(vec![
            Span::raw("Change: "),
            Span::styled(
                format!(
                    "{:.2} ({})",
                    change.value(),
                    format_percent(*change.percent())
                ),
                Style::default().fg(color_change),
            ),
        ]),
        Line::from(format!(
            "Open: {}  Prev close: {}",
            format_currency(Some(*stock.open_price()), stock.currency()),
            format_currency(Some(*stock.prev_close()), stock.currency()),
        )),
        Line::from(format!(
            "Day range: {} – {}",
            format_currency(Some(*stock.low_price()), stock.currency()),
            format_currency(Some(*stock.high_price()), stock.currency()),
        )),
        Line::from(if *stock.in_watchlist() {
            Span::styled("On watchlist", Style::default().fg(Color::Yellow))
        } else {
            Span::raw("Not on watchlist")
        }),
    ]
}

fn render_recommendation(frame: &mut Frame, state: &StoreState, area: Rect) {
    let Some(recommendation) = state.recommendation().as_ref() else {
        return;
    };

    let stock = recommendation.stock();
    let gain = *recommendation.potential_gain_percent();
    let color_gain = if gain >= Decimal::ZERO {
        Color::Green
    } else {
        Color::Red
    };

    let lines = vec![
        Line::from(Span::styled(
            format!("{} — {}", stock.symbol(), stock.name()),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(format!(
            "Price: {}{}",
            format_currency(Some(*stock.current_price()), stock.currency()),
            if *stock.in_watchlist() {
                "  ★ on watchlist"
            } else {
                ""
            },
        )),
        Line::from(vec![
            Span::raw("Potential gain: "),
            Span::styled(format_percent(gain), Style::default().fg(color_gain)),
        ]),
        Line::from(""),
        Line::from(recommendation.reason().to_string()),
    ];

    let popup_area = centered_rect(60, 9, area);
    let popup = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .title("Recommendation")
            .borders(Borders::ALL),
    );
    frame.render_widget(Clear, popup_area);
    frame.render_widget(popup, popup_area);
}

fn render_status(frame: &mut Frame, state: &StoreState, area: Rect, search_input: &Option<String>) {
    let status = if let Some(input) = search_input {
        Paragraph::new(format!("Search: {input}_")).style(Style::default().fg(Color::Yellow))
    } else if let Some(error) = state.error().as_ref() {
        Paragraph::new(error.as_str()).style(Style::default().fg(Color::Red))
    } else if *state.loading() {
        Paragraph::new("Loading...").style(Style::default().fg(Color::Yellow))
    } else {
        Paragraph::new(
            "q quit  ↑/↓ select  Enter detail  w watchlist  r recommend  / search  s sort  o order  f watch-only  F5 refresh  Esc close",
        )
    };

    frame.render_widget(status.block(Block::default().borders(Borders::ALL)), area);
}

fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}
