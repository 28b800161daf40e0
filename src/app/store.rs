use derive_getters::Getters;

use crate::{
    api::{ApiError, StockApi},
    models::{Recommendation, Stock, StockPrice, StockQuery},
};

/// In-memory view of the dashboard: the stock list, the stock currently
/// inspected plus its history, the cached recommendation, and the request
/// lifecycle flags. Fetches replace their slice of this state wholesale.
#[derive(Clone, Debug, Default, Getters)]
pub struct StoreState {
    stocks: Vec<Stock>,
    current_stock: Option<Stock>,
    history: Vec<StockPrice>,
    recommendation: Option<Recommendation>,
    loading: bool,
    error: Option<String>,
}

/// Session-scoped cache and orchestrator of the four backend operations.
///
/// Every operation completes even when the request fails: the failure is
/// captured into `StoreState::error`, state keeps its last known good
/// value, and the returned `bool` reports success. `loading` is a single
/// flag shared by all operations. Overlapping calls are neither
/// deduplicated nor cancelled; the last response to resolve wins.
pub struct StockStore<A: StockApi> {
    api: A,
    state: StoreState,
}

impl<A: StockApi> StockStore<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            state: StoreState::default(),
        }
    }

    pub fn state(&self) -> &StoreState {
        &self.state
    }

    /// Fetch the stocks matching `query`, replacing the whole list. Stale
    /// entries absent from the new result disappear, even if another view
    /// still shows them.
    pub async fn load_stocks(&mut self, query: &StockQuery) -> bool {
        self.begin();
        match self.api.fetch_stocks(query).await {
            Ok(stocks) => {
                self.state.stocks = stocks;
                self.succeed()
            }
            Err(err) => self.fail("Failed to fetch stocks", err),
        }
    }

    /// Fetch one stock plus its price history. Both fields are assigned
    /// from the same decoded response, so an observer never sees a new
    /// stock paired with old history.
    pub async fn load_detail(&mut self, symbol: &str) -> bool {
        self.begin();
        match self.api.fetch_detail(symbol).await {
            Ok(detail) => {
                let (stock, history) = detail.into_parts();
                self.state.current_stock = Some(stock);
                self.state.history = history;
                self.succeed()
            }
            Err(err) => self.fail("Failed to fetch stock detail", err),
        }
    }

    /// Fetch the recommendation once per session. While one is cached the
    /// call returns immediately without touching the network or the
    /// lifecycle flags; staleness is the accepted trade-off.
    pub async fn load_recommendation(&mut self) -> bool {
        if self.state.recommendation.is_some() {
            return true;
        }

        self.begin();
        match self.api.fetch_recommendation().await {
            Ok(recommendation) => {
                self.state.recommendation = Some(recommendation);
                self.succeed()
            }
            Err(err) => self.fail("Failed to fetch recommendation", err),
        }
    }

    /// Toggle the watchlist flag for `symbol`. The server response is the
    /// sole source of truth for the new flag value; there is no optimistic
    /// local flip. On success the returned record replaces every stale
    /// view of that symbol: the list entry (position preserved), the
    /// current stock, and the recommendation's embedded stock. On failure
    /// none of them change.
    pub async fn toggle_watchlist(&mut self, symbol: &str) -> bool {
        self.begin();
        match self.api.toggle_watchlist(symbol).await {
            Ok(updated) => {
                if let Some(entry) = self
                    .state
                    .stocks
                    .iter_mut()
                    .find(|s| s.symbol() == symbol)
                {
                    *entry = updated.clone();
                }

                if self
                    .state
                    .current_stock
                    .as_ref()
                    .is_some_and(|s| s.symbol() == symbol)
                {
                    self.state.current_stock = Some(updated.clone());
                }

                if let Some(recommendation) = self.state.recommendation.as_mut() {
                    if recommendation.stock().symbol() == symbol {
                        recommendation.replace_stock(updated);
                    }
                }

                self.succeed()
            }
            Err(err) => self.fail("Failed to toggle watchlist", err),
        }
    }

    fn begin(&mut self) {
        self.state.loading = true;
        self.state.error = None;
    }

    fn succeed(&mut self) -> bool {
        self.state.loading = false;
        true
    }

    fn fail(&mut self, what: &str, err: ApiError) -> bool {
        tracing::warn!(error = %err, "{}", what);
        self.state.loading = false;
        self.state.error = Some(format!("{what}: {err}"));
        false
    }
}
