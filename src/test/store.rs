#[cfg(test)]
mod tests {
    use std::sync::{
        Arc, Mutex,
        atomic::{AtomicBool, AtomicUsize, Ordering},
    };

    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use crate::{
        api::{ApiError, StockApi},
        app::StockStore,
        models::{Recommendation, SortOrder, Stock, StockDetail, StockPrice, StockQuery},
    };

    /// In-memory stand-in for the backend. Shared `Arc`s let a test keep a
    /// handle on the dataset after the store takes ownership of its clone.
    #[derive(Clone, Default)]
    struct FakeApi {
        stocks: Arc<Mutex<Vec<Stock>>>,
        history: Arc<Mutex<Vec<StockPrice>>>,
        recommendation: Arc<Mutex<Option<Recommendation>>>,
        fail: Arc<AtomicBool>,
        requests: Arc<AtomicUsize>,
    }

    impl FakeApi {
        fn with_stocks(stocks: Vec<Stock>) -> Self {
            let api = FakeApi::default();
            *api.stocks.lock().unwrap() = stocks;
            api
        }

        fn set_stocks(&self, stocks: Vec<Stock>) {
            *self.stocks.lock().unwrap() = stocks;
        }

        fn set_history(&self, history: Vec<StockPrice>) {
            *self.history.lock().unwrap() = history;
        }

        fn set_recommendation(&self, recommendation: Recommendation) {
            *self.recommendation.lock().unwrap() = Some(recommendation);
        }

        fn set_fail(&self, fail: bool) {
            self.fail.store(fail, Ordering::SeqCst);
        }

        fn requests(&self) -> usize {
            self.requests.load(Ordering::SeqCst)
        }

        fn check(&self) -> Result<(), ApiError> {
            self.requests.fetch_add(1, Ordering::SeqCst);
            if self.fail.load(Ordering::SeqCst) {
                Err(ApiError::Server {
                    status: 500,
                    message: String::from("database gone"),
                })
            } else {
                Ok(())
            }
        }
    }

    #[async_trait]
    impl StockApi for FakeApi {
        async fn fetch_stocks(&self, query: &StockQuery) -> Result<Vec<Stock>, ApiError> {
            self.check()?;
            let mut stocks: Vec<Stock> = self.stocks.lock().unwrap().clone();
            if let Some(search) = query.search() {
                let term = search.to_lowercase();
                stocks.retain(|s| {
                    s.symbol().to_lowercase().contains(&term)
                        || s.name().to_lowercase().contains(&term)
                });
            }
            if *query.watchlist_only() {
                stocks.retain(|s| *s.in_watchlist());
            }
            Ok(stocks)
        }

        async fn fetch_detail(&self, symbol: &str) -> Result<StockDetail, ApiError> {
            self.check()?;
            let stock = self
                .stocks
                .lock()
                .unwrap()
                .iter()
                .find(|s| s.symbol() == symbol)
                .cloned()
                .ok_or(ApiError::Server {
                    status: 404,
                    message: String::from("Stock not found"),
                })?;
            let history = self
                .history
                .lock()
                .unwrap()
                .iter()
                .filter(|p| p.stock_id() == stock.id())
                .cloned()
                .collect();
            Ok(StockDetail::new(stock, history))
        }

        async fn fetch_recommendation(&self) -> Result<Recommendation, ApiError> {
            self.check()?;
            self.recommendation
                .lock()
                .unwrap()
                .clone()
                .ok_or(ApiError::Server {
                    status: 404,
                    message: String::from("No stocks available"),
                })
        }

        async fn toggle_watchlist(&self, symbol: &str) -> Result<Stock, ApiError> {
            self.check()?;
            let mut stocks = self.stocks.lock().unwrap();
            let entry = stocks
                .iter_mut()
                .find(|s| s.symbol() == symbol)
                .ok_or(ApiError::Server {
                    status: 404,
                    message: String::from("Stock not found"),
                })?;
            let updated = with_watchlist(entry, !*entry.in_watchlist());
            *entry = updated.clone();
            Ok(updated)
        }
    }

    fn sample_stock(id: &str, symbol: &str, name: &str, price: Decimal) -> Stock {
        Stock::new(
            id.to_string(),
            symbol.to_string(),
            name.to_string(),
            String::from("Stock"),
            String::from("USD"),
            price,
            price + dec!(5),
            price - dec!(5),
            price,
            price - dec!(2),
            false,
            Utc.with_ymd_and_hms(2026, 8, 4, 21, 30, 0).unwrap(),
        )
    }

    fn with_watchlist(stock: &Stock, in_watchlist: bool) -> Stock {
        Stock::new(
            stock.id().clone(),
            stock.symbol().clone(),
            stock.name().clone(),
            stock.asset_type().clone(),
            stock.currency().clone(),
            *stock.current_price(),
            *stock.high_price(),
            *stock.low_price(),
            *stock.open_price(),
            *stock.prev_close(),
            in_watchlist,
            *stock.updated_at(),
        )
    }

    fn sample_price(id: i64, stock_id: &str, price: Decimal) -> StockPrice {
        StockPrice::new(
            id,
            stock_id.to_string(),
            price,
            Utc.with_ymd_and_hms(2026, 8, 4, 21, 0, 0).unwrap(),
        )
    }

    fn sample_recommendation(stock: Stock) -> Recommendation {
        Recommendation::new(
            stock,
            dec!(12.5),
            String::from("Highest potential upside to 52-week high"),
        )
    }

    fn universe() -> Vec<Stock> {
        vec![
            sample_stock("id-aapl", "AAPL", "Apple Inc.", dec!(210)),
            sample_stock("id-msft", "MSFT", "Microsoft Corp.", dec!(420)),
            sample_stock("id-tsla", "TSLA", "Tesla Inc.", dec!(250)),
        ]
    }

    fn symbols(stocks: &[Stock]) -> Vec<&str> {
        stocks.iter().map(|s| s.symbol().as_str()).collect()
    }

    #[tokio::test]
    async fn list_replaces_stocks_wholesale() {
        let api = FakeApi::with_stocks(universe());
        let mut store = StockStore::new(api.clone());

        assert!(store.load_stocks(&StockQuery::default()).await);
        assert_eq!(symbols(store.state().stocks()), ["AAPL", "MSFT", "TSLA"]);

        api.set_stocks(vec![sample_stock("id-nvda", "NVDA", "Nvidia Corp.", dec!(130))]);
        assert!(store.load_stocks(&StockQuery::default()).await);
        assert_eq!(symbols(store.state().stocks()), ["NVDA"]);
    }

    #[tokio::test]
    async fn list_failure_keeps_previous_results_and_sets_error() {
        let api = FakeApi::with_stocks(universe());
        let mut store = StockStore::new(api.clone());
        assert!(store.load_stocks(&StockQuery::default()).await);

        api.set_fail(true);
        assert!(!store.load_stocks(&StockQuery::default()).await);

        assert_eq!(store.state().stocks().len(), 3);
        assert!(
            store
                .state()
                .error()
                .as_deref()
                .is_some_and(|e| e.starts_with("Failed to fetch stocks"))
        );
        assert!(!*store.state().loading());
    }

    #[tokio::test]
    async fn identical_queries_yield_identical_results() {
        let api = FakeApi::with_stocks(universe());
        let mut store = StockStore::new(api);
        let query = StockQuery::new(Some(String::from("a")), None, SortOrder::Asc, false);

        assert!(store.load_stocks(&query).await);
        let first = store.state().stocks().clone();

        assert!(store.load_stocks(&query).await);
        assert_eq!(first, *store.state().stocks());
    }

    #[tokio::test]
    async fn search_and_watchlist_filters_narrow_the_list() {
        let api = FakeApi::with_stocks(universe());
        let mut store = StockStore::new(api.clone());

        let search = StockQuery::new(Some(String::from("apple")), None, SortOrder::Asc, false);
        assert!(store.load_stocks(&search).await);
        assert_eq!(symbols(store.state().stocks()), ["AAPL"]);

        assert!(store.toggle_watchlist("MSFT").await);
        let watchlist = StockQuery::new(None, None, SortOrder::Asc, true);
        assert!(store.load_stocks(&watchlist).await);
        assert_eq!(symbols(store.state().stocks()), ["MSFT"]);
    }

    #[tokio::test]
    async fn detail_updates_stock_and_history_together() {
        let api = FakeApi::with_stocks(universe());
        api.set_history(vec![
            sample_price(1, "id-aapl", dec!(209)),
            sample_price(2, "id-aapl", dec!(208)),
            sample_price(3, "id-msft", dec!(400)),
        ]);
        let mut store = StockStore::new(api);

        assert!(store.load_detail("AAPL").await);

        let state = store.state();
        assert_eq!(state.current_stock().as_ref().unwrap().symbol(), "AAPL");
        assert_eq!(state.history().len(), 2);
        assert!(state.history().iter().all(|p| p.stock_id() == "id-aapl"));
    }

    #[tokio::test]
    async fn detail_failure_leaves_both_views_untouched() {
        let api = FakeApi::with_stocks(universe());
        api.set_history(vec![sample_price(1, "id-aapl", dec!(209))]);
        let mut store = StockStore::new(api.clone());
        assert!(store.load_detail("AAPL").await);

        api.set_fail(true);
        assert!(!store.load_detail("MSFT").await);

        let state = store.state();
        assert_eq!(state.current_stock().as_ref().unwrap().symbol(), "AAPL");
        assert_eq!(state.history().len(), 1);
        assert!(
            state
                .error()
                .as_deref()
                .is_some_and(|e| e.starts_with("Failed to fetch stock detail"))
        );
    }

    #[tokio::test]
    async fn recommendation_is_fetched_at_most_once() {
        let api = FakeApi::with_stocks(universe());
        api.set_recommendation(sample_recommendation(sample_stock(
            "id-tsla",
            "TSLA",
            "Tesla Inc.",
            dec!(250),
        )));
        let mut store = StockStore::new(api.clone());

        assert!(store.load_recommendation().await);
        let after_first = api.requests();

        assert!(store.load_recommendation().await);
        assert!(store.load_recommendation().await);
        assert_eq!(api.requests(), after_first);
        assert!(store.state().recommendation().is_some());
    }

    #[tokio::test]
    async fn recommendation_failure_sets_error_and_allows_retry() {
        let api = FakeApi::with_stocks(universe());
        let mut store = StockStore::new(api.clone());

        assert!(!store.load_recommendation().await);
        assert!(store.state().recommendation().is_none());
        assert!(
            store
                .state()
                .error()
                .as_deref()
                .is_some_and(|e| e.starts_with("Failed to fetch recommendation"))
        );

        api.set_recommendation(sample_recommendation(sample_stock(
            "id-tsla",
            "TSLA",
            "Tesla Inc.",
            dec!(250),
        )));
        assert!(store.load_recommendation().await);
        assert!(store.state().error().is_none());
    }

    #[tokio::test]
    async fn toggle_propagates_to_every_view_holding_the_symbol() {
        let api = FakeApi::with_stocks(universe());
        api.set_history(vec![sample_price(1, "id-aapl", dec!(209))]);
        api.set_recommendation(sample_recommendation(sample_stock(
            "id-aapl",
            "AAPL",
            "Apple Inc.",
            dec!(210),
        )));
        let mut store = StockStore::new(api);

        assert!(store.load_stocks(&StockQuery::default()).await);
        assert!(store.load_detail("AAPL").await);
        assert!(store.load_recommendation().await);

        assert!(store.toggle_watchlist("AAPL").await);

        let state = store.state();
        assert_eq!(symbols(state.stocks()), ["AAPL", "MSFT", "TSLA"]);
        assert!(*state.stocks()[0].in_watchlist());
        assert!(*state.current_stock().as_ref().unwrap().in_watchlist());
        assert!(
            *state
                .recommendation()
                .as_ref()
                .unwrap()
                .stock()
                .in_watchlist()
        );
        assert!(
            state
                .stocks()
                .iter()
                .filter(|s| s.symbol() != "AAPL")
                .all(|s| !*s.in_watchlist())
        );
    }

    #[tokio::test]
    async fn toggle_failure_mutates_no_view() {
        let api = FakeApi::with_stocks(universe());
        api.set_history(vec![sample_price(1, "id-aapl", dec!(209))]);
        api.set_recommendation(sample_recommendation(sample_stock(
            "id-aapl",
            "AAPL",
            "Apple Inc.",
            dec!(210),
        )));
        let mut store = StockStore::new(api.clone());

        assert!(store.load_stocks(&StockQuery::default()).await);
        assert!(store.load_detail("AAPL").await);
        assert!(store.load_recommendation().await);

        api.set_fail(true);
        assert!(!store.toggle_watchlist("AAPL").await);

        let state = store.state();
        assert!(state.stocks().iter().all(|s| !*s.in_watchlist()));
        assert!(!*state.current_stock().as_ref().unwrap().in_watchlist());
        assert!(
            !*state
                .recommendation()
                .as_ref()
                .unwrap()
                .stock()
                .in_watchlist()
        );
        assert!(
            state
                .error()
                .as_deref()
                .is_some_and(|e| e.starts_with("Failed to toggle watchlist"))
        );
    }
}
