use chrono::{DateTime, Utc};
use derive_getters::Getters;
use derive_new::new;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::StockPrice;

/// Snapshot of a tradable instrument as served by the backend. All fields
/// except `in_watchlist` are read-only from the client's point of view.
#[derive(Clone, Debug, Deserialize, Getters, PartialEq, Serialize, new)]
pub struct Stock {
    id: String,
    symbol: String,
    name: String,
    #[serde(rename = "type")]
    asset_type: String,
    currency: String,
    current_price: Decimal,
    high_price: Decimal,
    low_price: Decimal,
    open_price: Decimal,
    prev_close: Decimal,
    in_watchlist: bool,
    updated_at: DateTime<Utc>,
}

/// Response envelope of `GET /stocks/{symbol}`.
#[derive(Clone, Debug, Deserialize, Getters, PartialEq, Serialize, new)]
pub struct StockDetail {
    stock: Stock,
    history: Vec<StockPrice>,
}

impl StockDetail {
    pub fn into_parts(self) -> (Stock, Vec<StockPrice>) {
        (self.stock, self.history)
    }
}
