use derive_getters::Getters;
use derive_new::new;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Stock;

/// Server-computed suggestion pairing one stock with a projected gain and
/// a rationale. The embedded stock must stay in sync with any other view
/// of the same symbol; see `StockStore::toggle_watchlist`.
#[derive(Clone, Debug, Deserialize, Getters, PartialEq, Serialize, new)]
pub struct Recommendation {
    #[serde(rename = "recommendation")]
    stock: Stock,
    potential_gain_percent: Decimal,
    reason: String,
}

impl Recommendation {
    pub fn replace_stock(&mut self, stock: Stock) {
        self.stock = stock;
    }
}
