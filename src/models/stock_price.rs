use chrono::{DateTime, Utc};
use derive_getters::Getters;
use derive_new::new;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One historical price observation. The backend returns these newest
/// first, capped at 50 per detail request; no ordering is re-imposed here.
#[derive(Clone, Debug, Deserialize, Getters, PartialEq, Serialize, new)]
pub struct StockPrice {
    id: i64,
    stock_id: String,
    price: Decimal,
    timestamp: DateTime<Utc>,
}
