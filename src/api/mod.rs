pub mod client;
pub mod error;

pub use client::{DEFAULT_BASE_URL, HttpStockApi, StockApi};
pub use error::ApiError;
