pub mod query;
pub mod recommendation;
pub mod stock;
pub mod stock_price;

pub use query::{SortKey, SortOrder, StockQuery};
pub use recommendation::Recommendation;
pub use stock::{Stock, StockDetail};
pub use stock_price::StockPrice;
