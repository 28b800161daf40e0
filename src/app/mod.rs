pub mod app;
pub mod store;
pub mod ui;
pub mod utils;

pub use app::App;
pub use store::{StockStore, StoreState};
