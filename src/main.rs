use std::env;

use clap::Parser;
use stock_dashboard_tui::{
    api::{DEFAULT_BASE_URL, HttpStockApi},
    app::{App, StockStore},
    models::StockQuery,
};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "stock-dashboard-tui")]
struct Args {
    /// Base URL of the dashboard API. Falls back to the STOCK_API_URL
    /// environment variable, then to the built-in default.
    #[arg(long)]
    api_url: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let base_url = args
        .api_url
        .or_else(|| env::var("STOCK_API_URL").ok())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    let api = HttpStockApi::new(base_url)?;
    let mut store = StockStore::new(api);
    store.load_stocks(&StockQuery::default()).await;

    let mut app = App::new(store);
    app.run().await?;

    Ok(())
}
