use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode, header};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{
    api::ApiError,
    models::{Recommendation, Stock, StockDetail, StockQuery},
};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";

const REQUEST_TIMEOUT_SECS: u64 = 30;

/// The four backend calls the store depends on. A trait so the store can
/// be driven by an in-memory fake in tests.
#[async_trait]
pub trait StockApi: Send + Sync {
    async fn fetch_stocks(&self, query: &StockQuery) -> Result<Vec<Stock>, ApiError>;

    async fn fetch_detail(&self, symbol: &str) -> Result<StockDetail, ApiError>;

    async fn fetch_recommendation(&self) -> Result<Recommendation, ApiError>;

    async fn toggle_watchlist(&self, symbol: &str) -> Result<Stock, ApiError>;
}

#[derive(Clone, Debug)]
pub struct HttpStockApi {
    http: Client,
    base_url: String,
}

impl HttpStockApi {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let http = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    async fn decode<T>(res: Response) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(ApiError::Server {
                status: status.as_u16(),
                message: server_message(status, &body),
            });
        }

        Ok(res.json::<T>().await?)
    }
}

#[async_trait]
impl StockApi for HttpStockApi {
    async fn fetch_stocks(&self, query: &StockQuery) -> Result<Vec<Stock>, ApiError> {
        let url = self.url("stocks");
        tracing::debug!(%url, "fetching stock list");
        let res = self.http.get(&url).query(&query.to_params()).send().await?;
        Self::decode(res).await
    }

    async fn fetch_detail(&self, symbol: &str) -> Result<StockDetail, ApiError> {
        let url = self.url(&format!("stocks/{symbol}"));
        tracing::debug!(%url, "fetching stock detail");
        let res = self.http.get(&url).send().await?;
        Self::decode(res).await
    }

    async fn fetch_recommendation(&self) -> Result<Recommendation, ApiError> {
        let url = self.url("recommendation");
        tracing::debug!(%url, "fetching recommendation");
        let res = self.http.get(&url).send().await?;
        Self::decode(res).await
    }

    async fn toggle_watchlist(&self, symbol: &str) -> Result<Stock, ApiError> {
        let url = self.url(&format!("stocks/{symbol}/watchlist"));
        tracing::debug!(%url, "toggling watchlist flag");
        let res = self.http.post(&url).send().await?;
        Self::decode(res).await
    }
}

/// The backend wraps failures as `{"error": "..."}`. Fall back to the raw
/// body, then to the status line for bodiless responses.
fn server_message(status: StatusCode, body: &str) -> String {
    if let Some(message) = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(Value::as_str).map(str::to_string))
    {
        return message;
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_string()
    } else {
        trimmed.to_string()
    }
}
