//! Products API client

use super::PageSource;
use crate::error::FetchError;
use crate::page::Page;
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use shared::{Product, ProductsResponse};
use std::time::Duration;
use tracing::debug;

const JSON_CONTENT_TYPE: &str = "application/json";

/// Page source backed by the `GET /products` endpoint.
#[derive(Debug, Clone)]
pub struct HttpPageSource {
    base_url: String,
    timeout: Duration,
    client: Client,
}

impl HttpPageSource {
    /// Create a client for `base_url` with a per-request `timeout`
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout,
            client,
        })
    }

    fn products_url(&self) -> String {
        format!("{}/products", self.base_url)
    }

    fn map_transport(&self, err: reqwest::Error) -> FetchError {
        if err.is_timeout() {
            FetchError::Timeout(self.timeout.as_secs())
        } else {
            FetchError::Transport(err)
        }
    }
}

#[async_trait]
impl PageSource for HttpPageSource {
    type Item = Product;

    async fn fetch_page(&self, min_price: u64, max_price: u64) -> Result<Page<Product>, FetchError> {
        let response = self
            .client
            .get(self.products_url())
            .query(&[("minPrice", min_price), ("maxPrice", max_price)])
            .send()
            .await
            .map_err(|e| self.map_transport(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(FetchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        if !content_type
            .as_deref()
            .is_some_and(|ct| ct.starts_with(JSON_CONTENT_TYPE))
        {
            return Err(FetchError::ContentType {
                found: content_type,
            });
        }

        let body = response.bytes().await.map_err(|e| self.map_transport(e))?;
        let decoded: ProductsResponse = serde_json::from_slice(&body)?;
        if decoded.count != decoded.products.len() as u64 {
            return Err(FetchError::InconsistentCount {
                count: decoded.count,
                returned: decoded.products.len(),
            });
        }

        debug!(
            "GET /products [{}, {}] -> total={} count={}",
            min_price, max_price, decoded.total, decoded.count
        );
        Ok(Page::new(decoded.total, decoded.products))
    }
}
