//! Page sources
//!
//! A `PageSource` answers one price-range query with the server-side match
//! count and the (possibly truncated) records.

pub mod http;

pub use http::*;

use crate::error::FetchError;
use crate::page::Page;
use async_trait::async_trait;

/// Abstract `FetchPage(minPrice, maxPrice)` operation.
#[async_trait]
pub trait PageSource: Send + Sync {
    type Item: Send + 'static;

    /// Fetch records with `min_price <= price <= max_price`.
    async fn fetch_page(
        &self,
        min_price: u64,
        max_price: u64,
    ) -> Result<Page<Self::Item>, FetchError>;
}

