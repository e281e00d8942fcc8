//! Error types
//!
//! Every error is fatal to the run: there are no retries and no partial
//! results.

use crate::window::Window;
use thiserror::Error;

/// Failure of a single page fetch
#[derive(Error, Debug)]
pub enum FetchError {
    /// Non-success HTTP status
    #[error("Failed to fetch products: status {status}: {body}")]
    Status { status: u16, body: String },

    /// Response is not JSON
    #[error("Failed to fetch products: invalid Content-Type {found:?}")]
    ContentType { found: Option<String> },

    /// Body could not be decoded as a products response
    #[error("Failed to parse response as JSON: {0}")]
    Decode(#[from] serde_json::Error),

    /// Declared `count` disagrees with the products actually returned
    #[error("Response count {count} does not match {returned} returned products")]
    InconsistentCount { count: u64, returned: usize },

    /// Request exceeded the configured timeout
    #[error("Request timed out after {0}s")]
    Timeout(u64),

    /// Connection or protocol failure
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Failure of a whole scrape run
#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("Invalid scheduler configuration: {0}")]
    InvalidConfig(String),

    #[error("Fetching window {window} failed: {source}")]
    Fetch {
        window: Window,
        #[source]
        source: FetchError,
    },

    /// More records share one exact price than fit in a page
    #[error("Unsplittable truncation at price {price}: {total} matches, {returned} returned")]
    UnsplittableWindow {
        price: u64,
        total: u64,
        returned: usize,
    },

    #[error("Worker task failed: {0}")]
    Worker(#[from] tokio::task::JoinError),

    #[error("Output error: {0}")]
    Output(#[from] std::io::Error),

    #[error("Failed to serialize output: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl ScrapeError {
    pub fn fetch(window: Window, source: FetchError) -> Self {
        Self::Fetch { window, source }
    }
}
