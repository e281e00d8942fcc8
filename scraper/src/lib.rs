//! Range-Scraper: complete retrieval from a page-truncated price-range API
//!
//! The upstream products API only supports a `minPrice`/`maxPrice` filter and
//! silently cuts every response to a fixed page size, reporting the true match
//! count alongside. This crate walks the price domain in fixed-size windows,
//! detects truncation from the `total` / returned-count mismatch and bisects
//! truncated windows until each one fits in a page, so that every product is
//! fetched exactly once.
//!
//! # Modules
//!
//! - **window / page**: price windows and fetched pages
//! - **source**: the `PageSource` abstraction and its reqwest implementation
//! - **scheduler**: the sequential range scheduler
//! - **pool**: the same algorithm on a bounded pool of tokio workers
//! - **output**: JSON result writer
//!
//! # Example
//!
//! ```no_run
//! use range_scraper::prelude::*;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let source = HttpPageSource::new("http://localhost:8080", std::time::Duration::from_secs(30))?;
//! let scheduler = RangeScheduler::new(source, SchedulerConfig::new(1000, 100_000))?;
//! let outcome = scheduler.run().await?;
//! println!("{} products in {} requests", outcome.items.len(), outcome.stats.requests);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod output;
pub mod page;
pub mod pool;
pub mod scheduler;
pub mod source;
pub mod stats;
pub mod window;

pub use error::{FetchError, ScrapeError};
pub use page::Page;
pub use pool::ConcurrentScheduler;
pub use scheduler::{RangeScheduler, SchedulerConfig, ScrapeOutcome};
pub use source::{HttpPageSource, PageSource};
pub use stats::RunStats;
pub use window::Window;

// Re-export commonly used types
pub mod prelude {
    pub use crate::error::*;
    pub use crate::output::write_json;
    pub use crate::page::*;
    pub use crate::pool::*;
    pub use crate::scheduler::*;
    pub use crate::source::*;
    pub use crate::stats::*;
    pub use crate::window::*;
}

/// Result type alias
pub type Result<T> = std::result::Result<T, ScrapeError>;
