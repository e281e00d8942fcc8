pub mod catalog;
pub mod config;
pub mod models;

pub use catalog::{Catalog, QueryError, DEFAULT_PAGE_SIZE};
pub use config::{ApiConfig, ScraperConfig};
pub use models::*;
