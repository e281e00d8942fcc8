use anyhow::Context;
use dotenv::dotenv;
use std::str::FromStr;

/// Settings for the range scraper binary.
#[derive(Debug, Clone)]
pub struct ScraperConfig {
    pub api_base_url: String,
    pub page_size: u64,
    pub price_limit: u64,
    pub request_timeout_secs: u64,
    pub workers: usize,
    pub output_path: String,
}

/// Settings for the products API binaries.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub bind_addr: String,
    pub page_size: usize,
    pub data_path: String,
    pub total_products: usize,
    pub max_test_price: u64,
}

impl ScraperConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenv().ok();

        Ok(ScraperConfig {
            api_base_url: std::env::var("API_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:8080".to_string()),
            page_size: parse_var("PAGE_SIZE", 1000)?,
            price_limit: parse_var("PRICE_LIMIT", 100_000)?,
            request_timeout_secs: parse_var("REQUEST_TIMEOUT_SECS", 30)?,
            workers: parse_var("SCRAPER_WORKERS", 1)?,
            output_path: std::env::var("OUTPUT_PATH")
                .unwrap_or_else(|_| "output.json".to_string()),
        })
    }
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenv().ok();

        Ok(ApiConfig {
            bind_addr: std::env::var("API_BIND_ADDR")
                .unwrap_or_else(|_| "0.0.0.0:8080".to_string()),
            page_size: parse_var("PAGE_SIZE", crate::DEFAULT_PAGE_SIZE)?,
            data_path: std::env::var("DATA_PATH").unwrap_or_else(|_| "data.json".to_string()),
            total_products: parse_var("TOTAL_PRODUCTS", 500_000)?,
            max_test_price: parse_var("MAX_TEST_PRICE", 10_000)?,
        })
    }
}

/// Read `name` from the environment, falling back to `default` when unset.
/// A set but unparsable value is an error rather than silently ignored.
fn parse_var<T>(name: &str, default: T) -> Result<T, anyhow::Error>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .with_context(|| format!("Invalid value for {}: {:?}", name, raw)),
        _ => Ok(default),
    }
}
