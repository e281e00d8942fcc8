//! Test page sources built on the shared in-memory catalog

#![allow(dead_code)]

use async_trait::async_trait;
use range_scraper::{FetchError, Page, PageSource, Window};
use shared::{Catalog, Product};
use std::collections::HashMap;
use std::sync::Mutex;

/// Answers queries straight from a `Catalog`, recording every window asked for.
pub struct CatalogSource {
    catalog: Catalog,
    requests: Mutex<Vec<Window>>,
    fail_on_request: Option<usize>,
}

impl CatalogSource {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            requests: Mutex::new(Vec::new()),
            fail_on_request: None,
        }
    }

    /// Return a 500 for the `n`-th request (1-based)
    pub fn failing_on(mut self, n: usize) -> Self {
        self.fail_on_request = Some(n);
        self
    }

    pub fn requests(&self) -> Vec<Window> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl PageSource for CatalogSource {
    type Item = Product;

    async fn fetch_page(&self, min_price: u64, max_price: u64) -> Result<Page<Product>, FetchError> {
        let n = {
            let mut requests = self.requests.lock().unwrap();
            requests.push(Window::new(min_price, max_price, false));
            requests.len()
        };
        if self.fail_on_request == Some(n) {
            return Err(FetchError::Status {
                status: 500,
                body: "Internal Server Error".to_string(),
            });
        }

        let response = self
            .catalog
            .query(min_price as i64, max_price as i64)
            .map_err(|e| FetchError::Status {
                status: 400,
                body: e.to_string(),
            })?;
        Ok(Page::new(response.total, response.products))
    }
}

/// Catalog with one product per entry of `prices`, named by index.
pub fn catalog(prices: impl IntoIterator<Item = u64>, page_size: usize) -> Catalog {
    let products = prices
        .into_iter()
        .enumerate()
        .map(|(i, price)| Product::new(format!("Product {}", i), price))
        .collect();
    Catalog::new(products, page_size)
}

/// Deterministic, uneven price spread over `[0, max_price)`.
pub fn spread_prices(count: usize, max_price: u64) -> Vec<u64> {
    (0..count as u64)
        .map(|i| (i * 7919 + (i * i) % 13) % max_price)
        .collect()
}

/// Asserts `scraped` holds every catalog product in `[0, limit]` exactly once.
pub fn assert_complete(catalog: &Catalog, scraped: &[Product], limit: u64) {
    let mut seen: HashMap<&str, usize> = HashMap::new();
    for product in scraped {
        *seen.entry(product.name.as_str()).or_default() += 1;
    }
    let duplicates: Vec<_> = seen.iter().filter(|(_, &n)| n > 1).collect();
    assert!(duplicates.is_empty(), "duplicate records: {:?}", duplicates);

    let expected: Vec<&Product> = catalog
        .products()
        .iter()
        .filter(|p| p.price <= limit)
        .collect();
    for product in &expected {
        assert!(
            seen.contains_key(product.name.as_str()),
            "missing {} at price {}",
            product.name,
            product.price
        );
    }
    assert_eq!(scraped.len(), expected.len());
}
