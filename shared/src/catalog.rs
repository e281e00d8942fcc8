//! In-memory product catalog with the products API query contract.

use crate::models::{Product, ProductsResponse, TestData};
use anyhow::{Context, Result};
use std::path::Path;
use thiserror::Error;
use tracing::info;

/// Number of products the API returns per request.
pub const DEFAULT_PAGE_SIZE: usize = 1000;

/// Rejected price filter
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("Prices cannot be negative")]
    NegativePrice,

    #[error("minPrice cannot be greater than maxPrice")]
    MinAboveMax,
}

/// Immutable product set answering inclusive price-range queries.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
    page_size: usize,
}

impl Catalog {
    pub fn new(products: Vec<Product>, page_size: usize) -> Self {
        Self {
            products,
            page_size,
        }
    }

    /// Load a catalog from a `{"data": [...]}` file
    pub fn from_file(path: impl AsRef<Path>, page_size: usize) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read(path)
            .with_context(|| format!("Failed to read catalog file {}", path.display()))?;
        let data: TestData = serde_json::from_slice(&raw)
            .with_context(|| format!("Malformed catalog file {}", path.display()))?;

        info!("Loaded {} products from {}", data.data.len(), path.display());
        Ok(Self::new(data.data, page_size))
    }

    /// Write the catalog as a `{"data": [...]}` file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let body = serde_json::to_vec(&TestData {
            data: self.products.clone(),
        })?;
        std::fs::write(path, body)
            .with_context(|| format!("Failed to write catalog file {}", path.display()))?;
        Ok(())
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Products with `min_price <= price <= max_price`, in catalog order,
    /// cut to the page size. `total` always reports the full match count.
    pub fn query(&self, min_price: i64, max_price: i64) -> Result<ProductsResponse, QueryError> {
        if min_price < 0 || max_price < 0 {
            return Err(QueryError::NegativePrice);
        }
        if min_price > max_price {
            return Err(QueryError::MinAboveMax);
        }

        let (min, max) = (min_price as u64, max_price as u64);
        let mut total = 0u64;
        let mut products = Vec::with_capacity(self.page_size.min(self.products.len()));
        for product in self
            .products
            .iter()
            .filter(|p| p.price >= min && p.price <= max)
        {
            total += 1;
            if products.len() < self.page_size {
                products.push(product.clone());
            }
        }

        Ok(ProductsResponse {
            total,
            count: products.len() as u64,
            products,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog(prices: &[u64], page_size: usize) -> Catalog {
        let products = prices
            .iter()
            .enumerate()
            .map(|(i, &price)| Product::new(format!("Product {}", i), price))
            .collect();
        Catalog::new(products, page_size)
    }

    #[test]
    fn test_query_bounds_are_inclusive() {
        let catalog = catalog(&[4, 5, 6, 10, 11], 100);
        let response = catalog.query(5, 10).unwrap();

        assert_eq!(response.total, 3);
        assert_eq!(response.count, 3);
        let prices: Vec<u64> = response.products.iter().map(|p| p.price).collect();
        assert_eq!(prices, vec![5, 6, 10]);
    }

    #[test]
    fn test_query_truncates_to_page_size() {
        let catalog = catalog(&[1, 2, 3, 4, 5, 6], 4);
        let response = catalog.query(0, 100).unwrap();

        assert_eq!(response.total, 6);
        assert_eq!(response.count, 4);
        assert!(response.is_truncated());
        assert_eq!(response.products[0].name, "Product 0");
    }

    #[test]
    fn test_query_rejects_invalid_ranges() {
        let catalog = catalog(&[1], 10);

        assert_eq!(catalog.query(-1, 5).unwrap_err(), QueryError::NegativePrice);
        assert_eq!(catalog.query(0, -5).unwrap_err(), QueryError::NegativePrice);
        assert_eq!(catalog.query(6, 5).unwrap_err(), QueryError::MinAboveMax);
        assert!(catalog.query(5, 5).is_ok());
    }

    #[test]
    fn test_save_and_load() {
        let dir = std::env::temp_dir().join(format!("catalog_test_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("data.json");

        let original = catalog(&[3, 1, 2], 10);
        original.save(&path).unwrap();
        let loaded = Catalog::from_file(&path, 10).unwrap();

        assert_eq!(loaded.products(), original.products());
        std::fs::remove_dir_all(&dir).ok();
    }
}
