use serde::{Deserialize, Serialize};

/// A single product as served by the products API and written to the output file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Product {
    pub name: String,
    pub price: u64,
}

impl Product {
    pub fn new(name: impl Into<String>, price: u64) -> Self {
        Self {
            name: name.into(),
            price,
        }
    }
}

/// Body of a successful `GET /products` response.
///
/// `total` is the number of products matching the price filter before the
/// page limit is applied, `count` is the number actually returned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductsResponse {
    pub total: u64,
    pub count: u64,
    pub products: Vec<Product>,
}

impl ProductsResponse {
    pub fn is_truncated(&self) -> bool {
        self.total > self.products.len() as u64
    }
}

/// Body of a rejected request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// On-disk layout of the catalog data file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TestData {
    pub data: Vec<Product>,
}
