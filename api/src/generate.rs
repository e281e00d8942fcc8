//! Random test catalog generation

use rand::Rng;
use shared::Product;

/// `count` products named `Product {i}` with prices uniform in `[0, max_price)`.
pub fn generate_products<R: Rng>(rng: &mut R, count: usize, max_price: u64) -> Vec<Product> {
    (0..count)
        .map(|i| Product::new(format!("Product {}", i), rng.gen_range(0..max_price.max(1))))
        .collect()
}
