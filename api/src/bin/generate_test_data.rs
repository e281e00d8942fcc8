use anyhow::Result;
use api::generate::generate_products;
use shared::{ApiConfig, Catalog};
use tracing::info;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let config = ApiConfig::from_env()?;
    let products =
        generate_products(&mut rand::thread_rng(), config.total_products, config.max_test_price);
    let catalog = Catalog::new(products, config.page_size);
    catalog.save(&config.data_path)?;

    info!("Wrote {} products to {}", catalog.len(), config.data_path);
    Ok(())
}
