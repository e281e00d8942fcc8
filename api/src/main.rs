use anyhow::Result;
use api::{generate::generate_products, router, AppState};
use shared::{ApiConfig, Catalog};
use std::path::Path;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Starting products test API...");

    let config = ApiConfig::from_env()?;
    let catalog = if Path::new(&config.data_path).exists() {
        Catalog::from_file(&config.data_path, config.page_size)?
    } else {
        info!(
            "No catalog at {}, generating {} products",
            config.data_path, config.total_products
        );
        let products =
            generate_products(&mut rand::thread_rng(), config.total_products, config.max_test_price);
        let catalog = Catalog::new(products, config.page_size);
        catalog.save(&config.data_path)?;
        catalog
    };

    let app = router(AppState::new(catalog));

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!("API server listening on http://{}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
