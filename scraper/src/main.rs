use anyhow::{Context, Result};
use range_scraper::prelude::*;
use shared::ScraperConfig;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!(
        "Starting range-scraper {} ({}, built {}, {})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIME"),
        env!("PROFILE")
    );

    let config = ScraperConfig::from_env()?;
    info!("Scraping {} ...", config.api_base_url);

    let source = HttpPageSource::new(
        config.api_base_url.clone(),
        Duration::from_secs(config.request_timeout_secs),
    )
    .context("Failed to create HTTP client")?;
    let scheduler_config = SchedulerConfig::new(config.page_size, config.price_limit);

    let outcome = if config.workers <= 1 {
        RangeScheduler::new(source, scheduler_config)?.run().await?
    } else {
        ConcurrentScheduler::new(source, scheduler_config, config.workers)?
            .run()
            .await?
    };

    info!(
        "Run started at {} ({} splits)",
        outcome.stats.started_at.to_rfc3339(),
        outcome.stats.splits
    );
    for line in outcome.stats.summary_lines() {
        println!("{}", line);
    }

    write_json(&config.output_path, &outcome.items)
        .await
        .with_context(|| format!("Failed to write {}", config.output_path))?;

    Ok(())
}
