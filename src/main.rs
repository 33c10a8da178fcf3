use ecomscrape::{config::ScraperConfig, runner, Result};
use std::time::Instant;
use tracing::error;
use tracing_subscriber::EnvFilter;

/// The main entry point of the application.
///
/// This function initializes logging, loads the configuration, scrapes every page of the shop
/// into its CSV file and prints a summary.
///
/// # Returns
///
/// A `Result` indicating the success or failure of the run.
#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // Load configuration
    let config = ScraperConfig::load()?;

    let start_time = Instant::now();

    let summary = match runner::run(&config).await {
        Ok(summary) => summary,
        Err(e) => {
            error!("Run aborted: {}", e);
            return Err(e);
        }
    };

    println!("\n=== Scrape Summary ===");
    for job in &summary.jobs {
        println!("{:<10} {:>4} products -> {}", job.name, job.products, job.path.display());
    }
    println!("Total products: {}", summary.total_products());
    println!("Processing time: {:.2?}", start_time.elapsed());

    Ok(())
}
