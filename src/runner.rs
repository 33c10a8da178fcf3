use crate::aggregator::PageAggregator;
use crate::output::write_products;
use crate::pages::page_jobs;
use crate::session::{SessionLauncher, WebDriverLauncher};
use crate::{Result, ScraperConfig};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use tracing::{error, info};

/// Outcome of one page that was scraped and written.
#[derive(Debug, Clone, PartialEq)]
pub struct JobReport {
    pub name: &'static str,
    pub products: usize,
    pub path: PathBuf,
}

/// What a completed run produced, in processing order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    pub jobs: Vec<JobReport>,
}

impl RunSummary {
    pub fn total_products(&self) -> usize {
        self.jobs.iter().map(|job| job.products).sum()
    }
}

/// Scrapes every page of the shop into `<output_dir>/<page>.csv`, driving interactive pages
/// through the configured WebDriver server.
pub async fn run(config: &ScraperConfig) -> Result<RunSummary> {
    run_with(config, WebDriverLauncher::new(config)).await
}

/// Same as [`run`] with a caller-provided session launcher.
///
/// Pages are processed one after another; the first error stops the run, leaving the files of
/// pages already written in place.
pub async fn run_with<L: SessionLauncher>(
    config: &ScraperConfig,
    launcher: L,
) -> Result<RunSummary> {
    let jobs = page_jobs(&config.base_url)?;
    let aggregator = PageAggregator::new(config, launcher)?;

    let progress = ProgressBar::new(jobs.len() as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:30}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let mut summary = RunSummary::default();
    for job in jobs {
        progress.set_message(format!("Scraping {}", job.name));

        let products = match aggregator.aggregate(&job.url).await {
            Ok(products) => products,
            Err(e) => {
                error!(page = job.name, url = %job.url, "Scraping failed: {}", e);
                progress.abandon_with_message(format!("Failed on {}", job.name));
                return Err(e);
            }
        };

        let path = config.output_dir.join(job.file_name());
        write_products(&path, &products)?;
        info!(page = job.name, count = products.len(), path = %path.display(), "Wrote products");

        summary.jobs.push(JobReport {
            name: job.name,
            products: products.len(),
            path,
        });
        progress.inc(1);
    }

    progress.finish_with_message(format!(
        "Completed: {} products across {} pages",
        summary.total_products(),
        summary.jobs.len()
    ));
    Ok(summary)
}
