use std::time::Duration;
use thiserror::Error;

pub mod aggregator;
pub mod config;
pub mod extractor;
pub mod output;
pub mod pages;
pub mod runner;
pub mod session;
pub mod types;

// Re-export commonly used types
pub use config::ScraperConfig;
pub use types::{PageJob, Product};

/// The `ScraperError` enum represents the errors that can abort a scraping run.
#[derive(Error, Debug)]
pub enum ScraperError {
    /// The initial static retrieval of a page failed (transport error or HTTP status).
    #[error("Fetching page failed: {0}")]
    Fetch(#[from] reqwest::Error),
    /// The rendering session could not be created or failed mid-interaction.
    #[error("Browser session failed: {0}")]
    Session(String),
    /// A listing fragment is missing one of its required elements or attributes.
    #[error("Listing is missing required field: {0}")]
    MissingField(&'static str),
    /// A field's text could not be coerced to its numeric type.
    #[error("Could not parse {field} from {value:?}")]
    Parse { field: &'static str, value: String },
    /// The reveal control was still interactable after the configured number of triggers.
    #[error("Reveal control still active after {0} triggers")]
    RevealLimit(usize),
    /// The reveal loop did not finish within the configured time.
    #[error("Reveal loop did not finish within {0:?}")]
    RevealTimeout(Duration),
    /// A CSS selector could not be compiled.
    #[error("Invalid selector {0}")]
    InvalidSelector(String),
    /// A target URL could not be built.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    /// Writing or reading a CSV file failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    /// A filesystem operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ::config::ConfigError),
}

/// A type alias for `Result` with the `ScraperError` error type.
pub type Result<T> = std::result::Result<T, ScraperError>;

// Constants

/// The site every target page is derived from.
pub const DEFAULT_BASE_URL: &str = "https://webscraper.io/";
/// The default timeout duration for static HTTP requests.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
/// The pause after each "load more" click.
pub const DEFAULT_REVEAL_PAUSE: Duration = Duration::from_secs(1);
/// The maximum number of "load more" clicks per page.
pub const DEFAULT_MAX_REVEALS: usize = 500;
/// The upper bound on the whole reveal loop of one page.
pub const DEFAULT_REVEAL_TIMEOUT: Duration = Duration::from_secs(300);
/// The WebDriver endpoint a local chromedriver listens on by default.
pub const DEFAULT_WEBDRIVER_URL: &str = "http://localhost:9515";
