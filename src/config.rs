use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// The `ScraperConfig` struct holds the configuration settings for the scraper application.
/// It includes the site location, HTTP settings, the WebDriver endpoint and the bounds on the
/// "load more" loop.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    /// The base URL every target page is joined onto.
    pub base_url: String,
    /// The user agent string to be used in HTTP requests.
    pub user_agent: String,
    /// The timeout for static HTTP requests, in seconds.
    pub timeout_secs: u64,
    /// The WebDriver endpoint used for pages that need interaction.
    pub webdriver_url: String,
    /// Whether the browser runs without a window.
    pub headless: bool,
    /// The pause after each "load more" click, in milliseconds.
    pub reveal_pause_ms: u64,
    /// The maximum number of "load more" clicks per page.
    pub max_reveals: usize,
    /// The upper bound on one page's reveal loop, in seconds.
    pub reveal_timeout_secs: u64,
    /// The directory the CSV files are written to.
    pub output_dir: PathBuf,
}

impl Default for ScraperConfig {
    /// Provides default values for the `ScraperConfig` struct.
    ///
    /// # Returns
    ///
    /// A `ScraperConfig` instance that scrapes the live demo site into the working directory.
    fn default() -> Self {
        Self {
            base_url: String::from(crate::DEFAULT_BASE_URL),
            user_agent: String::from("Mozilla/5.0 (compatible; RustBot/1.0)"),
            timeout_secs: crate::DEFAULT_TIMEOUT.as_secs(),
            webdriver_url: String::from(crate::DEFAULT_WEBDRIVER_URL),
            headless: true,
            reveal_pause_ms: crate::DEFAULT_REVEAL_PAUSE.as_millis() as u64,
            max_reveals: crate::DEFAULT_MAX_REVEALS,
            reveal_timeout_secs: crate::DEFAULT_REVEAL_TIMEOUT.as_secs(),
            output_dir: PathBuf::from("."),
        }
    }
}

impl ScraperConfig {
    /// Loads the configuration, layering an optional `scraper.toml` in the working directory
    /// and `SCRAPER_*` environment variables over the defaults.
    ///
    /// # Returns
    ///
    /// A `Result` containing the merged configuration, or an error if a source is malformed.
    pub fn load() -> crate::Result<Self> {
        Self::load_from("scraper")
    }

    /// Same as [`ScraperConfig::load`], reading the optional file `<name>.toml` (or any other
    /// format the `config` crate recognises by extension).
    pub fn load_from(name: &str) -> crate::Result<Self> {
        let defaults = ::config::Config::try_from(&Self::default())?;

        let merged = ::config::Config::builder()
            .add_source(defaults)
            .add_source(::config::File::with_name(name).required(false))
            .add_source(::config::Environment::with_prefix("SCRAPER"))
            .build()?;

        Ok(merged.try_deserialize()?)
    }

    /// The timeout for static HTTP requests.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// The pause after each "load more" click.
    pub fn reveal_pause(&self) -> Duration {
        Duration::from_millis(self.reveal_pause_ms)
    }

    /// The upper bound on one page's reveal loop.
    pub fn reveal_timeout(&self) -> Duration {
        Duration::from_secs(self.reveal_timeout_secs)
    }
}
