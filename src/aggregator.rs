use crate::extractor::ProductExtractor;
use crate::session::{RevealOutcome, RevealSession, SessionLauncher};
use crate::{Product, Result, ScraperConfig, ScraperError};
use reqwest::Client;
use scraper::Html;
use std::time::Duration;
use tokio::time::{sleep, timeout};
use tracing::{debug, info, instrument, warn};

/// How the listings of a page are retrieved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// The server renders every listing; the fetched document is complete.
    Static,
    /// Some listings only appear after clicking "load more" in a browser.
    Interactive,
}

/// The `PageAggregator` struct collects every product of a listing page, driving a browser
/// session only for pages that hide listings behind a "load more" control.
pub struct PageAggregator<L> {
    /// The HTTP client used for the static probe.
    client: Client,
    extractor: ProductExtractor,
    /// Opens browser sessions for interactive pages.
    launcher: L,
    reveal_pause: Duration,
    max_reveals: usize,
    reveal_timeout: Duration,
}

impl<L: SessionLauncher> PageAggregator<L> {
    /// Creates a new `PageAggregator` with the given configuration and session launcher.
    ///
    /// # Arguments
    ///
    /// * `config` - The configuration settings for the scraper.
    /// * `launcher` - Opens browser sessions for pages with a "load more" control.
    ///
    /// # Returns
    ///
    /// A `Result` containing the `PageAggregator`, or an error if the client could not be created.
    pub fn new(config: &ScraperConfig, launcher: L) -> Result<Self> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout())
            .gzip(true)
            .build()?;

        Ok(Self {
            client,
            extractor: ProductExtractor::new()?,
            launcher,
            reveal_pause: config.reveal_pause(),
            max_reveals: config.max_reveals,
            reveal_timeout: config.reveal_timeout(),
        })
    }

    /// Returns every product listed on the page, in document order.
    ///
    /// # Arguments
    ///
    /// * `url` - The listing page.
    ///
    /// # Returns
    ///
    /// A `Result` containing the products, or the first fetch, session or extraction error.
    #[instrument(skip(self))]
    pub async fn aggregate(&self, url: &str) -> Result<Vec<Product>> {
        let html = self.fetch(url).await?;
        let document = Html::parse_document(&html);

        let products = match self.probe(&document) {
            Strategy::Static => {
                debug!("No reveal control, page is complete");
                self.extractor.extract_all(&document)?
            }
            Strategy::Interactive => {
                drop(document);
                info!("Reveal control found, switching to browser session");
                let rendered = self.reveal_all(url).await?;
                self.extractor.extract_all(&Html::parse_document(&rendered))?
            }
        };

        info!(count = products.len(), "Page aggregated");
        Ok(products)
    }

    /// Decides the retrieval strategy from the statically fetched document.
    pub fn probe(&self, document: &Html) -> Strategy {
        if self.extractor.has_reveal_control(document) {
            Strategy::Interactive
        } else {
            Strategy::Static
        }
    }

    async fn fetch(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        debug!("Response status: {}", response.status());

        Ok(response.text().await?)
    }

    /// Opens a session, clicks "load more" until exhausted and returns the rendered document.
    /// The session is closed before returning, whatever the outcome.
    async fn reveal_all(&self, url: &str) -> Result<String> {
        let mut session = self.launcher.open(url).await?;

        let revealed = match timeout(self.reveal_timeout, self.drive(&mut session)).await {
            Ok(result) => result,
            Err(_) => Err(ScraperError::RevealTimeout(self.reveal_timeout)),
        };
        let closed = session.close().await;

        match (revealed, closed) {
            (Ok(html), Ok(())) => Ok(html),
            (Ok(_), Err(e)) => Err(e),
            (Err(e), Ok(())) => Err(e),
            (Err(e), Err(close_err)) => {
                warn!("Failed to close session after error: {}", close_err);
                Err(e)
            }
        }
    }

    async fn drive(&self, session: &mut L::Session) -> Result<String> {
        let mut reveals = 0usize;

        while session.reveal_more().await? == RevealOutcome::Revealed {
            reveals += 1;
            if reveals > self.max_reveals {
                return Err(ScraperError::RevealLimit(self.max_reveals));
            }
            sleep(self.reveal_pause).await;
        }

        debug!(reveals, "Reveal control exhausted");
        session.page_source().await
    }
}
