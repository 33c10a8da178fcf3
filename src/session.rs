use crate::extractor::REVEAL_CONTROL_CLASS;
use crate::{Result, ScraperConfig, ScraperError};
use async_trait::async_trait;
use thirtyfour::error::{WebDriverError, WebDriverResult};
use thirtyfour::prelude::*;
use thirtyfour::ChromeCapabilities;
use tracing::{debug, instrument, warn};

/// Result of one attempt to click the "load more" control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealOutcome {
    /// The control was clicked; more listings may be loading.
    Revealed,
    /// The control can no longer be interacted with, so every listing is on the page.
    Exhausted,
}

/// A rendered page that can be asked to reveal more listings.
///
/// `close` consumes the session, so a session is released at most once.
#[async_trait]
pub trait RevealSession: Send + Sync + Sized {
    /// Clicks the "load more" control once.
    async fn reveal_more(&mut self) -> Result<RevealOutcome>;

    /// Returns the currently rendered document.
    async fn page_source(&self) -> Result<String>;

    /// Releases the session and whatever browser resources back it.
    async fn close(self) -> Result<()>;
}

/// Opens a fresh `RevealSession` on a URL.
#[async_trait]
pub trait SessionLauncher: Send + Sync {
    type Session: RevealSession;

    async fn open(&self, url: &str) -> Result<Self::Session>;
}

/// Launches Chrome sessions through a WebDriver server such as chromedriver.
#[derive(Debug, Clone)]
pub struct WebDriverLauncher {
    webdriver_url: String,
    headless: bool,
}

impl WebDriverLauncher {
    pub fn new(config: &ScraperConfig) -> Self {
        Self {
            webdriver_url: config.webdriver_url.clone(),
            headless: config.headless,
        }
    }

    fn capabilities(&self) -> Result<ChromeCapabilities> {
        let mut caps = DesiredCapabilities::chrome();
        if self.headless {
            caps.set_headless().map_err(session_error)?;
        }
        caps.set_no_sandbox().map_err(session_error)?;
        caps.set_disable_dev_shm_usage().map_err(session_error)?;
        Ok(caps)
    }
}

#[async_trait]
impl SessionLauncher for WebDriverLauncher {
    type Session = WebDriverSession;

    #[instrument(skip(self), fields(webdriver = %self.webdriver_url))]
    async fn open(&self, url: &str) -> Result<WebDriverSession> {
        let driver = WebDriver::new(&self.webdriver_url, self.capabilities()?)
            .await
            .map_err(session_error)?;

        if let Err(e) = driver.goto(url).await {
            if let Err(quit_err) = driver.quit().await {
                warn!("Failed to quit browser after navigation error: {}", quit_err);
            }
            return Err(session_error(e));
        }

        debug!("Browser session opened");
        Ok(WebDriverSession { driver })
    }
}

/// A live browser tab driven over WebDriver.
pub struct WebDriverSession {
    driver: WebDriver,
}

#[async_trait]
impl RevealSession for WebDriverSession {
    async fn reveal_more(&mut self) -> Result<RevealOutcome> {
        let button = self
            .driver
            .find(By::ClassName(REVEAL_CONTROL_CLASS))
            .await
            .map_err(session_error)?;

        click_outcome(button.click().await)
    }

    async fn page_source(&self) -> Result<String> {
        self.driver.source().await.map_err(session_error)
    }

    async fn close(self) -> Result<()> {
        self.driver.quit().await.map_err(session_error)
    }
}

/// Sorts the result of clicking the "load more" control into a `RevealOutcome`.
fn click_outcome(clicked: WebDriverResult<()>) -> Result<RevealOutcome> {
    match clicked {
        Ok(()) => Ok(RevealOutcome::Revealed),
        // Hidden once every listing is shown.
        Err(WebDriverError::ElementNotInteractable(_)) => Ok(RevealOutcome::Exhausted),
        Err(e) => Err(session_error(e)),
    }
}

fn session_error(e: WebDriverError) -> ScraperError {
    ScraperError::Session(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use thirtyfour::error::WebDriverErrorInfo;

    #[test]
    fn test_successful_click_reveals() {
        assert_eq!(click_outcome(Ok(())).unwrap(), RevealOutcome::Revealed);
    }

    #[test]
    fn test_not_interactable_means_exhausted() {
        let hidden = WebDriverError::ElementNotInteractable(WebDriverErrorInfo::new(
            "element not interactable".to_string(),
        ));

        assert_eq!(click_outcome(Err(hidden)).unwrap(), RevealOutcome::Exhausted);
    }

    #[test]
    fn test_other_click_errors_are_fatal() {
        let intercepted = WebDriverError::ElementClickIntercepted(WebDriverErrorInfo::new(
            "element click intercepted".to_string(),
        ));
        let missing = WebDriverError::NoSuchElement(WebDriverErrorInfo::new("no such element".to_string()));

        assert!(matches!(
            click_outcome(Err(intercepted)),
            Err(ScraperError::Session(_))
        ));
        assert!(matches!(
            click_outcome(Err(missing)),
            Err(ScraperError::Session(_))
        ));
    }
}
