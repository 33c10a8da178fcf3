#![allow(dead_code)]

use async_trait::async_trait;
use ecomscrape::session::{RevealOutcome, RevealSession, SessionLauncher};
use ecomscrape::{Result, ScraperConfig, ScraperError};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

pub const REVEAL_BUTTON: &str =
    r#"<a class="btn btn-lg btn-block btn-primary ecomerce-items-scroll-more">More</a>"#;

/// One product card as the demo shop renders it.
pub fn card(index: usize) -> String {
    format!(
        r#"<div class="col-md-4 col-xl-4 col-lg-4">
            <div class="card thumbnail">
                <div class="product-wrapper card-body">
                    <div class="caption">
                        <h4 class="price float-end card-title pull-right">${index}.99</h4>
                        <h4><a href="/product/{index}" class="title" title="Product {index}">Prod...</a></h4>
                        <p class="description card-text">Item&nbsp;{index}</p>
                    </div>
                    <div class="ratings">
                        <p class="review-count float-end">{index} reviews</p>
                        <p data-rating="2"><span class="ws-icon ws-icon-star"></span><span class="ws-icon ws-icon-star"></span></p>
                    </div>
                </div>
            </div>
        </div>"#
    )
}

/// A card without its review count.
pub fn broken_card() -> String {
    card(0).replace("review-count", "review-total")
}

pub fn listing_page(count: usize, with_button: bool) -> String {
    let cards: String = (0..count).map(card).collect();
    let button = if with_button { REVEAL_BUTTON } else { "" };
    format!(
        "<html><body><div class=\"row ecomerce-items\">{cards}</div>{button}</body></html>"
    )
}

/// Configuration for tests: no pause between clicks, output in `output_dir`.
pub fn test_config(base_url: &str, output_dir: PathBuf) -> ScraperConfig {
    ScraperConfig {
        base_url: base_url.to_string(),
        reveal_pause_ms: 0,
        output_dir,
        ..ScraperConfig::default()
    }
}

/// A fresh, empty directory under the system temp dir.
pub fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("ecomscrape-{}-{}", name, std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

/// Counts sessions opened and closed by a `FakeLauncher`.
#[derive(Debug, Default)]
pub struct SessionCounters {
    pub opened: AtomicUsize,
    pub closed: AtomicUsize,
}

impl SessionCounters {
    pub fn opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }

    pub fn closed(&self) -> usize {
        self.closed.load(Ordering::SeqCst)
    }
}

/// Simulates a page that starts with `initial` cards and gains `per_reveal` cards on each of
/// its first `reveals` clicks.
#[derive(Debug, Clone)]
pub struct FakeLauncher {
    pub initial: usize,
    pub reveals: usize,
    pub per_reveal: usize,
    /// Click number (1-based) at which the session is lost.
    pub fail_on_click: Option<usize>,
    /// Whether the rendered page contains a broken card.
    pub broken: bool,
    /// Whether capturing the rendered page fails.
    pub fail_source: bool,
    pub counters: Arc<SessionCounters>,
}

impl FakeLauncher {
    pub fn new(initial: usize, reveals: usize, per_reveal: usize) -> Self {
        Self {
            initial,
            reveals,
            per_reveal,
            fail_on_click: None,
            broken: false,
            fail_source: false,
            counters: Arc::new(SessionCounters::default()),
        }
    }
}

pub struct FakeSession {
    page: FakeLauncher,
    clicks: usize,
}

#[async_trait]
impl SessionLauncher for FakeLauncher {
    type Session = FakeSession;

    async fn open(&self, _url: &str) -> Result<FakeSession> {
        self.counters.opened.fetch_add(1, Ordering::SeqCst);
        Ok(FakeSession {
            page: self.clone(),
            clicks: 0,
        })
    }
}

#[async_trait]
impl RevealSession for FakeSession {
    async fn reveal_more(&mut self) -> Result<RevealOutcome> {
        if self.page.fail_on_click == Some(self.clicks + 1) {
            return Err(ScraperError::Session("session lost".to_string()));
        }
        if self.clicks == self.page.reveals {
            return Ok(RevealOutcome::Exhausted);
        }
        self.clicks += 1;
        Ok(RevealOutcome::Revealed)
    }

    async fn page_source(&self) -> Result<String> {
        if self.page.fail_source {
            return Err(ScraperError::Session("page source unavailable".to_string()));
        }
        let visible = self.page.initial + self.clicks * self.page.per_reveal;
        let mut html = listing_page(visible, true);
        if self.page.broken {
            html = html.replace("</div><a", &format!("{}</div><a", broken_card()));
        }
        Ok(html)
    }

    async fn close(self) -> Result<()> {
        self.page.counters.closed.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
