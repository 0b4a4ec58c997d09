//! Scrapes bus listings from redbus.in through a WebDriver controlled
//! browser.

use async_trait::async_trait;
use model::search::SearchQuery;
use tokio::sync::Mutex;

pub mod config;
pub mod error;
pub mod extract;
pub mod form;
pub mod government;
pub mod page;
pub mod parse;
pub mod private;
pub mod protocol;
pub mod report;
pub mod selectors;
pub mod wait;
pub mod webdriver;

#[cfg(test)]
mod testing;

pub use config::{ScraperConfig, Site, Timings};
pub use report::{Outcome, ScrapeReport};

use crate::{
    government::GovernmentSearch, page::BrowserLauncher, private::PrivateSearch,
    protocol::scrape, selectors::GOVERNMENT_REGION,
};

/// Something that can look up the buses of a route.
#[async_trait]
pub trait ListingScraper: Send + Sync {
    async fn scrape_private(&self, query: &SearchQuery) -> ScrapeReport;

    async fn scrape_government(&self, query: &SearchQuery) -> ScrapeReport;
}

/// Scraper that runs every search in a fresh browser. Only one search runs
/// at a time.
pub struct RedBusScraper<L> {
    launcher: L,
    site: Site,
    timings: Timings,
    running: Mutex<()>,
}

impl<L: BrowserLauncher> RedBusScraper<L> {
    pub fn new(launcher: L, site: Site, timings: Timings) -> Self {
        Self {
            launcher,
            site,
            timings,
            running: Mutex::new(()),
        }
    }
}

#[async_trait]
impl<L: BrowserLauncher> ListingScraper for RedBusScraper<L> {
    async fn scrape_private(&self, query: &SearchQuery) -> ScrapeReport {
        let _running = self.running.lock().await;
        let search = PrivateSearch {
            site: &self.site,
            timings: &self.timings,
            query,
        };
        scrape(&self.launcher, &search).await
    }

    async fn scrape_government(&self, query: &SearchQuery) -> ScrapeReport {
        let _running = self.running.lock().await;
        let search = GovernmentSearch {
            site: &self.site,
            timings: &self.timings,
            query,
            region: GOVERNMENT_REGION,
        };
        scrape(&self.launcher, &search).await
    }
}
