use async_trait::async_trait;

use crate::webdriver::{ElementRef, Key, Locator, WebDriverError};

/// What the scrapers need from a browser tab. [`crate::webdriver::Session`]
/// is the real thing, tests drive the scrapers with an in-memory page.
#[async_trait]
pub trait Page: Send {
    async fn goto(&mut self, url: &str) -> Result<(), WebDriverError>;

    async fn find_all(
        &mut self,
        locator: &Locator,
    ) -> Result<Vec<ElementRef>, WebDriverError>;

    async fn find_all_in(
        &mut self,
        parent: &ElementRef,
        locator: &Locator,
    ) -> Result<Vec<ElementRef>, WebDriverError>;

    /// First element matching `locator`.
    async fn find(&mut self, locator: &Locator) -> Result<ElementRef, WebDriverError> {
        self.find_all(locator)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| WebDriverError::NoSuchElement(locator.to_string()))
    }

    /// First descendant of `parent` matching `locator`.
    async fn find_in(
        &mut self,
        parent: &ElementRef,
        locator: &Locator,
    ) -> Result<ElementRef, WebDriverError> {
        self.find_all_in(parent, locator)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| WebDriverError::NoSuchElement(locator.to_string()))
    }

    async fn text(&mut self, element: &ElementRef) -> Result<String, WebDriverError>;

    async fn clear(&mut self, element: &ElementRef) -> Result<(), WebDriverError>;

    async fn send_keys(
        &mut self,
        element: &ElementRef,
        text: &str,
    ) -> Result<(), WebDriverError>;

    async fn press(
        &mut self,
        element: &ElementRef,
        key: Key,
    ) -> Result<(), WebDriverError> {
        self.send_keys(element, &key.as_text()).await
    }

    async fn click(&mut self, element: &ElementRef) -> Result<(), WebDriverError>;

    async fn is_displayed(&mut self, element: &ElementRef) -> Result<bool, WebDriverError>;

    async fn is_enabled(&mut self, element: &ElementRef) -> Result<bool, WebDriverError>;

    /// Ends the browser session.
    async fn close(self) -> Result<(), WebDriverError>
    where
        Self: Sized;
}

/// Hands out fresh pages, one per scrape.
#[async_trait]
pub trait BrowserLauncher: Send + Sync {
    type Page: Page;

    async fn launch(&self) -> Result<Self::Page, WebDriverError>;
}
