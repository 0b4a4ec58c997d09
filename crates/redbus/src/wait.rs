use std::time::Duration;

use log::debug;
use tokio::time::{sleep, Instant};

use crate::{
    page::Page,
    webdriver::{ElementRef, Locator, WebDriverError},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    /// At least one matching element is in the DOM.
    Present,
    /// Like `Present`, but yields every match.
    AllPresent,
    /// The first match is displayed.
    Visible,
    /// The first match is displayed and enabled.
    Clickable,
}

/// A bounded, polling wait for a condition on the page.
#[derive(Debug, Clone, Copy)]
pub struct Wait {
    pub timeout: Duration,
    pub poll_interval: Duration,
}

impl Wait {
    pub fn new(timeout: Duration, poll_interval: Duration) -> Self {
        Self {
            timeout,
            poll_interval,
        }
    }

    pub async fn for_presence<P: Page>(
        &self,
        page: &mut P,
        locator: &Locator,
    ) -> Result<ElementRef, WebDriverError> {
        self.first(page, locator, Condition::Present).await
    }

    pub async fn until_visible<P: Page>(
        &self,
        page: &mut P,
        locator: &Locator,
    ) -> Result<ElementRef, WebDriverError> {
        self.first(page, locator, Condition::Visible).await
    }

    pub async fn until_clickable<P: Page>(
        &self,
        page: &mut P,
        locator: &Locator,
    ) -> Result<ElementRef, WebDriverError> {
        self.first(page, locator, Condition::Clickable).await
    }

    async fn first<P: Page>(
        &self,
        page: &mut P,
        locator: &Locator,
        condition: Condition,
    ) -> Result<ElementRef, WebDriverError> {
        self.until(page, locator, condition)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| WebDriverError::NoSuchElement(locator.to_string()))
    }

    /// Polls until `condition` holds for `locator`, returning the matching
    /// elements, or fails with [`WebDriverError::Timeout`].
    pub async fn until<P: Page>(
        &self,
        page: &mut P,
        locator: &Locator,
        condition: Condition,
    ) -> Result<Vec<ElementRef>, WebDriverError> {
        let deadline = Instant::now() + self.timeout;
        loop {
            match probe(page, locator, condition).await {
                Ok(Some(elements)) => return Ok(elements),
                Ok(None) => {}
                Err(why) if why.is_transient() => {
                    debug!("retrying {} after: {}", locator, why)
                }
                Err(why) => return Err(why),
            }

            if Instant::now() >= deadline {
                return Err(WebDriverError::Timeout {
                    what: format!("{:?} {}", condition, locator),
                    timeout: self.timeout,
                });
            }
            sleep(self.poll_interval).await;
        }
    }
}

async fn probe<P: Page>(
    page: &mut P,
    locator: &Locator,
    condition: Condition,
) -> Result<Option<Vec<ElementRef>>, WebDriverError> {
    let elements = page.find_all(locator).await?;
    match condition {
        Condition::AllPresent => Ok((!elements.is_empty()).then_some(elements)),
        Condition::Present => Ok(elements.into_iter().next().map(|first| vec![first])),
        Condition::Visible | Condition::Clickable => {
            let Some(first) = elements.into_iter().next() else {
                return Ok(None);
            };
            if !page.is_displayed(&first).await? {
                return Ok(None);
            }
            if condition == Condition::Clickable && !page.is_enabled(&first).await? {
                return Ok(None);
            }
            Ok(Some(vec![first]))
        }
    }
}
