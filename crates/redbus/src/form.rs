//! Filling in the search form.

use std::time::Duration;

use model::search::SearchQuery;
use tokio::time::sleep;

use crate::{
    page::Page,
    selectors,
    wait::Wait,
    webdriver::{ElementRef, Key, Locator, WebDriverError},
};

/// Types a city into an autosuggest input and confirms it with enter. The
/// site picks the suggestion on its own.
pub async fn enter_city<P: Page>(
    page: &mut P,
    input: &ElementRef,
    city: &str,
    typing_pause: Duration,
) -> Result<(), WebDriverError> {
    page.clear(input).await?;
    page.send_keys(input, city).await?;
    sleep(typing_pause).await;
    page.press(input, Key::Enter).await
}

/// Clicks the calendar cell of the travel date. The calendar has to be open.
pub async fn select_day<P: Page>(
    page: &mut P,
    query: &SearchQuery,
    wait: &Wait,
) -> Result<(), WebDriverError> {
    let day = selectors::calendar_day(&query.day_of_month());
    let cell = wait.until_clickable(page, &day).await?;
    page.click(&cell).await
}

pub async fn click_when_clickable<P: Page>(
    page: &mut P,
    locator: &Locator,
    wait: &Wait,
) -> Result<(), WebDriverError> {
    let element = wait.until_clickable(page, locator).await?;
    page.click(&element).await
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::testing::{FakeElement, FakePage};

    fn wait() -> Wait {
        Wait::new(Duration::from_secs(1), Duration::from_millis(100))
    }

    #[tokio::test(start_paused = true)]
    async fn enter_city_clears_types_and_confirms() {
        let mut page = FakePage::new();
        let events = page.events();
        let input = page.add(Locator::id("src"), FakeElement::new(""));

        enter_city(&mut page, &input, "Chennai", Duration::from_secs(1))
            .await
            .unwrap();

        let id = input.id();
        assert_eq!(
            events.all(),
            vec![
                format!("clear {}", id),
                format!("keys {} Chennai", id),
                format!("keys {} {}", id, Key::Enter.as_text()),
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn select_day_matches_only_the_day_of_month() {
        let query = SearchQuery::new(
            "Chennai",
            "Bangalore",
            NaiveDate::from_ymd_opt(2024, 11, 5).unwrap(),
        );
        let mut page = FakePage::new();
        let events = page.events();
        let cell = page.add(selectors::calendar_day("5"), FakeElement::new("5"));

        select_day(&mut page, &query, &wait()).await.unwrap();
        assert!(events.contains(&format!("click {}", cell.id())));
    }

    #[tokio::test(start_paused = true)]
    async fn select_day_times_out_without_cell() {
        let mut page = FakePage::new();
        let result = select_day(&mut page, &SearchQuery::default(), &wait()).await;
        assert!(result.unwrap_err().is_timeout());
    }
}
