//! Search on the page of a state transport corporation, reached through the
//! site's operator directory.

use async_trait::async_trait;
use log::{debug, info, warn};
use model::{listing::Operator, search::SearchQuery};
use tokio::time::sleep;

use crate::{
    config::{Site, Timings},
    extract::collect_results,
    form::{click_when_clickable, enter_city, select_day},
    page::Page,
    protocol::Protocol,
    report::{Outcome, ScrapeReport, Step},
    selectors::{self, SearchForm},
    wait::Condition,
    webdriver::{ElementRef, Locator, WebDriverError},
};

/// First directory link whose text contains `label`, ignoring case.
pub(crate) async fn find_region<P: Page>(
    page: &mut P,
    label: &str,
) -> Result<Option<ElementRef>, WebDriverError> {
    let needle = label.to_uppercase();
    for link in page.find_all(&selectors::region_links()).await? {
        let text = page.text(&link).await?;
        debug!("found region: {}", text.trim());
        if text.to_uppercase().contains(&needle) {
            return Ok(Some(link));
        }
    }
    Ok(None)
}

pub struct GovernmentSearch<'a> {
    pub site: &'a Site,
    pub timings: &'a Timings,
    pub query: &'a SearchQuery,
    /// directory entry to open, normally [`selectors::GOVERNMENT_REGION`]
    pub region: &'a str,
}

impl<'a> GovernmentSearch<'a> {
    async fn fill_city<P: Page>(
        &self,
        page: &mut P,
        input: &Locator,
        city: &str,
    ) -> Result<(), WebDriverError> {
        let input = self.timings.input_wait().for_presence(page, input).await?;
        enter_city(page, &input, city, self.timings.typing_pause).await
    }

    async fn pick_date<P: Page>(
        &self,
        page: &mut P,
        form: &SearchForm,
    ) -> Result<(), WebDriverError> {
        let wait = self.timings.element_wait();
        click_when_clickable(page, &form.date_picker, &wait).await?;
        sleep(self.timings.calendar_pause).await;
        select_day(page, self.query, &wait).await
    }
}

#[async_trait]
impl<'a> Protocol for GovernmentSearch<'a> {
    fn operator(&self) -> Operator {
        Operator::Government
    }

    /// Every step up to and including the search click is required.
    async fn run<P: Page>(&self, page: &mut P, report: &mut ScrapeReport) -> Outcome {
        info!("starting government bus scraping");
        let form = selectors::government_search_form();

        if let Err(why) = page.goto(&self.site.directory_url()).await {
            report.step_failed(Step::OpenDirectory, why);
            return Outcome::Aborted;
        }
        sleep(self.timings.directory_pause).await;

        let region = match find_region(page, self.region).await {
            Ok(Some(region)) => region,
            Ok(None) => {
                warn!("{} region not found in the directory", self.region);
                return Outcome::RegionNotFound;
            }
            Err(why) => {
                report.step_failed(Step::FindRegion, why);
                return Outcome::Aborted;
            }
        };

        info!("{} region found, opening it", self.region);
        if let Err(why) = page.click(&region).await {
            report.step_failed(Step::OpenRegion, why);
            return Outcome::Aborted;
        }
        sleep(self.timings.region_pause).await;

        info!("entering source city: {}", self.query.source);
        if let Err(why) = self.fill_city(page, &form.source, &self.query.source).await {
            report.step_failed(Step::EnterSource, why);
            return Outcome::Aborted;
        }

        info!("entering destination city: {}", self.query.destination);
        if let Err(why) = self
            .fill_city(page, &form.destination, &self.query.destination)
            .await
        {
            report.step_failed(Step::EnterDestination, why);
            return Outcome::Aborted;
        }

        info!("selecting travel date: {}", self.query.display_date());
        if let Err(why) = self.pick_date(page, &form).await {
            report.step_failed(Step::SelectDate, why);
            return Outcome::Aborted;
        }

        info!("clicking search button");
        let wait = self.timings.element_wait();
        if let Err(why) = click_when_clickable(page, &form.search_button, &wait).await {
            report.step_failed(Step::ClickSearch, why);
            return Outcome::Aborted;
        }
        sleep(self.timings.results_pause).await;

        info!("scraping government bus details");
        collect_results(
            page,
            &selectors::result_fields(),
            &self.timings.results_wait(),
            Condition::AllPresent,
            report,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        protocol::scrape,
        selectors::{calendar_day, region_links, result_fields, GOVERNMENT_REGION},
        testing::{FakeElement, FakeLauncher, FakePage, FakeResult},
    };

    fn directory_with(regions: &[&str]) -> FakePage {
        let mut page = FakePage::new();
        for region in regions {
            page.add(region_links(), FakeElement::new(*region));
        }
        page
    }

    fn add_search_form(page: &mut FakePage) {
        let form = selectors::government_search_form();
        page.add(form.source, FakeElement::new(""));
        page.add(form.destination, FakeElement::new(""));
        page.add(form.date_picker, FakeElement::new(""));
        page.add(calendar_day("25"), FakeElement::new("25"));
        page.add(form.search_button, FakeElement::new("Search"));
    }

    async fn run(page: FakePage) -> ScrapeReport {
        let site = Site::new("https://redbus.test/");
        let timings = Timings::default();
        let query = SearchQuery::default();
        let search = GovernmentSearch {
            site: &site,
            timings: &timings,
            query: &query,
            region: GOVERNMENT_REGION,
        };
        scrape(&FakeLauncher::new(page), &search).await
    }

    #[tokio::test]
    async fn region_lookup_ignores_case_and_takes_first() {
        let mut page = directory_with(&["KSRTC (Kerala)", "tnstc", "TNSTC Express"]);
        let region = find_region(&mut page, "TNSTC").await.unwrap();
        assert_eq!(region, Some(ElementRef::new("e2")));
    }

    #[tokio::test(start_paused = true)]
    async fn results_are_marked_government() {
        let fields = result_fields();
        let mut page = directory_with(&["APSRTC", "TNSTC"]);
        add_search_form(&mut page);
        page.add_result(&fields, FakeResult::sample("SETC"));
        page.add_result(&fields, FakeResult::sample("TNSTC").without(&fields.star_rating));
        let events = page.events();

        let report = run(page).await;

        assert_eq!(report.outcome, Outcome::Completed);
        assert_eq!(report.listings.len(), 2);
        assert!(report.listings.iter().all(|l| l.is_government));
        assert_eq!(report.listings[1].star_rating, 0.0);

        let all = events.all();
        assert_eq!(
            all.first().map(String::as_str),
            Some("goto https://redbus.test/online-booking/rtc-directory")
        );
        assert_eq!(all[1], "click e2");
        assert_eq!(all.last().map(String::as_str), Some("close"));
    }

    #[tokio::test(start_paused = true)]
    async fn missing_region_stops_after_directory() {
        let page = directory_with(&["KSRTC", "APSRTC"]);
        let events = page.events();

        let report = run(page).await;

        assert_eq!(report.outcome, Outcome::RegionNotFound);
        assert!(report.is_empty());
        assert!(!report.has_failures());
        assert_eq!(
            events.all(),
            vec!["goto https://redbus.test/online-booking/rtc-directory", "close"]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn missing_calendar_day_aborts() {
        let form = selectors::government_search_form();
        let mut page = directory_with(&["TNSTC"]);
        page.add(form.source, FakeElement::new(""));
        page.add(form.destination, FakeElement::new(""));
        page.add(form.date_picker, FakeElement::new(""));
        page.add(form.search_button, FakeElement::new("Search"));
        let events = page.events();

        let report = run(page).await;

        assert_eq!(report.outcome, Outcome::Aborted);
        assert_eq!(report.step_failures[0].step, Step::SelectDate);
        assert!(!events.contains("click e5"));
        assert!(events.contains("close"));
    }

    #[tokio::test(start_paused = true)]
    async fn search_without_results() {
        let mut page = directory_with(&["TNSTC"]);
        add_search_form(&mut page);
        let events = page.events();

        let report = run(page).await;

        assert_eq!(report.outcome, Outcome::NoResults);
        assert!(report.is_empty());
        assert!(events.contains("click e6"));
        assert_eq!(events.all().last().map(String::as_str), Some("close"));
        assert_eq!(events.count("close"), 1);
    }
}
