//! Search on the main page of the site, which lists private operators.

use async_trait::async_trait;
use log::info;
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
    webdriver::{Locator, WebDriverError},
};

pub struct PrivateSearch<'a> {
    pub site: &'a Site,
    pub timings: &'a Timings,
    pub query: &'a SearchQuery,
}

impl<'a> PrivateSearch<'a> {
    async fn fill_city<P: Page>(
        &self,
        page: &mut P,
        input: &Locator,
        city: &str,
    ) -> Result<(), WebDriverError> {
        let input = page.find(input).await?;
        enter_city(page, &input, city, self.timings.typing_pause).await
    }

    async fn pick_date<P: Page>(
        &self,
        page: &mut P,
        form: &SearchForm,
    ) -> Result<(), WebDriverError> {
        let wait = self.timings.element_wait();
        let picker = wait.until_visible(page, &form.date_picker).await?;
        page.click(&picker).await?;
        select_day(page, self.query, &wait).await
    }
}

#[async_trait]
impl<'a> Protocol for PrivateSearch<'a> {
    fn operator(&self) -> Operator {
        Operator::Private
    }

    /// Opening the page and entering the cities are required; a failed date
    /// selection or search click is recorded and the results are waited for
    /// anyway.
    async fn run<P: Page>(&self, page: &mut P, report: &mut ScrapeReport) -> Outcome {
        info!("starting private bus scraping");
        let form = selectors::private_search_form();

        if let Err(why) = page.goto(&self.site.home_url()).await {
            report.step_failed(Step::OpenHome, why);
            return Outcome::Aborted;
        }
        sleep(self.timings.home_pause).await;

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
        }

        info!("clicking search button");
        let wait = self.timings.element_wait();
        if let Err(why) = click_when_clickable(page, &form.search_button, &wait).await {
            report.step_failed(Step::ClickSearch, why);
        }

        info!("waiting for private bus results");
        collect_results(
            page,
            &selectors::result_fields(),
            &self.timings.results_wait(),
            Condition::Present,
            report,
        )
        .await
    }
}
