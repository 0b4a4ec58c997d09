use async_trait::async_trait;
use model::listing::Operator;

use crate::{
    page::{BrowserLauncher, Page},
    report::{Outcome, ScrapeReport, Step},
};

/// The steps of one kind of scrape, run on an already launched page.
#[async_trait]
pub trait Protocol: Sync {
    fn operator(&self) -> Operator;

    /// Drives the page and fills `report` with listings and failures. Does not
    /// close the page.
    async fn run<P: Page>(&self, page: &mut P, report: &mut ScrapeReport) -> Outcome;
}

/// Launches a browser, runs `protocol` on it and closes the browser again,
/// whichever way the protocol ends.
pub async fn scrape<L, S>(launcher: &L, protocol: &S) -> ScrapeReport
where
    L: BrowserLauncher,
    S: Protocol,
{
    let mut report = ScrapeReport::new(protocol.operator());

    let mut page = match launcher.launch().await {
        Ok(page) => page,
        Err(why) => {
            report.step_failed(Step::Launch, why);
            return report.finish(Outcome::Aborted);
        }
    };

    let outcome = protocol.run(&mut page, &mut report).await;

    if let Err(why) = page.close().await {
        report.step_failed(Step::Teardown, why);
    }
    report.finish(outcome)
}
