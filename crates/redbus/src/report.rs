use std::fmt;

use log::{info, warn};
use model::listing::{Listing, Operator};
use serde::Serialize;

use crate::{error::ScrapeError, webdriver::WebDriverError};

/// The named steps of the scrape protocols.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Step {
    Launch,
    OpenHome,
    OpenDirectory,
    FindRegion,
    OpenRegion,
    EnterSource,
    EnterDestination,
    SelectDate,
    ClickSearch,
    AwaitResults,
    Teardown,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Step::Launch => "launching the browser",
            Step::OpenHome => "opening the home page",
            Step::OpenDirectory => "opening the operator directory",
            Step::FindRegion => "looking up the region",
            Step::OpenRegion => "opening the region page",
            Step::EnterSource => "entering the source city",
            Step::EnterDestination => "entering the destination city",
            Step::SelectDate => "selecting the travel date",
            Step::ClickSearch => "clicking search",
            Step::AwaitResults => "waiting for results",
            Step::Teardown => "closing the browser",
        };
        f.write_str(name)
    }
}

/// How a scrape ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Outcome {
    /// Results were found and extracted. Single records may still have been
    /// skipped.
    Completed,
    /// The search ran but the site showed no results.
    NoResults,
    /// The directory has no entry for the government operator.
    RegionNotFound,
    /// A step every later step depends on failed.
    Aborted,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepFailure {
    pub step: Step,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkippedRecord {
    /// position of the result on the page
    pub index: usize,
    pub message: String,
}

/// Everything a scrape produced: the listings and why there might be fewer
/// than expected.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapeReport {
    pub operator: Operator,
    pub outcome: Outcome,
    #[serde(skip)]
    pub listings: Vec<Listing>,
    pub step_failures: Vec<StepFailure>,
    pub skipped_records: Vec<SkippedRecord>,
}

impl ScrapeReport {
    pub fn new(operator: Operator) -> Self {
        Self {
            operator,
            outcome: Outcome::Completed,
            listings: vec![],
            step_failures: vec![],
            skipped_records: vec![],
        }
    }

    pub fn step_failed(&mut self, step: Step, source: WebDriverError) {
        let error = ScrapeError::step(step, source);
        warn!("{} bus scrape: {}", self.operator.label(), error);
        self.step_failures.push(StepFailure {
            step,
            message: error.to_string(),
        });
    }

    pub fn skip_record(&mut self, index: usize, error: ScrapeError) {
        warn!(
            "error extracting {} bus data of result {}: {}",
            self.operator.label(),
            index,
            error
        );
        self.skipped_records.push(SkippedRecord {
            index,
            message: error.to_string(),
        });
    }

    pub fn push(&mut self, listing: Listing) {
        self.listings.push(listing);
    }

    pub fn finish(mut self, outcome: Outcome) -> Self {
        info!(
            "{} bus scrape finished ({:?}): {} listings, {} skipped, {} failed steps",
            self.operator.label(),
            outcome,
            self.listings.len(),
            self.skipped_records.len(),
            self.step_failures.len()
        );
        self.outcome = outcome;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }

    /// True if the result is empty or partial because something went wrong,
    /// rather than because the site had nothing to offer.
    pub fn has_failures(&self) -> bool {
        !self.step_failures.is_empty() || !self.skipped_records.is_empty()
    }
}
