use thiserror::Error;

use crate::{report::Step, webdriver::WebDriverError};

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("{step} failed: {source}")]
    Step {
        step: Step,
        #[source]
        source: WebDriverError,
    },

    #[error("could not read `{field}`: {reason}")]
    Field { field: &'static str, reason: String },
}

impl ScrapeError {
    pub fn step(step: Step, source: WebDriverError) -> Self {
        Self::Step { step, source }
    }

    pub fn field<R: Into<String>>(field: &'static str, reason: R) -> Self {
        Self::Field {
            field,
            reason: reason.into(),
        }
    }
}
