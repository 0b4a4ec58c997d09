use std::time::Duration;

use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WebDriverError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("WebDriver error `{error}`: {message}")]
    Protocol { error: String, message: String },

    #[error("no such element: {0}")]
    NoSuchElement(String),

    #[error("stale element reference: {0}")]
    StaleElement(String),

    #[error("timed out after {timeout:?} waiting for {what}")]
    Timeout { what: String, timeout: Duration },

    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl WebDriverError {
    /// Builds the error from the `value` object of a failed command, e.g.
    /// `{"error": "no such element", "message": "..."}`.
    pub(crate) fn from_value(value: &Value) -> Self {
        let error = value
            .get("error")
            .and_then(Value::as_str)
            .unwrap_or("unknown error")
            .to_owned();
        let message = value
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_owned();
        match error.as_str() {
            "no such element" => Self::NoSuchElement(message),
            "stale element reference" => Self::StaleElement(message),
            _ => Self::Protocol { error, message },
        }
    }

    /// Errors a polling wait should retry on instead of giving up.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::NoSuchElement(_) | Self::StaleElement(_))
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}
