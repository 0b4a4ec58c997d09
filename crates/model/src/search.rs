use chrono::{Datelike, NaiveDate};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::ExampleData;

pub const DEFAULT_SOURCE: &str = "Chennai";
pub const DEFAULT_DESTINATION: &str = "Bangalore";

pub fn default_travel_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 11, 25).unwrap_or_default()
}

/// What the user asked for: a city pair and a day of travel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    pub source: String,
    pub destination: String,
    #[serde(with = "utility::serde::naive_date")]
    #[schemars(with = "String")]
    pub date: NaiveDate,
}

impl SearchQuery {
    pub fn new<S, D>(source: S, destination: D, date: NaiveDate) -> Self
    where
        S: Into<String>,
        D: Into<String>,
    {
        Self {
            source: source.into(),
            destination: destination.into(),
            date,
        }
    }

    /// The text of the calendar cell for the travel date.
    pub fn day_of_month(&self) -> String {
        self.date.day().to_string()
    }

    pub fn display_date(&self) -> String {
        self.date.format("%d-%b-%Y").to_string()
    }
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self::new(DEFAULT_SOURCE, DEFAULT_DESTINATION, default_travel_date())
    }
}

impl ExampleData for SearchQuery {
    fn example_data() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_form() {
        let query = SearchQuery::default();
        assert_eq!(query.source, "Chennai");
        assert_eq!(query.destination, "Bangalore");
        assert_eq!(query.date, NaiveDate::from_ymd_opt(2024, 11, 25).unwrap());
    }

    #[test]
    fn day_of_month_has_no_padding() {
        let query = SearchQuery::new(
            "Chennai",
            "Madurai",
            NaiveDate::from_ymd_opt(2024, 12, 5).unwrap(),
        );
        assert_eq!(query.day_of_month(), "5");
        assert_eq!(query.display_date(), "05-Dec-2024");
    }

    #[test]
    fn date_serializes_as_html_date() {
        let json = serde_json::to_value(SearchQuery::default()).unwrap();
        assert_eq!(json["date"], "2024-11-25");
    }
}
