use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::ExampleData;

/// Who runs the buses of a listing. Decided by the scrape path which produced
/// the listing, never by its content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum Operator {
    Private,
    Government,
}

impl Operator {
    pub fn is_government(&self) -> bool {
        matches!(self, Operator::Government)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Operator::Private => "private",
            Operator::Government => "government",
        }
    }
}

/// A single bus route offered on the booking site.
///
/// All text fields are kept the way the site displays them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub route_name: String,
    pub bus_name: String,
    pub bustype: String,
    pub departing_time: String,
    pub duration: String,
    pub reaching_time: String,
    pub star_rating: f64,
    /// `None` if the site shows no fare.
    pub price: Option<f64>,
    pub seats_available: i32,
    pub is_government: bool,
}

impl ExampleData for Listing {
    fn example_data() -> Self {
        Self {
            route_name: "Koyambedu".to_owned(),
            bus_name: "SRS Travels".to_owned(),
            bustype: "A/C Sleeper (2+1)".to_owned(),
            departing_time: "22:30".to_owned(),
            duration: "06h 15m".to_owned(),
            reaching_time: "04:45".to_owned(),
            star_rating: 4.2,
            price: Some(1234.5),
            seats_available: 12,
            is_government: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_missing_price_as_null() {
        let listing = Listing {
            price: None,
            ..Listing::example_data()
        };
        let json = serde_json::to_value(&listing).unwrap();
        assert!(json["price"].is_null());
        assert_eq!(json["seatsAvailable"], 12);
        assert_eq!(json["isGovernment"], false);
    }

    #[test]
    fn operator_labels() {
        assert_eq!(Operator::Private.label(), "private");
        assert!(!Operator::Private.is_government());
        assert_eq!(Operator::Government.label(), "government");
        assert!(Operator::Government.is_government());
        assert_eq!(
            serde_json::to_value(Operator::Government).unwrap(),
            "government"
        );
    }
}
