//! Cleaning of the text the site displays in a search result.

use crate::error::ScrapeError;

/// Fare text to a price. Everything but digits and dots is dropped, so
/// `"₹1,234.50"` becomes `1234.5`. No digits at all means no price, even if
/// dots are left over as in `"Rs."`.
pub fn parse_price(text: &str) -> Result<Option<f64>, ScrapeError> {
    let cleaned: String = text
        .trim()
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    if !cleaned.chars().any(|c| c.is_ascii_digit()) {
        return Ok(None);
    }
    cleaned
        .parse::<f64>()
        .map(Some)
        .map_err(|why| ScrapeError::field("price", format!("`{}`: {}", text, why)))
}

/// Rating text to a number. Anything but a non-negative number counts as 0.
pub fn parse_rating(text: Option<&str>) -> f64 {
    text.map(str::trim)
        .and_then(|text| text.parse::<f64>().ok())
        .filter(|rating| rating.is_finite() && *rating >= 0.0)
        .unwrap_or(0.0)
}

/// Leading number of texts like `"12 Seats left"`.
pub fn parse_seats(text: &str) -> Result<i32, ScrapeError> {
    let token = text
        .split_whitespace()
        .next()
        .ok_or_else(|| ScrapeError::field("seats_available", "empty text"))?;
    token.parse::<i32>().map_err(|why| {
        ScrapeError::field("seats_available", format!("`{}`: {}", text, why))
    })
}
