//! Reading listings out of the search results.

use log::{info, warn};
use model::listing::{Listing, Operator};

use crate::{
    error::ScrapeError,
    page::Page,
    parse::{parse_price, parse_rating, parse_seats},
    report::{Outcome, ScrapeReport, Step},
    selectors::ResultFields,
    wait::{Condition, Wait},
    webdriver::{ElementRef, Locator},
};

async fn field_text<P: Page>(
    page: &mut P,
    item: &ElementRef,
    locator: &Locator,
    field: &'static str,
) -> Result<String, ScrapeError> {
    let element = page
        .find_in(item, locator)
        .await
        .map_err(|why| ScrapeError::field(field, why.to_string()))?;
    page.text(&element)
        .await
        .map(|text| text.trim().to_owned())
        .map_err(|why| ScrapeError::field(field, why.to_string()))
}

async fn optional_field_text<P: Page>(
    page: &mut P,
    item: &ElementRef,
    locator: &Locator,
    field: &'static str,
) -> Result<Option<String>, ScrapeError> {
    let elements = page
        .find_all_in(item, locator)
        .await
        .map_err(|why| ScrapeError::field(field, why.to_string()))?;
    match elements.first() {
        Some(element) => page
            .text(element)
            .await
            .map(Some)
            .map_err(|why| ScrapeError::field(field, why.to_string())),
        None => Ok(None),
    }
}

/// Reads one search result. Any unreadable field other than the rating fails
/// the whole result.
pub async fn extract_listing<P: Page>(
    page: &mut P,
    item: &ElementRef,
    fields: &ResultFields,
    operator: Operator,
) -> Result<Listing, ScrapeError> {
    let price = parse_price(&field_text(page, item, &fields.price, "price").await?)?;
    let rating =
        optional_field_text(page, item, &fields.star_rating, "star_rating").await?;

    Ok(Listing {
        route_name: field_text(page, item, &fields.route_name, "route_name").await?,
        bus_name: field_text(page, item, &fields.bus_name, "bus_name").await?,
        bustype: field_text(page, item, &fields.bustype, "bustype").await?,
        departing_time: field_text(page, item, &fields.departing_time, "departing_time")
            .await?,
        duration: field_text(page, item, &fields.duration, "duration").await?,
        reaching_time: field_text(page, item, &fields.reaching_time, "reaching_time")
            .await?,
        star_rating: parse_rating(rating.as_deref()),
        price,
        seats_available: parse_seats(
            &field_text(page, item, &fields.seats_available, "seats_available").await?,
        )?,
        is_government: operator.is_government(),
    })
}

/// Extracts every item on its own; a broken item is recorded and skipped.
pub async fn extract_listings<P: Page>(
    page: &mut P,
    items: &[ElementRef],
    fields: &ResultFields,
    report: &mut ScrapeReport,
) {
    for (index, item) in items.iter().enumerate() {
        match extract_listing(page, item, fields, report.operator).await {
            Ok(listing) => report.push(listing),
            Err(why) => report.skip_record(index, why),
        }
    }
}

/// Waits for the result list, then extracts all of it.
pub async fn collect_results<P: Page>(
    page: &mut P,
    fields: &ResultFields,
    wait: &Wait,
    condition: Condition,
    report: &mut ScrapeReport,
) -> Outcome {
    match wait.until(page, &fields.item, condition).await {
        Ok(_) => {}
        Err(why) if why.is_timeout() => {
            warn!("no {} bus results: {}", report.operator.label(), why);
            return Outcome::NoResults;
        }
        Err(why) => {
            report.step_failed(Step::AwaitResults, why);
            return Outcome::Aborted;
        }
    }

    let items = match page.find_all(&fields.item).await {
        Ok(items) => items,
        Err(why) => {
            report.step_failed(Step::AwaitResults, why);
            return Outcome::Aborted;
        }
    };
    if items.is_empty() {
        info!("no {} buses found", report.operator.label());
        return Outcome::NoResults;
    }

    info!("extracting {} {} bus results", items.len(), report.operator.label());
    extract_listings(page, &items, fields, report).await;
    Outcome::Completed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        selectors::result_fields,
        testing::{FakePage, FakeResult},
    };

    #[tokio::test]
    async fn extracts_all_fields() {
        let fields = result_fields();
        let mut page = FakePage::new();
        let item = page.add_result(
            &fields,
            FakeResult::sample("SRS Travels")
                .with(&fields.price, "₹1,234.50")
                .with(&fields.star_rating, "4.3")
                .with(&fields.seats_available, "12 Seats left"),
        );

        let listing = extract_listing(&mut page, &item, &fields, Operator::Private)
            .await
            .unwrap();

        assert_eq!(listing.bus_name, "SRS Travels");
        assert_eq!(listing.route_name, "Koyambedu");
        assert_eq!(listing.departing_time, "22:30");
        assert_eq!(listing.price, Some(1234.5));
        assert_eq!(listing.star_rating, 4.3);
        assert_eq!(listing.seats_available, 12);
        assert!(!listing.is_government);
    }

    #[tokio::test]
    async fn missing_rating_element_counts_as_zero() {
        let fields = result_fields();
        let mut page = FakePage::new();
        let item =
            page.add_result(&fields, FakeResult::sample("KPN").without(&fields.star_rating));

        let listing = extract_listing(&mut page, &item, &fields, Operator::Government)
            .await
            .unwrap();
        assert_eq!(listing.star_rating, 0.0);
        assert!(listing.is_government);
    }

    #[tokio::test]
    async fn empty_fare_has_no_price() {
        let fields = result_fields();
        let mut page = FakePage::new();
        let item = page.add_result(&fields, FakeResult::sample("KPN").with(&fields.price, ""));

        let listing = extract_listing(&mut page, &item, &fields, Operator::Private)
            .await
            .unwrap();
        assert_eq!(listing.price, None);
    }

    #[tokio::test]
    async fn fare_without_digits_keeps_the_record() {
        let fields = result_fields();
        let mut page = FakePage::new();
        let item =
            page.add_result(&fields, FakeResult::sample("KPN").with(&fields.price, "Rs."));

        let mut report = ScrapeReport::new(Operator::Private);
        extract_listings(&mut page, &[item], &fields, &mut report).await;

        assert_eq!(report.listings.len(), 1);
        assert_eq!(report.listings[0].price, None);
        assert!(report.skipped_records.is_empty());
    }

    #[tokio::test]
    async fn missing_field_fails_the_record() {
        let fields = result_fields();
        let mut page = FakePage::new();
        let item = page.add_result(&fields, FakeResult::sample("KPN").without(&fields.duration));

        let result = extract_listing(&mut page, &item, &fields, Operator::Private).await;
        assert!(matches!(
            result,
            Err(ScrapeError::Field {
                field: "duration",
                ..
            })
        ));
    }

    #[tokio::test]
    async fn broken_records_are_skipped_not_fatal() {
        let fields = result_fields();
        let mut page = FakePage::new();
        let first = page.add_result(&fields, FakeResult::sample("A"));
        let second = page.add_result(
            &fields,
            FakeResult::sample("B").with(&fields.seats_available, "full"),
        );
        let third = page.add_result(&fields, FakeResult::sample("C"));

        let mut report = ScrapeReport::new(Operator::Private);
        extract_listings(&mut page, &[first, second, third], &fields, &mut report).await;

        let names: Vec<_> = report.listings.iter().map(|l| l.bus_name.as_str()).collect();
        assert_eq!(names, vec!["A", "C"]);
        assert_eq!(report.skipped_records.len(), 1);
        assert_eq!(report.skipped_records[0].index, 1);
    }
}
