use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, OriginalUri, Query, State},
    http::{Method, Uri},
    routing::{get, on},
    Extension, Router,
};
use chrono::NaiveDate;
use log::{error, info};
use model::{
    listing::Listing,
    search::{SearchQuery, DEFAULT_DESTINATION, DEFAULT_SOURCE},
};
use redbus::ScrapeReport;
use serde::Deserialize;
use utility::{let_also::LetAlso, serde::naive_date};

use crate::{
    common::{
        route_not_found, schema, HateoasResult, RouteErrorResponse, VecResponse,
        METHOD_FILTER_ALL,
    },
    hateoas,
    middleware::base_url::{base_url_middleware, BaseUrl},
    WebState,
};

macro_rules! resource {
    ($($arg:tt)*) => {
        crate::api::v1::resource!("/listings{}", format_args!($($arg)*))
    };
}

pub(crate) fn routes(state: WebState) -> Router {
    Router::new()
        .route("/schema", get(schema::<Listing>))
        .route("/private", get(private_listings))
        .route("/government", get(government_listings))
        .layer(axum::middleware::from_fn(base_url_middleware))
        .with_state(state)
        .fallback_service(on(METHOD_FILTER_ALL, route_not_found))
}

/// The dashboard form. Blank or missing fields take the form defaults.
#[derive(Debug, Deserialize)]
pub(crate) struct ListingsQuery {
    source: Option<String>,
    destination: Option<String>,
    #[serde(deserialize_with = "naive_date::deserialize_option", default)]
    date: Option<NaiveDate>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

impl From<ListingsQuery> for SearchQuery {
    fn from(query: ListingsQuery) -> Self {
        let defaults = SearchQuery::default();
        SearchQuery::new(
            non_blank(query.source).unwrap_or_else(|| DEFAULT_SOURCE.to_owned()),
            non_blank(query.destination)
                .unwrap_or_else(|| DEFAULT_DESTINATION.to_owned()),
            query.date.unwrap_or(defaults.date),
        )
    }
}

fn search_query(
    query: Result<Query<ListingsQuery>, QueryRejection>,
    original_uri: &Uri,
) -> Result<SearchQuery, RouteErrorResponse> {
    query.map(|Query(query)| query.into()).map_err(|why| {
        RouteErrorResponse::from(why)
            .with_method(&Method::GET)
            .with_uri(original_uri.path())
    })
}

async fn private_listings(
    OriginalUri(original_uri): OriginalUri,
    State(WebState {
        route_table,
        scraper,
    }): State<WebState>,
    Extension(base_url): Extension<Arc<BaseUrl>>,
    query: Result<Query<ListingsQuery>, QueryRejection>,
) -> HateoasResult<VecResponse<Listing>> {
    let query = search_query(query, &original_uri)?;

    // a missing table must not keep the dashboard from showing listings
    if let Err(why) = route_table.initialize_schema().await {
        error!("could not initialize the route table: {}", why);
    }

    info!(
        "private listings requested: {} to {} on {}",
        query.source, query.destination, query.date
    );
    let report = scraper.scrape_private(&query).await;
    Ok(listings_hateoas(report, &query, &original_uri, base_url).json())
}

async fn government_listings(
    OriginalUri(original_uri): OriginalUri,
    State(WebState { scraper, .. }): State<WebState>,
    Extension(base_url): Extension<Arc<BaseUrl>>,
    query: Result<Query<ListingsQuery>, QueryRejection>,
) -> HateoasResult<VecResponse<Listing>> {
    let query = search_query(query, &original_uri)?;

    info!(
        "government listings requested: {} to {} on {}",
        query.source, query.destination, query.date
    );
    let report = scraper.scrape_government(&query).await;
    Ok(listings_hateoas(report, &query, &original_uri, base_url).json())
}

pub(crate) fn listings_hateoas(
    mut report: ScrapeReport,
    query: &SearchQuery,
    original_uri: &Uri,
    base_url: Arc<BaseUrl>,
) -> hateoas::Response<VecResponse<Listing>> {
    let empty_message = format!("No {} bus data found.", report.operator.label());
    let self_link = original_uri
        .path_and_query()
        .map(|path_and_query| path_and_query.as_str().to_owned())
        .unwrap_or_else(|| original_uri.path().to_owned());

    std::mem::take(&mut report.listings)
        .let_owned(|data| VecResponse::non_paginated(data).with_empty_message(empty_message))
        .let_owned(|content| hateoas::Response::builder(content, base_url))
        .link("self", self_link)
        .link("schema", resource!("/schema"))
        .debug_info("query", query)
        .debug_info("report", &report)
        .build()
}
