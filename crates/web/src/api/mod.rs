//! `/api` root: a liveness ping plus the versioned listing routes.

use axum::{
    routing::{get, on},
    Json, Router,
};
use serde::Serialize;

pub mod v1;

use crate::{
    common::{route_not_found, METHOD_FILTER_ALL},
    WebState,
};

/// Prefixes a path with the api mount point, e.g. `resource!("/v1/listings/{}", kind)`.
macro_rules! resource {
    ($($arg:tt)*) => {
        format!("/api{}", format_args!($($arg)*))
    };
}
pub(crate) use resource;

#[derive(Debug, Serialize)]
struct Pong {
    message: &'static str,
    service: &'static str,
    version: &'static str,
}

impl Pong {
    fn new() -> Self {
        Self {
            message: "pong!",
            service: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}

pub fn routes(state: WebState) -> Router {
    let v1 = v1::routes(state);
    Router::new()
        .route("/ping", get(ping))
        .nest_service("/v1", v1)
        .fallback_service(on(METHOD_FILTER_ALL, route_not_found))
}

async fn ping() -> Json<Pong> {
    Json(Pong::new())
}
