pub use crate::common::RouteResult;

use std::{
    env,
    path::{Path, PathBuf},
    sync::Arc,
};

use axum::{extract::FromRef, Router};
use database::RouteTableGateway;
use log::info;
use redbus::ListingScraper;
use tokio::net::TcpListener;
use tower_http::{
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

pub mod api;
pub mod common;
pub mod hateoas;
pub mod middleware;

#[derive(Clone, FromRef)]
pub struct WebState {
    pub route_table: Arc<dyn RouteTableGateway>,
    pub scraper: Arc<dyn ListingScraper>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebConfig {
    pub bind_address: String,
    pub static_dir: PathBuf,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_owned(),
            static_dir: PathBuf::from("./resources/www/"),
        }
    }
}

impl WebConfig {
    /// Reads `WEB_BIND_ADDRESS` and `WEB_STATIC_DIR`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            bind_address: lookup("WEB_BIND_ADDRESS").unwrap_or(defaults.bind_address),
            static_dir: lookup("WEB_STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.static_dir),
        }
    }
}

/// The api under `/api`, everything else is served from `static_dir`.
pub fn app(state: WebState, static_dir: &Path) -> Router {
    Router::new()
        .nest_service("/api", api::routes(state))
        .fallback_service(
            ServeDir::new(static_dir)
                .not_found_service(ServeFile::new(static_dir.join("error404.html"))),
        )
        .layer(TraceLayer::new_for_http())
}

pub async fn start_web_server(state: WebState, config: &WebConfig) -> std::io::Result<()> {
    let routes = app(state, &config.static_dir);

    let listener = TcpListener::bind(&config.bind_address).await?;
    info!("dashboard listening on http://{}", config.bind_address);
    axum::serve(listener, routes.into_make_service()).await?;

    Ok(())
}
