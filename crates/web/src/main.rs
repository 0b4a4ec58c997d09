use std::sync::Arc;

use database::{DatabaseConnectionInfo, PgRouteTable};
use log::error;
use redbus::ScraperConfig;
use web::{start_web_server, WebConfig, WebState};

#[tokio::main]
async fn main() {
    env_logger::init();

    // database
    let route_table = PgRouteTable::new(DatabaseConnectionInfo::from_env());

    // scraper
    let scraper = ScraperConfig::from_env().into_scraper();

    // web server
    let config = WebConfig::from_env();
    let state = WebState {
        route_table: Arc::new(route_table),
        scraper: Arc::new(scraper),
    };

    if let Err(why) = start_web_server(state, &config).await {
        error!("web server stopped: {}", why);
    }
}
