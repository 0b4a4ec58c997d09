//! Minimal client for the W3C WebDriver protocol, as spoken by chromedriver
//! and geckodriver.

mod client;
mod error;
mod locator;
mod session;

pub use client::{WebDriverClient, DEFAULT_WEBDRIVER_URL};
pub use error::WebDriverError;
pub use locator::{ElementRef, Key, Locator};
pub use session::Session;
