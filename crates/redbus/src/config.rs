use std::{env, time::Duration};

use crate::{
    selectors,
    wait::Wait,
    webdriver::{WebDriverClient, DEFAULT_WEBDRIVER_URL},
    RedBusScraper,
};

pub const DEFAULT_BASE_URL: &str = "https://www.redbus.in";

/// Fixed pauses and wait bounds of the scrape protocols.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timings {
    /// after opening the home page
    pub home_pause: Duration,
    /// after opening the operator directory
    pub directory_pause: Duration,
    /// after following a region link
    pub region_pause: Duration,
    /// between typing a city and confirming it
    pub typing_pause: Duration,
    /// for the calendar to open
    pub calendar_pause: Duration,
    /// after submitting the government search
    pub results_pause: Duration,
    /// bound for the date picker, calendar cells and search buttons
    pub element_wait: Duration,
    /// bound for the government search inputs
    pub input_wait: Duration,
    /// bound for the first search result
    pub results_wait: Duration,
    pub poll_interval: Duration,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            home_pause: Duration::from_secs(2),
            directory_pause: Duration::from_secs(3),
            region_pause: Duration::from_secs(3),
            typing_pause: Duration::from_secs(1),
            calendar_pause: Duration::from_secs(1),
            results_pause: Duration::from_secs(3),
            element_wait: Duration::from_secs(20),
            input_wait: Duration::from_secs(10),
            results_wait: Duration::from_secs(10),
            poll_interval: Duration::from_millis(250),
        }
    }
}

impl Timings {
    pub fn wait(&self, timeout: Duration) -> Wait {
        Wait::new(timeout, self.poll_interval)
    }

    pub fn element_wait(&self) -> Wait {
        self.wait(self.element_wait)
    }

    pub fn input_wait(&self) -> Wait {
        self.wait(self.input_wait)
    }

    pub fn results_wait(&self) -> Wait {
        self.wait(self.results_wait)
    }
}

/// Where the booking site lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Site {
    base_url: String,
}

impl Site {
    pub fn new<S: Into<String>>(base_url: S) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    pub fn home_url(&self) -> String {
        format!("{}/", self.base_url)
    }

    pub fn directory_url(&self) -> String {
        format!("{}{}", self.base_url, selectors::DIRECTORY_PATH)
    }
}

impl Default for Site {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[derive(Debug, Clone)]
pub struct ScraperConfig {
    pub webdriver_url: String,
    pub headless: bool,
    pub site: Site,
    pub timings: Timings,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            webdriver_url: DEFAULT_WEBDRIVER_URL.to_owned(),
            headless: false,
            site: Site::default(),
            timings: Timings::default(),
        }
    }
}

impl ScraperConfig {
    /// Reads `WEBDRIVER_URL`, `WEBDRIVER_HEADLESS` and `REDBUS_BASE_URL`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            webdriver_url: lookup("WEBDRIVER_URL").unwrap_or(defaults.webdriver_url),
            headless: lookup("WEBDRIVER_HEADLESS")
                .map(|value| matches!(value.trim(), "1" | "true" | "yes"))
                .unwrap_or(defaults.headless),
            site: lookup("REDBUS_BASE_URL")
                .map(Site::new)
                .unwrap_or(defaults.site),
            timings: defaults.timings,
        }
    }

    pub fn into_scraper(self) -> RedBusScraper<WebDriverClient> {
        let client = WebDriverClient::new(self.webdriver_url, self.headless);
        RedBusScraper::new(client, self.site, self.timings)
    }
}
