//! Every identifier of the booking site's markup. When the site changes its
//! markup, this is the module to update.

use crate::webdriver::Locator;

pub const DIRECTORY_PATH: &str = "/online-booking/rtc-directory";

/// Label of the regional operator picked from the directory.
pub const GOVERNMENT_REGION: &str = "TNSTC";

/// The inputs and buttons of a route search.
#[derive(Debug, Clone)]
pub struct SearchForm {
    pub source: Locator,
    pub destination: Locator,
    pub date_picker: Locator,
    pub search_button: Locator,
}

pub fn private_search_form() -> SearchForm {
    SearchForm {
        source: Locator::id("src"),
        destination: Locator::id("dest"),
        date_picker: Locator::id("onwardCal"),
        search_button: Locator::id("search_btn"),
    }
}

pub fn government_search_form() -> SearchForm {
    SearchForm {
        source: Locator::id("txtSource"),
        destination: Locator::id("txtDestination"),
        date_picker: Locator::id("txtOnwardCalendar"),
        search_button: Locator::id("D120_search_btn_v2"),
    }
}

/// Links of all regional operators on the directory page.
pub fn region_links() -> Locator {
    Locator::xpath("//div[contains(@class, 'D113_ul_rtc')]//a")
}

/// Calendar cell showing `day`. Only the day of month is matched, so with
/// several months on display the first one wins.
pub fn calendar_day(day: &str) -> Locator {
    Locator::xpath(format!(
        "//td[contains(@class, 'day') and text()='{}']",
        day
    ))
}

/// A search result and where its fields are found inside it.
#[derive(Debug, Clone)]
pub struct ResultFields {
    pub item: Locator,
    pub route_name: Locator,
    pub bus_name: Locator,
    pub bustype: Locator,
    pub departing_time: Locator,
    pub duration: Locator,
    pub reaching_time: Locator,
    pub star_rating: Locator,
    pub price: Locator,
    pub seats_available: Locator,
}

pub fn result_fields() -> ResultFields {
    ResultFields {
        item: Locator::class_name("bus-item"),
        route_name: Locator::class_name("dp-loc"),
        bus_name: Locator::class_name("travels"),
        bustype: Locator::class_name("bus-type"),
        departing_time: Locator::class_name("dp-time"),
        duration: Locator::class_name("dur"),
        reaching_time: Locator::class_name("bp-time"),
        star_rating: Locator::class_name("rating-sec"),
        price: Locator::class_name("fare"),
        seats_available: Locator::class_name("seat-left"),
    }
}
