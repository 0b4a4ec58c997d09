//! In-memory stand-ins for a browser, used by the unit tests.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;

use crate::{
    page::{BrowserLauncher, Page},
    selectors::ResultFields,
    webdriver::{ElementRef, Locator, WebDriverError},
};

#[derive(Debug, Clone)]
pub(crate) struct FakeElement {
    text: String,
    displayed: bool,
    enabled: bool,
}

impl FakeElement {
    pub fn new<S: Into<String>>(text: S) -> Self {
        Self {
            text: text.into(),
            displayed: true,
            enabled: true,
        }
    }

    pub fn hidden(mut self) -> Self {
        self.displayed = false;
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}

/// Everything a page was asked to do, shared so it outlives the page.
#[derive(Debug, Clone, Default)]
pub(crate) struct EventLog(Arc<Mutex<Vec<String>>>);

impl EventLog {
    fn push(&self, event: String) {
        self.0.lock().unwrap().push(event);
    }

    pub fn all(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }

    pub fn contains(&self, event: &str) -> bool {
        self.0.lock().unwrap().iter().any(|e| e == event)
    }

    pub fn count(&self, prefix: &str) -> usize {
        self.0
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.starts_with(prefix))
            .count()
    }
}

/// One search result with text for each of its fields.
#[derive(Debug, Clone)]
pub(crate) struct FakeResult {
    fields: Vec<(Locator, String)>,
}

impl FakeResult {
    pub fn sample(bus_name: &str) -> Self {
        let fields = crate::selectors::result_fields();
        Self {
            fields: vec![
                (fields.route_name, "Koyambedu".to_owned()),
                (fields.bus_name, bus_name.to_owned()),
                (fields.bustype, "A/C Sleeper (2+1)".to_owned()),
                (fields.departing_time, "22:30".to_owned()),
                (fields.duration, "06h 15m".to_owned()),
                (fields.reaching_time, "04:45".to_owned()),
                (fields.star_rating, "4.2".to_owned()),
                (fields.price, "INR 899".to_owned()),
                (fields.seats_available, "23 Seats left".to_owned()),
            ],
        }
    }

    pub fn with(mut self, locator: &Locator, text: &str) -> Self {
        self = self.without(locator);
        self.fields.push((locator.clone(), text.to_owned()));
        self
    }

    pub fn without(mut self, locator: &Locator) -> Self {
        self.fields.retain(|(l, _)| l != locator);
        self
    }
}

type Match = (Option<ElementRef>, Locator, ElementRef);

/// A page with a fixed set of elements. Nothing appears or disappears on its
/// own.
#[derive(Debug, Default)]
pub(crate) struct FakePage {
    next_id: usize,
    elements: HashMap<ElementRef, FakeElement>,
    matches: Vec<Match>,
    events: EventLog,
}

impl FakePage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> EventLog {
        self.events.clone()
    }

    fn insert(
        &mut self,
        parent: Option<ElementRef>,
        locator: Locator,
        element: FakeElement,
    ) -> ElementRef {
        self.next_id += 1;
        let id = ElementRef::new(format!("e{}", self.next_id));
        self.elements.insert(id.clone(), element);
        self.matches.push((parent, locator, id.clone()));
        id
    }

    pub fn add(&mut self, locator: Locator, element: FakeElement) -> ElementRef {
        self.insert(None, locator, element)
    }

    pub fn add_in(
        &mut self,
        parent: &ElementRef,
        locator: Locator,
        element: FakeElement,
    ) -> ElementRef {
        self.insert(Some(parent.clone()), locator, element)
    }

    pub fn add_result(&mut self, fields: &ResultFields, result: FakeResult) -> ElementRef {
        let item = self.add(fields.item.clone(), FakeElement::new(""));
        for (locator, text) in result.fields {
            self.add_in(&item, locator, FakeElement::new(text));
        }
        item
    }

    fn lookup(&self, element: &ElementRef) -> Result<&FakeElement, WebDriverError> {
        self.elements
            .get(element)
            .ok_or_else(|| WebDriverError::StaleElement(element.id().to_owned()))
    }

    fn matching(&self, parent: Option<&ElementRef>, locator: &Locator) -> Vec<ElementRef> {
        self.matches
            .iter()
            .filter(|(p, l, _)| p.as_ref() == parent && l == locator)
            .map(|(_, _, id)| id.clone())
            .collect()
    }
}

#[async_trait]
impl Page for FakePage {
    async fn goto(&mut self, url: &str) -> Result<(), WebDriverError> {
        self.events.push(format!("goto {}", url));
        Ok(())
    }

    async fn find_all(
        &mut self,
        locator: &Locator,
    ) -> Result<Vec<ElementRef>, WebDriverError> {
        Ok(self.matching(None, locator))
    }

    async fn find_all_in(
        &mut self,
        parent: &ElementRef,
        locator: &Locator,
    ) -> Result<Vec<ElementRef>, WebDriverError> {
        self.lookup(parent)?;
        Ok(self.matching(Some(parent), locator))
    }

    async fn text(&mut self, element: &ElementRef) -> Result<String, WebDriverError> {
        Ok(self.lookup(element)?.text.clone())
    }

    async fn clear(&mut self, element: &ElementRef) -> Result<(), WebDriverError> {
        self.lookup(element)?;
        self.events.push(format!("clear {}", element.id()));
        Ok(())
    }

    async fn send_keys(
        &mut self,
        element: &ElementRef,
        text: &str,
    ) -> Result<(), WebDriverError> {
        self.lookup(element)?;
        self.events.push(format!("keys {} {}", element.id(), text));
        Ok(())
    }

    async fn click(&mut self, element: &ElementRef) -> Result<(), WebDriverError> {
        self.lookup(element)?;
        self.events.push(format!("click {}", element.id()));
        Ok(())
    }

    async fn is_displayed(&mut self, element: &ElementRef) -> Result<bool, WebDriverError> {
        Ok(self.lookup(element)?.displayed)
    }

    async fn is_enabled(&mut self, element: &ElementRef) -> Result<bool, WebDriverError> {
        Ok(self.lookup(element)?.enabled)
    }

    async fn close(self) -> Result<(), WebDriverError> {
        self.events.push("close".to_owned());
        Ok(())
    }
}

/// Hands out a single prepared page, or fails like an unreachable driver.
#[derive(Debug)]
pub(crate) struct FakeLauncher {
    page: Mutex<Option<FakePage>>,
}

impl FakeLauncher {
    pub fn new(page: FakePage) -> Self {
        Self {
            page: Mutex::new(Some(page)),
        }
    }

    pub fn failing() -> Self {
        Self {
            page: Mutex::new(None),
        }
    }
}

#[async_trait]
impl BrowserLauncher for FakeLauncher {
    type Page = FakePage;

    async fn launch(&self) -> Result<FakePage, WebDriverError> {
        let page = self.page.lock().unwrap().take();
        page.ok_or_else(|| WebDriverError::Protocol {
            error: "session not created".to_owned(),
            message: "no browser available".to_owned(),
        })
    }
}
