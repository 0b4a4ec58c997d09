use std::fmt;

use serde_json::{json, Value};

/// How an element is looked up.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Locator {
    Id(String),
    ClassName(String),
    XPath(String),
}

impl Locator {
    pub fn id<S: Into<String>>(id: S) -> Self {
        Self::Id(id.into())
    }

    pub fn class_name<S: Into<String>>(class_name: S) -> Self {
        Self::ClassName(class_name.into())
    }

    pub fn xpath<S: Into<String>>(xpath: S) -> Self {
        Self::XPath(xpath.into())
    }

    /// W3C only knows css, xpath, link text and tag name strategies, so ids
    /// and class names are expressed as css selectors.
    pub(crate) fn to_json(&self) -> Value {
        let (using, value) = match self {
            Self::Id(id) => ("css selector", format!("[id=\"{}\"]", id)),
            Self::ClassName(class_name) => ("css selector", format!(".{}", class_name)),
            Self::XPath(xpath) => ("xpath", xpath.clone()),
        };
        json!({ "using": using, "value": value })
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "id `{}`", id),
            Self::ClassName(class_name) => write!(f, "class `{}`", class_name),
            Self::XPath(xpath) => write!(f, "xpath `{}`", xpath),
        }
    }
}

/// Opaque reference to an element of the current page.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ElementRef(pub(crate) String);

impl ElementRef {
    /// Key under which W3C drivers return element references.
    pub(crate) const W3C_KEY: &'static str = "element-6066-11e4-a52e-4f735466cecf";

    pub fn new<S: Into<String>>(id: S) -> Self {
        Self(id.into())
    }

    pub fn id(&self) -> &str {
        &self.0
    }

    pub(crate) fn from_json(value: &Value) -> Option<Self> {
        value
            .get(Self::W3C_KEY)
            .and_then(Value::as_str)
            .map(Self::new)
    }
}

/// Special keys from the WebDriver key table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
}

impl Key {
    pub fn code_point(&self) -> char {
        match self {
            Key::Enter => '\u{E007}',
        }
    }

    pub fn as_text(&self) -> String {
        self.code_point().to_string()
    }
}
