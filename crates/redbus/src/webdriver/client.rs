use async_trait::async_trait;
use log::{debug, info};
use serde_json::{json, Value};

use super::{session::parse_response, Session, WebDriverError};
use crate::page::BrowserLauncher;

pub const DEFAULT_WEBDRIVER_URL: &str = "http://localhost:9515";

/// Talks to a running WebDriver server and opens browser sessions on it.
#[derive(Debug, Clone)]
pub struct WebDriverClient {
    http: reqwest::Client,
    url: String,
    headless: bool,
}

impl WebDriverClient {
    pub fn new<S: Into<String>>(url: S, headless: bool) -> Self {
        let url: String = url.into();
        Self {
            http: reqwest::Client::new(),
            url: url.trim_end_matches('/').to_owned(),
            headless,
        }
    }

    fn capabilities(&self) -> Value {
        let mut args = vec!["--window-size=1920,1080"];
        if self.headless {
            args.push("--headless=new");
        }
        json!({
            "capabilities": {
                "alwaysMatch": {
                    "browserName": "chrome",
                    "goog:chromeOptions": { "args": args }
                }
            }
        })
    }

    /// Starts a fresh browser. The caller owns the returned session and has to
    /// [`Session::close`] it.
    pub async fn new_session(&self) -> Result<Session, WebDriverError> {
        let url = format!("{}/session", self.url);
        debug!("POST {}", url);
        let response = self
            .http
            .post(&url)
            .json(&self.capabilities())
            .send()
            .await?;
        let value = parse_response(response).await?;

        let session_id = value
            .get("sessionId")
            .and_then(Value::as_str)
            .ok_or_else(|| {
                WebDriverError::InvalidResponse(format!(
                    "missing session id in {}",
                    value
                ))
            })?;
        info!("started browser session {}", session_id);

        Ok(Session::new(self.http.clone(), &self.url, session_id))
    }
}

#[async_trait]
impl BrowserLauncher for WebDriverClient {
    type Page = Session;

    async fn launch(&self) -> Result<Session, WebDriverError> {
        self.new_session().await
    }
}
