use async_trait::async_trait;
use log::{debug, info};
use reqwest::Method;
use serde_json::{json, Value};

use super::{ElementRef, Locator, WebDriverError};
use crate::page::Page;

/// One browser window controlled through WebDriver.
#[derive(Debug)]
pub struct Session {
    http: reqwest::Client,
    base_url: String,
    id: String,
}

pub(crate) async fn parse_response(
    response: reqwest::Response,
) -> Result<Value, WebDriverError> {
    let status = response.status();
    let body: Value = response.json().await?;
    let value = body.get("value").cloned().unwrap_or(Value::Null);

    if status.is_success() {
        Ok(value)
    } else {
        Err(WebDriverError::from_value(&value))
    }
}

impl Session {
    pub(crate) fn new(http: reqwest::Client, driver_url: &str, id: &str) -> Self {
        Self {
            http,
            base_url: format!("{}/session/{}", driver_url, id),
            id: id.to_owned(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    async fn command(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<Value, WebDriverError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("{} {}", method, url);

        let mut request = self.http.request(method, &url);
        if let Some(body) = body {
            request = request.json(&body);
        }
        parse_response(request.send().await?).await
    }

    async fn post(&self, path: &str, body: Value) -> Result<Value, WebDriverError> {
        self.command(Method::POST, path, Some(body)).await
    }

    async fn get(&self, path: &str) -> Result<Value, WebDriverError> {
        self.command(Method::GET, path, None).await
    }

    fn element(value: &Value) -> Result<ElementRef, WebDriverError> {
        ElementRef::from_json(value).ok_or_else(|| {
            WebDriverError::InvalidResponse(format!("not an element: {}", value))
        })
    }

    fn elements(value: &Value) -> Result<Vec<ElementRef>, WebDriverError> {
        value
            .as_array()
            .ok_or_else(|| {
                WebDriverError::InvalidResponse(format!(
                    "not an element list: {}",
                    value
                ))
            })?
            .iter()
            .map(Self::element)
            .collect()
    }

    fn boolean(value: &Value) -> Result<bool, WebDriverError> {
        value.as_bool().ok_or_else(|| {
            WebDriverError::InvalidResponse(format!("not a boolean: {}", value))
        })
    }
}

#[async_trait]
impl Page for Session {
    async fn goto(&mut self, url: &str) -> Result<(), WebDriverError> {
        self.post("/url", json!({ "url": url })).await?;
        Ok(())
    }

    async fn find(&mut self, locator: &Locator) -> Result<ElementRef, WebDriverError> {
        let value = self.post("/element", locator.to_json()).await?;
        Self::element(&value)
    }

    async fn find_all(
        &mut self,
        locator: &Locator,
    ) -> Result<Vec<ElementRef>, WebDriverError> {
        let value = self.post("/elements", locator.to_json()).await?;
        Self::elements(&value)
    }

    async fn find_in(
        &mut self,
        parent: &ElementRef,
        locator: &Locator,
    ) -> Result<ElementRef, WebDriverError> {
        let path = format!("/element/{}/element", parent.id());
        let value = self.post(&path, locator.to_json()).await?;
        Self::element(&value)
    }

    async fn find_all_in(
        &mut self,
        parent: &ElementRef,
        locator: &Locator,
    ) -> Result<Vec<ElementRef>, WebDriverError> {
        let path = format!("/element/{}/elements", parent.id());
        let value = self.post(&path, locator.to_json()).await?;
        Self::elements(&value)
    }

    async fn text(&mut self, element: &ElementRef) -> Result<String, WebDriverError> {
        let value = self.get(&format!("/element/{}/text", element.id())).await?;
        value.as_str().map(str::to_owned).ok_or_else(|| {
            WebDriverError::InvalidResponse(format!("not a text: {}", value))
        })
    }

    async fn clear(&mut self, element: &ElementRef) -> Result<(), WebDriverError> {
        self.post(&format!("/element/{}/clear", element.id()), json!({}))
            .await?;
        Ok(())
    }

    async fn send_keys(
        &mut self,
        element: &ElementRef,
        text: &str,
    ) -> Result<(), WebDriverError> {
        self.post(
            &format!("/element/{}/value", element.id()),
            json!({ "text": text }),
        )
        .await?;
        Ok(())
    }

    async fn click(&mut self, element: &ElementRef) -> Result<(), WebDriverError> {
        self.post(&format!("/element/{}/click", element.id()), json!({}))
            .await?;
        Ok(())
    }

    async fn is_displayed(&mut self, element: &ElementRef) -> Result<bool, WebDriverError> {
        let value = self
            .get(&format!("/element/{}/displayed", element.id()))
            .await?;
        Self::boolean(&value)
    }

    async fn is_enabled(&mut self, element: &ElementRef) -> Result<bool, WebDriverError> {
        let value = self
            .get(&format!("/element/{}/enabled", element.id()))
            .await?;
        Self::boolean(&value)
    }

    async fn close(self) -> Result<(), WebDriverError> {
        self.command(Method::DELETE, "", None).await?;
        info!("closed browser session {}", self.id);
        Ok(())
    }
}
