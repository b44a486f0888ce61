//! HTTP request plumbing shared by the session manager and resource clients

use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client, Method, RequestBuilder};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{json, Value};
use url::Url;

use crate::error::Error;

/// Helper for building and executing HTTP requests
pub struct FetchBuilder<'a> {
    client: &'a Client,
    url: String,
    method: Method,
    headers: HeaderMap,
    body: Option<Vec<u8>>,
}

impl<'a> FetchBuilder<'a> {
    /// Create a new FetchBuilder
    pub fn new(client: &'a Client, url: &str, method: Method) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert("Content-Type", HeaderValue::from_static("application/json"));

        Self {
            client,
            url: url.to_string(),
            method,
            headers,
            body: None,
        }
    }

    /// Add a header to the request
    pub fn header(mut self, name: &'static str, value: &str) -> Self {
        if let Ok(value) = HeaderValue::from_str(value) {
            self.headers.insert(name, value);
        }
        self
    }

    /// Add bearer token authentication to the request
    pub fn bearer_auth(self, token: &str) -> Self {
        self.header("Authorization", &format!("Bearer {}", token))
    }

    /// Add a JSON body to the request
    pub fn json<T: Serialize>(mut self, body: &T) -> Result<Self, Error> {
        let json = serde_json::to_vec(body)?;
        self.body = Some(json);
        Ok(self)
    }

    fn build(&self) -> Result<RequestBuilder, Error> {
        let url = Url::parse(&self.url)?;

        let mut req = self.client.request(self.method.clone(), url.as_str());
        req = req.headers(self.headers.clone());

        if let Some(body) = &self.body {
            req = req.body(body.clone());
        }

        Ok(req)
    }

    /// Execute the request and parse the 2xx response as JSON.
    ///
    /// A non-2xx response has its body parsed as JSON (an unparseable body
    /// degrades to `{"error": "Network error"}`) and handed to `classify`,
    /// which produces the single classified error the caller surfaces.
    pub async fn execute<T, F>(self, classify: F) -> Result<T, Error>
    where
        T: DeserializeOwned,
        F: FnOnce(u16, &Value) -> Error,
    {
        let req = self.build()?;
        let response = req.send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .json::<Value>()
                .await
                .unwrap_or_else(|_| json!({"error": "Network error"}));
            return Err(classify(status.as_u16(), &body));
        }

        let text = response.text().await?;
        let result = serde_json::from_str::<T>(&text)?;
        Ok(result)
    }

    /// Execute the request and return the raw response
    pub async fn execute_raw(self) -> Result<reqwest::Response, Error> {
        let req = self.build()?;
        let response = req.send().await?;
        Ok(response)
    }
}

/// Helper for creating HTTP requests
pub struct Fetch;

impl Fetch {
    /// Create a GET request
    pub fn get<'a>(client: &'a Client, url: &str) -> FetchBuilder<'a> {
        FetchBuilder::new(client, url, Method::GET)
    }

    /// Create a POST request
    pub fn post<'a>(client: &'a Client, url: &str) -> FetchBuilder<'a> {
        FetchBuilder::new(client, url, Method::POST)
    }

    /// Create a PUT request
    pub fn put<'a>(client: &'a Client, url: &str) -> FetchBuilder<'a> {
        FetchBuilder::new(client, url, Method::PUT)
    }

    /// Create a DELETE request
    pub fn delete<'a>(client: &'a Client, url: &str) -> FetchBuilder<'a> {
        FetchBuilder::new(client, url, Method::DELETE)
    }
}
