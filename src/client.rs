//! HTTP test client used to reach the renderer under test.
//!
//! The renderer is driven through plain HTTP: `get` fetches a rendered page,
//! `post_form` submits a configuration form the way a browser would
//! (urlencoded body). Tests can substitute their own [`HttpTestClient`]
//! implementation to avoid the network entirely.

use std::collections::HashMap;
use std::time::Duration;

use reqwest::blocking::Client;

use crate::{Error, Result};

/// Configuration for the HTTP client.
///
/// The defaults are conservative: a short identifying user agent and a
/// 30 second request timeout.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// User agent string to send with requests
    pub user_agent: String,
    /// Request timeout in milliseconds
    pub timeout_ms: u64,
    /// Custom HTTP headers added to every request
    pub headers: HashMap<String, String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            user_agent: "rowcheck/0.1".to_string(),
            timeout_ms: 30000,
            headers: HashMap::new(),
        }
    }
}

/// A fetched page.
#[derive(Debug, Clone)]
pub struct Response {
    /// HTTP status code
    pub status: u16,
    /// Final URL after redirects
    pub url: String,
    /// Response body as text
    pub body: String,
}

impl Response {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Resolve a possibly-relative link against this response's URL.
    pub fn join(&self, href: &str) -> Result<String> {
        let base = url::Url::parse(&self.url)
            .map_err(|e| Error::Other(format!("Invalid base URL {}: {}", self.url, e)))?;
        let joined = base
            .join(href)
            .map_err(|e| Error::Other(format!("Cannot resolve `{}`: {}", href, e)))?;
        Ok(joined.to_string())
    }
}

/// Interface to the page-serving collaborator.
pub trait HttpTestClient {
    /// Fetch a page.
    fn get(&self, url: &str) -> Result<Response>;

    /// Submit a form with urlencoded fields.
    fn post_form(&self, url: &str, fields: &[(&str, &str)]) -> Result<Response>;
}

/// Blocking `reqwest`-backed client.
pub struct HttpClient {
    client: Client,
    config: ClientConfig,
}

impl HttpClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| Error::InitializationError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    fn finish(resp: reqwest::blocking::Response) -> Result<Response> {
        let status = resp.status().as_u16();
        let url = resp.url().to_string();
        let body = resp
            .text()
            .map_err(|e| Error::FetchError(format!("Failed to read response body: {}", e)))?;
        Ok(Response { status, url, body })
    }

    fn apply_headers(
        &self,
        mut req: reqwest::blocking::RequestBuilder,
    ) -> reqwest::blocking::RequestBuilder {
        req = req.header("User-Agent", self.config.user_agent.clone());
        for (name, value) in &self.config.headers {
            req = req.header(name, value);
        }
        req
    }
}

impl HttpTestClient for HttpClient {
    fn get(&self, url: &str) -> Result<Response> {
        log::debug!("GET {}", url);
        let req = self.apply_headers(self.client.get(url));
        let resp = req
            .send()
            .map_err(|e| Error::FetchError(format!("HTTP GET {} failed: {}", url, e)))?;
        Self::finish(resp)
    }

    fn post_form(&self, url: &str, fields: &[(&str, &str)]) -> Result<Response> {
        log::debug!("POST {} ({} fields)", url, fields.len());
        let req = self.apply_headers(self.client.post(url)).form(fields);
        let resp = req
            .send()
            .map_err(|e| Error::FetchError(format!("HTTP POST {} failed: {}", url, e)))?;
        Self::finish(resp)
    }
}
