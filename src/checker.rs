//! End-to-end checker: fetch a page, extract its rows, verify their classes.

use crate::client::{ClientConfig, HttpClient, HttpTestClient, Response};
use crate::extract;
use crate::row::RenderedOutput;
use crate::verify::{RowClassVerifier, VerificationResult};
use crate::{Error, Result};

/// Ties the HTTP client, extraction, and verifier together.
///
/// ```no_run
/// use rowcheck::{Checker, ClientConfig};
///
/// # fn main() -> rowcheck::Result<()> {
/// let checker = Checker::new(ClientConfig::default())?;
/// let result = checker.check_url("http://127.0.0.1:8080/latest", ".view-content > div")?;
/// assert!(result.passed());
/// # Ok(())
/// # }
/// ```
pub struct Checker {
    client: Box<dyn HttpTestClient>,
    verifier: RowClassVerifier,
}

impl Checker {
    /// Build a checker backed by the blocking HTTP client.
    pub fn new(config: ClientConfig) -> Result<Self> {
        Ok(Self {
            client: Box::new(HttpClient::new(config)?),
            verifier: RowClassVerifier::new(),
        })
    }

    /// Build a checker over a caller-supplied client (e.g. a canned-response
    /// fake in tests).
    pub fn with_client(client: Box<dyn HttpTestClient>) -> Self {
        Self {
            client,
            verifier: RowClassVerifier::new(),
        }
    }

    /// Replace the default `views-row` verifier.
    pub fn with_verifier(mut self, verifier: RowClassVerifier) -> Self {
        self.verifier = verifier;
        self
    }

    /// Fetch a page, failing on non-2xx responses.
    pub fn fetch(&self, url: &str) -> Result<Response> {
        let resp = self.client.get(url)?;
        if !resp.is_success() {
            return Err(Error::FetchError(format!(
                "{} returned status {}",
                url, resp.status
            )));
        }
        Ok(resp)
    }

    /// Extract and verify rows from already-fetched HTML.
    pub fn check_html(&self, html: &str, row_selector: &str) -> Result<VerificationResult> {
        let output = extract::extract_rows(html, row_selector)?;
        Ok(self.verify(&output))
    }

    /// Fetch `url` and extract the rows matched by `row_selector`.
    ///
    /// The returned output records the final URL it was fetched from.
    pub fn fetch_rows(&self, url: &str, row_selector: &str) -> Result<RenderedOutput> {
        let resp = self.fetch(url)?;
        let output = extract::extract_rows(&resp.body, row_selector)?;
        Ok(output.fetched_from(resp.url))
    }

    /// Fetch `url` and verify the rows matched by `row_selector`.
    pub fn check_url(&self, url: &str, row_selector: &str) -> Result<VerificationResult> {
        let output = self.fetch_rows(url, row_selector)?;
        let result = self.verify(&output);
        log::debug!(
            "{}: {} rows, {}",
            output.url().unwrap_or(url),
            result.len(),
            if result.passed() { "pass" } else { "fail" }
        );
        Ok(result)
    }

    /// Access to the underlying client, for form round-trips.
    pub fn client(&self) -> &dyn HttpTestClient {
        self.client.as_ref()
    }

    fn verify(&self, output: &RenderedOutput) -> VerificationResult {
        let result = self.verifier.verify(output);
        for (index, outcome) in result.failures() {
            log::warn!(
                "row {}: expected class `{}` ({} check)",
                index,
                outcome.expected,
                outcome.check.name()
            );
        }
        result
    }
}
