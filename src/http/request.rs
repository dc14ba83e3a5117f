//! HTTP request builder
//!
//! One logical request per builder. `send()` performs the network call with
//! bounded exponential-backoff retries for transient transport failures;
//! response status classification happens a layer up, in the client.

use http::{HeaderMap, HeaderName, HeaderValue, Method};
use std::time::Duration;
use url::Url;

use super::retry::{calculate_retry_delay, RetryConfig};
use super::Response;
use crate::error::{Error, Result};

/// Builder for a single HTTP request.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    method: Method,
    url: Url,
    headers: HeaderMap,
    body: Option<Vec<u8>>,
    timeout: Duration,
    retry_config: RetryConfig,
    http_client: Option<reqwest::Client>,
}

impl RequestBuilder {
    /// Create a new request builder with the default 15 second timeout.
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            headers: HeaderMap::new(),
            body: None,
            timeout: Duration::from_secs(15),
            retry_config: RetryConfig::default(),
            http_client: None,
        }
    }

    /// Set the HTTP client to use.
    pub(crate) fn with_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Set a header. Invalid names or values are rejected.
    pub fn header(mut self, key: &str, value: &str) -> Result<Self> {
        let key = key
            .parse::<HeaderName>()
            .map_err(|e| Error::HttpClient(format!("invalid header name '{key}': {e}")))?;
        let value = value
            .parse::<HeaderValue>()
            .map_err(|e| Error::HttpClient(format!("invalid header value: {e}")))?;
        self.headers.insert(key, value);
        Ok(self)
    }

    /// Set custom retry configuration for the network retrier.
    pub fn retry_config(mut self, config: RetryConfig) -> Self {
        self.retry_config = config;
        self
    }

    /// Set the request body.
    pub fn body(mut self, body: Vec<u8>) -> Self {
        self.body = Some(body);
        self
    }

    /// Set the per-call timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Send the request and read the full response body.
    ///
    /// Transient network failures (connection refused, timeout, DNS) are
    /// retried with exponential backoff, bounded by the retry config's
    /// attempt budget, before surfacing. HTTP status errors are not
    /// classified here; any response, success or not, comes back as a
    /// [`Response`].
    pub async fn send(self) -> Result<Response> {
        let client = self
            .http_client
            .ok_or_else(|| Error::HttpClient("no HTTP client configured".to_string()))?;

        let mut req = client
            .request(self.method.clone(), self.url.as_str())
            .timeout(self.timeout);

        for (key, value) in &self.headers {
            req = req.header(key, value);
        }

        if let Some(body) = self.body {
            req = req.body(body);
        }

        let mut attempt = 0;
        loop {
            let cloned = req
                .try_clone()
                .ok_or_else(|| Error::HttpClient("could not clone request for retry".to_string()))?;

            match cloned.send().await {
                Ok(resp) => {
                    let status = resp.status();
                    let headers = resp.headers().clone();
                    let body = resp
                        .bytes()
                        .await
                        .map_err(|e| Error::Connection(e.to_string()))?
                        .to_vec();

                    return Ok(Response::new(status, headers, body));
                }
                Err(e) => {
                    let error = if e.is_timeout() {
                        Error::Timeout(self.timeout)
                    } else {
                        Error::Connection(e.to_string())
                    };

                    match calculate_retry_delay(&error, attempt, &self.retry_config) {
                        Some(delay) => {
                            tracing::debug!(
                                attempt,
                                delay_ms = delay.as_millis() as u64,
                                "network failure, retrying"
                            );
                            tokio::time::sleep(delay).await;
                            attempt += 1;
                        }
                        None => return Err(error),
                    }
                }
            }
        }
    }

    /// Get the method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Get the URL.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Get the headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }
}
