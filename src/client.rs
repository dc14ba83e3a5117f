//! Main client implementation for the Amara API

use std::sync::Arc;
use std::sync::OnceLock;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use url::Url;

use crate::{
    config::ClientConfig,
    error::{Error, Result},
    http::{CooldownGuard, RequestBuilder},
    resources::Videos,
    API_FUTURE, DEFAULT_BASE_URL,
};

/// Client for the Amara subtitle-hosting REST API.
///
/// Handles authentication, bounded retries for transient network failures,
/// and the rate-limit cooldown guard. Cloning is cheap and shares one
/// underlying connection pool and guard; independent clients built
/// separately never share guard state.
///
/// # Example
///
/// ```rust,no_run
/// use amara::Client;
///
/// let client = Client::new("api-key");
/// ```
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    /// HTTP client for making requests
    http_client: reqwest::Client,
    /// Base URL for the API
    base_url: Url,
    /// API key for authentication
    api_key: SecretString,
    /// Team identifier for team-scoped requests
    team: Option<String>,
    /// Per-call timeout
    timeout: Duration,
    /// Network retrier configuration
    retry: crate::http::RetryConfig,
    /// Rate-limit cooldown guard, shared across clones
    cooldown: CooldownGuard,

    // Lazy-initialized resources
    videos: OnceLock<Videos>,
}

impl Client {
    /// Create a new client with an API key and all other settings at their
    /// defaults.
    ///
    /// # Panics
    ///
    /// Panics if the default configuration fails to build, which only
    /// happens if the TLS backend cannot initialize. Use
    /// [`Client::builder`] for fallible construction.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::builder()
            .api_key(api_key)
            .build()
            .expect("failed to build client with default configuration")
    }

    /// Create a new client builder for advanced configuration.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    /// Create a client from a configuration object.
    pub fn from_config(config: ClientConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(format!("amara-rs/{}", crate::VERSION))
            .build()
            .map_err(|e| Error::HttpClient(e.to_string()))?;

        let mut base_url_string = config
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        if base_url_string.trim().is_empty() {
            return Err(Error::InvalidUrl("base URL cannot be empty".to_string()));
        }

        // resources join relative paths under the base, so the base path
        // must end with a slash or its last segment gets replaced
        if !base_url_string.ends_with('/') {
            base_url_string.push('/');
        }

        let base_url: Url = base_url_string
            .parse()
            .map_err(|e| Error::InvalidUrl(format!("{e}")))?;

        match base_url.scheme() {
            "http" | "https" => {}
            scheme => {
                return Err(Error::InvalidUrl(format!(
                    "invalid URL scheme '{scheme}': only 'http' and 'https' are supported"
                )))
            }
        }

        #[cfg(feature = "env")]
        let api_key = config.api_key.or_else(|| {
            dotenvy::dotenv().ok();
            std::env::var("AMARA_API_KEY")
                .ok()
                .map(|s| SecretString::new(s.into_boxed_str()))
        });
        #[cfg(not(feature = "env"))]
        let api_key = config.api_key;

        let api_key = api_key.ok_or_else(|| {
            Error::MissingConfig(
                "no API key provided; set AMARA_API_KEY or supply one explicitly".to_string(),
            )
        })?;

        if config.cooldown.min_wait > config.cooldown.max_wait {
            return Err(Error::InvalidRequest(format!(
                "cooldown min_wait ({:?}) exceeds max_wait ({:?})",
                config.cooldown.min_wait, config.cooldown.max_wait
            )));
        }

        let cooldown = CooldownGuard::new(config.cooldown.min_wait, config.cooldown.max_wait);
        if config.cooldown.enabled {
            cooldown.enable();
        }

        let inner = Arc::new(ClientInner {
            http_client,
            base_url,
            api_key,
            team: config.team,
            timeout: config.timeout,
            retry: config.retry,
            cooldown,
            videos: OnceLock::new(),
        });

        Ok(Self { inner })
    }

    /// Access the Videos API endpoint.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// # use amara::Client;
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// # let client = Client::new("api-key");
    /// let video = client.videos().get("abc123").await?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn videos(&self) -> &Videos {
        self.inner
            .videos
            .get_or_init(|| Videos::new(self.clone()))
    }

    /// Enable the rate-limit cooldown guard for this client (and its
    /// clones). Resets any pending cooldown.
    pub fn enable_cooldown(&self) {
        self.inner.cooldown.enable();
    }

    /// Disable the rate-limit cooldown guard. A disabled guard never blocks
    /// a request.
    pub fn disable_cooldown(&self) {
        self.inner.cooldown.disable();
    }

    /// The configured team identifier, if any.
    pub fn team(&self) -> Option<&str> {
        self.inner.team.as_deref()
    }

    /// The base URL requests are issued against.
    pub(crate) fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Execute one logical request and return the raw response body.
    ///
    /// The pipeline, in order: consult the cooldown guard (fail fast with
    /// [`Error::RateLimited`], no I/O, while a window is active), inject
    /// auth headers, send with the network retrier underneath, then classify
    /// the response. Success resets the guard; a 429 with the guard enabled
    /// arms it before the status error surfaces.
    pub(crate) async fn execute(
        &self,
        method: http::Method,
        path: &str,
        body: Option<Vec<u8>>,
    ) -> Result<Vec<u8>> {
        self.inner.cooldown.check_allowed()?;

        tracing::debug!(%method, path, "dispatching request");

        let mut builder = self.request(method, path)?;
        if let Some(body) = body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;

        if !response.is_error() {
            self.inner.cooldown.on_success();
            return Ok(response.into_body());
        }

        let status = response.status().as_u16();
        if status == http::StatusCode::TOO_MANY_REQUESTS.as_u16() && self.inner.cooldown.is_enabled()
        {
            // a malformed Retry-After surfaces instead of the status error
            self.inner.cooldown.on_too_many_requests(response.headers())?;
        }

        Err(Error::Api {
            status,
            body: response.text(),
        })
    }

    /// Create a request builder with auth headers applied.
    fn request(&self, method: http::Method, path: &str) -> Result<RequestBuilder> {
        let url = self
            .inner
            .base_url
            .join(path)
            .map_err(|e| Error::InvalidUrl(format!("failed to construct URL for '{path}': {e}")))?;

        RequestBuilder::new(method, url)
            .with_client(self.inner.http_client.clone())
            .timeout(self.inner.timeout)
            .retry_config(self.inner.retry.clone())
            .header("X-api-key", self.inner.api_key.expose_secret())?
            .header("X-API-FUTURE", API_FUTURE)?
            .header("Content-Type", "application/x-www-form-urlencoded")
    }
}

/// Builder for creating a configured [`Client`].
#[derive(Default)]
pub struct ClientBuilder {
    config: ClientConfig,
}

impl ClientBuilder {
    /// Set the API key for authentication.
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.config.api_key = Some(SecretString::new(api_key.into().into_boxed_str()));
        self
    }

    /// Set the team identifier.
    pub fn team(mut self, team: impl Into<String>) -> Self {
        self.config.team = Some(team.into());
        self
    }

    /// Set the base URL for the API.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.base_url = Some(base_url.into());
        self
    }

    /// Set the per-call timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the network retrier's attempt budget.
    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.config.retry.max_retries = max_retries;
        self
    }

    /// Enable or disable the rate-limit cooldown guard.
    pub fn rate_limit_guard(mut self, enabled: bool) -> Self {
        self.config.cooldown.enabled = enabled;
        self
    }

    /// Set the cooldown wait clamp bounds.
    pub fn cooldown_bounds(mut self, min_wait: Duration, max_wait: Duration) -> Self {
        self.config.cooldown.min_wait = min_wait;
        self.config.cooldown.max_wait = max_wait;
        self
    }

    /// Build the client with the configured options.
    pub fn build(self) -> Result<Client> {
        Client::from_config(self.config)
    }
}
