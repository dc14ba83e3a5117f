//! Configuration for the Amara client

use std::time::Duration;

use secrecy::SecretString;

use crate::http::cooldown::{DEFAULT_MAX_WAIT, DEFAULT_MIN_WAIT};
use crate::http::RetryConfig;

/// Configuration for the Amara client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API key for authentication
    pub api_key: Option<SecretString>,

    /// Team identifier, attached to team-scoped requests
    pub team: Option<String>,

    /// Base URL for the API
    pub base_url: Option<String>,

    /// Per-call timeout for requests
    pub timeout: Duration,

    /// Network retrier configuration (transient transport failures only)
    pub retry: RetryConfig,

    /// Rate-limit cooldown guard configuration
    pub cooldown: CooldownConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            team: None,
            base_url: None,
            timeout: Duration::from_secs(15),
            retry: RetryConfig::default(),
            cooldown: CooldownConfig::default(),
        }
    }
}

impl ClientConfig {
    /// Create a new configuration with an API key.
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(SecretString::new(api_key.into().into_boxed_str())),
            ..Default::default()
        }
    }

    /// Load configuration from environment variables.
    ///
    /// This will look for:
    /// - `AMARA_API_KEY` for authentication
    /// - `AMARA_TEAM` for the team identifier
    /// - `AMARA_BASE_URL` for the API base URL
    /// - `AMARA_TIMEOUT` for the per-call timeout (in seconds)
    /// - `AMARA_MAX_RETRIES` for the network retrier's attempt budget
    ///
    /// # Errors
    ///
    /// Returns an error if `AMARA_TIMEOUT` or `AMARA_MAX_RETRIES` are set
    /// but do not parse as numbers.
    #[cfg(feature = "env")]
    pub fn from_env() -> Result<Self, crate::error::Error> {
        use std::env;

        // pick up a .env file when one is present; absence is fine
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(api_key) = env::var("AMARA_API_KEY") {
            config.api_key = Some(SecretString::new(api_key.into_boxed_str()));
        }

        if let Ok(team) = env::var("AMARA_TEAM") {
            config.team = Some(team);
        }

        if let Ok(base_url) = env::var("AMARA_BASE_URL") {
            config.base_url = Some(base_url);
        }

        if let Ok(timeout_str) = env::var("AMARA_TIMEOUT") {
            let timeout_secs = timeout_str.parse::<u64>().map_err(|_| {
                crate::error::Error::InvalidRequest(format!(
                    "AMARA_TIMEOUT must be a valid number of seconds, got: '{timeout_str}'"
                ))
            })?;
            config.timeout = Duration::from_secs(timeout_secs);
        }

        if let Ok(max_retries_str) = env::var("AMARA_MAX_RETRIES") {
            let max_retries = max_retries_str.parse::<u32>().map_err(|_| {
                crate::error::Error::InvalidRequest(format!(
                    "AMARA_MAX_RETRIES must be a valid number, got: '{max_retries_str}'"
                ))
            })?;
            config.retry.max_retries = max_retries;
        }

        Ok(config)
    }
}

/// Configuration for the rate-limit cooldown guard.
///
/// The guard reacts to 429 responses: it computes a wait window from the
/// `Retry-After` header (or `min_wait * 2^n` when absent, clamped to
/// `max_wait`) and rejects further requests until the window elapses.
#[derive(Debug, Clone)]
pub struct CooldownConfig {
    /// Whether the guard gates requests at all. Disabled by default; a
    /// disabled guard always answers "allowed".
    pub enabled: bool,

    /// Lower clamp for computed waits. Default: 5 seconds.
    pub min_wait: Duration,

    /// Upper clamp for computed waits. Default: 20 minutes.
    pub max_wait: Duration,
}

impl Default for CooldownConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            min_wait: DEFAULT_MIN_WAIT,
            max_wait: DEFAULT_MAX_WAIT,
        }
    }
}
