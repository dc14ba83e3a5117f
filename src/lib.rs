//! # Amara Rust client
//!
//! An async Rust client for the Amara subtitle-hosting REST API.
//!
//! The client handles authentication headers, bounded retries for transient
//! network failures, and a rate-limit cooldown guard that reacts to HTTP 429
//! responses: it computes a wait window from the `Retry-After` header (or an
//! exponential fallback) and fail-fast-rejects further requests until the
//! window elapses.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use amara::Client;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Client::builder()
//!         .api_key("your-api-key")
//!         .team("my-team")
//!         .rate_limit_guard(true)
//!         .build()?;
//!
//!     let video = client.videos().get("fHmLsXfhJs2E").await?;
//!     println!("{}", video.title);
//!
//!     let subs = client.videos().subtitles("fHmLsXfhJs2E", "en").await?;
//!     println!("{}", subs.subtitles);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

// Re-export commonly used types
pub use client::{Client, ClientBuilder};
pub use config::{ClientConfig, CooldownConfig};
pub use error::{Error, Result};

// Module declarations
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod resources;
pub mod types;

// Re-export key dependencies for convenience
pub use serde::{Deserialize, Serialize};
pub use serde_json::Value as JsonValue;

/// Prelude module for common imports
///
/// # Examples
///
/// ```rust
/// use amara::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        types::{Subtitles, Video},
        Client, ClientConfig, Error, Result,
    };
}

/// Crate version, automatically updated from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default API base URL
pub const DEFAULT_BASE_URL: &str = "https://amara.org/api";

/// Fixed `X-API-FUTURE` compatibility marker sent with every request
pub const API_FUTURE: &str = "20190619";
