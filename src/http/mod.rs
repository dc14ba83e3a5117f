//! HTTP layer: request building, response handling, retry, and the
//! rate-limit cooldown guard.

pub use cooldown::CooldownGuard;
pub use request::RequestBuilder;
pub use response::Response;
pub use retry::RetryConfig;

pub mod cooldown;
mod request;
mod response;
pub mod retry;

// Re-export HTTP types from the http crate for convenience
pub use http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode};
