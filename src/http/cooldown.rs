//! Rate-limit cooldown guard
//!
//! Reacts to HTTP 429 responses by computing a wait window — from the
//! `Retry-After` header when present, otherwise an exponential fallback —
//! and fail-fast-rejects further requests until the window elapses. There
//! is no background timer: expiry is checked lazily on each
//! [`CooldownGuard::check_allowed`] call against a stored deadline.

use std::sync::Mutex;
use std::time::{Duration, Instant};

use http::HeaderMap;

use crate::error::{Error, Result};

/// Default minimum cooldown wait.
pub const DEFAULT_MIN_WAIT: Duration = Duration::from_secs(5);

/// Default maximum cooldown wait (20 minutes).
pub const DEFAULT_MAX_WAIT: Duration = Duration::from_secs(20 * 60);

#[derive(Debug)]
struct CooldownState {
    enabled: bool,
    triggered: bool,
    /// Consecutive 429s since the last successful response; exponent for
    /// the fallback wait.
    counter: u32,
    min_wait: Duration,
    max_wait: Duration,
    resume_at: Option<Instant>,
}

/// Gate consulted before every outbound request.
///
/// All state lives behind one mutex: concurrent 429 outcomes may race on the
/// deadline (last writer wins) but must never lose a counter increment,
/// which would under-escalate the fallback backoff.
#[derive(Debug)]
pub struct CooldownGuard {
    inner: Mutex<CooldownState>,
}

impl Default for CooldownGuard {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_WAIT, DEFAULT_MAX_WAIT)
    }
}

impl CooldownGuard {
    /// Create a disabled guard with the given wait bounds.
    ///
    /// A `max_wait` below `min_wait` is raised to `min_wait`, so the clamp
    /// bounds are always ordered.
    pub fn new(min_wait: Duration, max_wait: Duration) -> Self {
        Self {
            inner: Mutex::new(CooldownState {
                enabled: false,
                triggered: false,
                counter: 0,
                min_wait,
                max_wait: max_wait.max(min_wait),
                resume_at: None,
            }),
        }
    }

    /// Enable the guard, resetting any pending cooldown.
    pub fn enable(&self) {
        let mut state = self.lock();
        state.enabled = true;
        state.triggered = false;
        state.counter = 0;
        state.resume_at = None;
    }

    /// Disable the guard. A disabled guard always answers "allowed".
    pub fn disable(&self) {
        let mut state = self.lock();
        state.enabled = false;
        state.triggered = false;
        state.counter = 0;
        state.resume_at = None;
    }

    /// Whether the guard is currently enabled.
    pub fn is_enabled(&self) -> bool {
        self.lock().enabled
    }

    /// Check whether a request may be attempted right now.
    ///
    /// Returns `Err(Error::RateLimited)` while a cooldown window is active.
    /// An expired window self-transitions back to idle here, so no separate
    /// timer is needed to clear the flag.
    pub fn check_allowed(&self) -> Result<()> {
        let mut state = self.lock();
        if !state.enabled || !state.triggered {
            return Ok(());
        }
        match state.resume_at {
            Some(resume_at) => {
                let now = Instant::now();
                if now < resume_at {
                    Err(Error::RateLimited {
                        resume_in: resume_at - now,
                    })
                } else {
                    state.triggered = false;
                    state.resume_at = None;
                    Ok(())
                }
            }
            // triggered without a deadline should not happen; fail open
            None => {
                state.triggered = false;
                Ok(())
            }
        }
    }

    /// Record a successful response. Unconditionally clears any pending
    /// cooldown, even one that has not naturally expired.
    pub fn on_success(&self) {
        let mut state = self.lock();
        state.triggered = false;
        state.counter = 0;
        state.resume_at = None;
    }

    /// Record a 429 response and arm the cooldown.
    ///
    /// The wait is taken from `Retry-After` (integer seconds, or an RFC 1123
    /// HTTP-date) when the header is present; a header that is present but
    /// malformed, or that points into the past, yields
    /// [`Error::RetryAfterFormat`] and leaves the state untouched. With no
    /// header the wait falls back to `min_wait * 2^counter`. Either way the
    /// result is clamped to `[min_wait, max_wait]`.
    ///
    /// Only marks state; the caller is not blocked. Subsequent
    /// [`check_allowed`](Self::check_allowed) calls reject until the
    /// deadline passes.
    pub fn on_too_many_requests(&self, headers: &HeaderMap) -> Result<()> {
        let mut state = self.lock();

        let wait = match headers.get(http::header::RETRY_AFTER) {
            Some(value) => parse_retry_after(value)?,
            None => fallback_wait(state.min_wait, state.counter),
        };
        let wait = wait.clamp(state.min_wait, state.max_wait);

        tracing::warn!(wait_secs = wait.as_secs(), "rate limited, cooling down");

        state.triggered = true;
        state.resume_at = Some(Instant::now() + wait);
        state.counter += 1;
        Ok(())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, CooldownState> {
        // A poisoned mutex means a panic mid-transition; the state is a
        // handful of plain fields, safe to keep using.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Exponential fallback used when a 429 carries no `Retry-After` header.
fn fallback_wait(min_wait: Duration, counter: u32) -> Duration {
    let factor = 2u32.checked_pow(counter).unwrap_or(u32::MAX);
    min_wait.saturating_mul(factor)
}

/// Parse a `Retry-After` value as integer seconds or an RFC 1123 HTTP-date.
fn parse_retry_after(value: &http::HeaderValue) -> Result<Duration> {
    let text = value
        .to_str()
        .map_err(|_| Error::RetryAfterFormat("non-ASCII header value".to_string()))?
        .trim();

    if let Ok(secs) = text.parse::<u64>() {
        return Ok(Duration::from_secs(secs));
    }

    // RFC 1123 dates are the fixed-offset subset of RFC 2822, which chrono
    // parses including the obsolete GMT zone name.
    let date = chrono::DateTime::parse_from_rfc2822(text)
        .map_err(|_| Error::RetryAfterFormat(text.to_string()))?;
    let delta = date.signed_duration_since(chrono::Utc::now());
    delta
        .to_std()
        .map_err(|_| Error::RetryAfterFormat(format!("Retry-After date in the past: {text}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;

    fn enabled_guard() -> CooldownGuard {
        let guard = CooldownGuard::default();
        guard.enable();
        guard
    }

    fn headers_with_retry_after(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            http::header::RETRY_AFTER,
            HeaderValue::from_str(value).unwrap(),
        );
        headers
    }

    #[test]
    fn test_disabled_guard_always_allows() {
        let guard = CooldownGuard::default();
        assert!(guard.check_allowed().is_ok());
        guard.on_too_many_requests(&HeaderMap::new()).unwrap();
        // armed but disabled: still allowed
        assert!(guard.check_allowed().is_ok());
    }

    #[test]
    fn test_429_without_header_uses_min_wait() {
        let guard = enabled_guard();
        guard.on_too_many_requests(&HeaderMap::new()).unwrap();

        match guard.check_allowed() {
            Err(Error::RateLimited { resume_in }) => {
                assert!(resume_in <= Duration::from_secs(5));
                assert!(resume_in > Duration::from_secs(4));
            }
            other => panic!("expected RateLimited, got {other:?}"),
        }
    }

    #[test]
    fn test_fallback_waits_double_per_429() {
        assert_eq!(
            fallback_wait(Duration::from_secs(5), 0),
            Duration::from_secs(5)
        );
        assert_eq!(
            fallback_wait(Duration::from_secs(5), 1),
            Duration::from_secs(10)
        );
        assert_eq!(
            fallback_wait(Duration::from_secs(5), 2),
            Duration::from_secs(20)
        );
    }

    #[test]
    fn test_fallback_wait_clamped_to_max() {
        let guard = enabled_guard();
        // 2^10 * 5s = ~85min, well past the 20min cap
        for _ in 0..10 {
            guard.on_too_many_requests(&HeaderMap::new()).unwrap();
        }
        match guard.check_allowed() {
            Err(Error::RateLimited { resume_in }) => {
                assert!(resume_in <= DEFAULT_MAX_WAIT);
            }
            other => panic!("expected RateLimited, got {other:?}"),
        }
    }

    #[test]
    fn test_inverted_bounds_do_not_panic() {
        let guard = CooldownGuard::new(Duration::from_secs(10), Duration::from_secs(1));
        guard.enable();
        guard.on_too_many_requests(&HeaderMap::new()).unwrap();

        // max raised to min: the window is min_wait wide
        match guard.check_allowed() {
            Err(Error::RateLimited { resume_in }) => {
                assert!(resume_in <= Duration::from_secs(10));
                assert!(resume_in > Duration::from_secs(9));
            }
            other => panic!("expected RateLimited, got {other:?}"),
        }
    }

    #[test]
    fn test_fallback_exponent_saturates() {
        // counter beyond 2^31 must not panic
        let wait = fallback_wait(Duration::from_secs(5), 40);
        assert!(wait >= Duration::from_secs(5));
    }

    #[test]
    fn test_retry_after_integer_seconds() {
        let guard = enabled_guard();
        guard
            .on_too_many_requests(&headers_with_retry_after("10"))
            .unwrap();

        match guard.check_allowed() {
            Err(Error::RateLimited { resume_in }) => {
                assert!(resume_in > Duration::from_secs(9));
                assert!(resume_in <= Duration::from_secs(10));
            }
            other => panic!("expected RateLimited, got {other:?}"),
        }
    }

    #[test]
    fn test_retry_after_http_date() {
        let future = chrono::Utc::now() + chrono::Duration::seconds(8);
        let stamp = future.format("%a, %d %b %Y %H:%M:%S GMT").to_string();

        let guard = enabled_guard();
        guard
            .on_too_many_requests(&headers_with_retry_after(&stamp))
            .unwrap();

        match guard.check_allowed() {
            Err(Error::RateLimited { resume_in }) => {
                // sub-second rounding between formatting and parsing
                assert!(resume_in > Duration::from_secs(6));
                assert!(resume_in <= Duration::from_secs(8));
            }
            other => panic!("expected RateLimited, got {other:?}"),
        }
    }

    #[test]
    fn test_retry_after_below_min_is_clamped_up() {
        let guard = enabled_guard();
        guard
            .on_too_many_requests(&headers_with_retry_after("1"))
            .unwrap();

        match guard.check_allowed() {
            Err(Error::RateLimited { resume_in }) => {
                assert!(resume_in > Duration::from_secs(4));
            }
            other => panic!("expected RateLimited, got {other:?}"),
        }
    }

    #[test]
    fn test_malformed_retry_after_leaves_state_untouched() {
        let guard = enabled_guard();
        let result = guard.on_too_many_requests(&headers_with_retry_after("not-a-date"));

        assert!(matches!(result, Err(Error::RetryAfterFormat(_))));
        // guard stays idle: the very next request is allowed
        assert!(guard.check_allowed().is_ok());
    }

    #[test]
    fn test_retry_after_date_in_past_is_format_error() {
        let guard = enabled_guard();
        let result =
            guard.on_too_many_requests(&headers_with_retry_after("Sun, 06 Nov 1994 08:49:37 GMT"));

        assert!(matches!(result, Err(Error::RetryAfterFormat(_))));
        assert!(guard.check_allowed().is_ok());
    }

    #[test]
    fn test_success_clears_pending_cooldown() {
        let guard = enabled_guard();
        guard
            .on_too_many_requests(&headers_with_retry_after("60"))
            .unwrap();
        assert!(guard.check_allowed().is_err());

        guard.on_success();
        assert!(guard.check_allowed().is_ok());
    }

    #[test]
    fn test_success_resets_counter() {
        let guard = enabled_guard();
        guard.on_too_many_requests(&HeaderMap::new()).unwrap();
        guard.on_too_many_requests(&HeaderMap::new()).unwrap();
        guard.on_success();

        // counter back to 0: next fallback wait is min_wait again
        guard.on_too_many_requests(&HeaderMap::new()).unwrap();
        match guard.check_allowed() {
            Err(Error::RateLimited { resume_in }) => {
                assert!(resume_in <= Duration::from_secs(5));
            }
            other => panic!("expected RateLimited, got {other:?}"),
        }
    }

    #[test]
    fn test_disable_while_cooling_reopens_gate() {
        let guard = enabled_guard();
        guard
            .on_too_many_requests(&headers_with_retry_after("60"))
            .unwrap();
        assert!(guard.check_allowed().is_err());

        guard.disable();
        assert!(guard.check_allowed().is_ok());
    }

    #[test]
    fn test_expired_window_self_transitions_to_idle() {
        let guard = CooldownGuard::new(Duration::from_millis(0), Duration::from_millis(0));
        guard.enable();
        guard.on_too_many_requests(&HeaderMap::new()).unwrap();

        // zero-length window: already expired by the time we check
        std::thread::sleep(Duration::from_millis(5));
        assert!(guard.check_allowed().is_ok());
        // and it stays idle
        assert!(guard.check_allowed().is_ok());
    }

    #[test]
    fn test_concurrent_429s_do_not_lose_counter_increments() {
        use std::sync::Arc;

        let guard = Arc::new(enabled_guard());
        let mut handles = Vec::new();
        for _ in 0..8 {
            let guard = Arc::clone(&guard);
            handles.push(std::thread::spawn(move || {
                for _ in 0..50 {
                    guard.on_too_many_requests(&HeaderMap::new()).unwrap();
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(guard.lock().counter, 400);
    }
}
