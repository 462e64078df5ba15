//! Sliding-window rate limiting keyed by actor and action.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::core::clock::{Clock, SystemClock};

/// Sliding-window request counter.
///
/// Each key holds the timestamps of its recent requests. A request is
/// accepted while fewer than `max_requests` fall inside the trailing
/// window; rejected requests are not recorded, so a throttled caller
/// cannot extend its own penalty.
///
/// Keys follow the `<action>_<actor>` convention shared by the login and
/// content-creation paths:
///
/// ```
/// use webfolio::config::rate_limits;
/// use webfolio::core::RateLimiter;
///
/// let limiter = RateLimiter::new();
/// assert!(limiter.is_allowed(
///     "login_admin",
///     rate_limits::LOGIN_MAX,
///     rate_limits::LOGIN_WINDOW_MS,
/// ));
/// ```
pub struct RateLimiter {
    windows: Mutex<HashMap<String, Vec<i64>>>,
    clock: Arc<dyn Clock>,
}

impl RateLimiter {
    /// Limiter driven by the wall clock.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Limiter driven by an injected clock.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            windows: Mutex::new(HashMap::new()),
            clock,
        }
    }

    /// Check and record a request for `key`.
    ///
    /// Drops timestamps older than `now - window_ms`, then accepts if the
    /// remaining count is below `max_requests`.
    pub fn is_allowed(&self, key: &str, max_requests: usize, window_ms: i64) -> bool {
        let now = self.clock.now_ms();
        let window_start = now - window_ms;

        let mut windows = self.windows.lock().unwrap_or_else(|e| e.into_inner());
        let timestamps = windows.entry(key.to_string()).or_default();
        timestamps.retain(|&ts| ts > window_start);

        if timestamps.len() >= max_requests {
            return false;
        }
        timestamps.push(now);
        true
    }

    /// Clear the window for `key`.
    ///
    /// Used after a successful authenticated action to un-penalize a
    /// previously throttled caller.
    pub fn reset(&self, key: &str) {
        self.windows
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(key);
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}
