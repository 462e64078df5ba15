//! Time source abstraction.
//!
//! Session expiry and rate windows are data-driven, so the only time
//! dependency in the crate is "what is now". Injecting it keeps every
//! TTL test free of sleeps.

use chrono::{DateTime, Utc};

/// Time source injected into the rate limiter, session manager, and stores.
pub trait Clock: Send + Sync {
    /// Current instant.
    fn now(&self) -> DateTime<Utc>;

    /// Current instant as epoch milliseconds.
    fn now_ms(&self) -> i64 {
        self.now().timestamp_millis()
    }
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A hand-driven clock for simulating elapsed time in tests.
#[cfg(test)]
pub struct ManualClock {
    ms: std::sync::atomic::AtomicI64,
}

#[cfg(test)]
impl ManualClock {
    pub fn new(start_ms: i64) -> Self {
        Self {
            ms: std::sync::atomic::AtomicI64::new(start_ms),
        }
    }

    pub fn advance(&self, delta_ms: i64) {
        self.ms
            .fetch_add(delta_ms, std::sync::atomic::Ordering::SeqCst);
    }
}

#[cfg(test)]
impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        let ms = self.ms.load(std::sync::atomic::Ordering::SeqCst);
        DateTime::from_timestamp_millis(ms).expect("manual clock in datetime range")
    }
}
