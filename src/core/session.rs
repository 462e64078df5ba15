//! Admin session lifecycle over the key-value store.
//!
//! Expiry is lazy: the TTL is enforced when the record is read, never by a
//! timer. A read past half the TTL re-issues the record, so an admin who
//! keeps working stays logged in while idle sessions lapse on schedule.

use std::sync::Arc;

use crate::config::{SESSION_KEY, SESSION_TTL_MS};
use crate::core::clock::{Clock, SystemClock};
use crate::models::SessionRecord;
use crate::store::KeyValueStore;

/// Manages the single admin session record.
pub struct SessionManager {
    store: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    ttl_ms: i64,
}

impl SessionManager {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_clock(store, Arc::new(SystemClock))
    }

    pub fn with_clock(store: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            clock,
            ttl_ms: SESSION_TTL_MS,
        }
    }

    /// Start a session for `subject_id`, replacing any existing record.
    pub fn create_session(&self, subject_id: &str) {
        let record = SessionRecord::issue(subject_id, self.clock.now_ms(), self.ttl_ms);
        self.write(&record);
    }

    /// Return the active subject, enforcing expiry and sliding renewal.
    ///
    /// An expired or unparseable record is deleted and reported as absent,
    /// never as an error.
    pub fn get_session(&self) -> Option<String> {
        let raw = self.store.get(SESSION_KEY)?;
        let Ok(record) = serde_json::from_str::<SessionRecord>(&raw) else {
            tracing::warn!("discarding unparseable session record");
            self.clear_session();
            return None;
        };

        let now = self.clock.now_ms();
        if record.is_expired(now) {
            self.clear_session();
            return None;
        }
        if record.should_renew(now) {
            let renewed = record.reissued(now);
            self.write(&renewed);
            return Some(renewed.subject_id);
        }
        Some(record.subject_id)
    }

    /// Remove the session record unconditionally.
    pub fn clear_session(&self) {
        self.store.remove(SESSION_KEY);
    }

    /// Whether a session is currently active. Shares `get_session`'s side
    /// effects (expiry cleanup, renewal).
    pub fn is_session_valid(&self) -> bool {
        self.get_session().is_some()
    }

    fn write(&self, record: &SessionRecord) {
        match serde_json::to_string(record) {
            Ok(json) => {
                if let Err(err) = self.store.set(SESSION_KEY, &json) {
                    tracing::warn!(%err, "failed to persist session record");
                }
            }
            Err(err) => tracing::warn!(%err, "failed to serialize session record"),
        }
    }
}
