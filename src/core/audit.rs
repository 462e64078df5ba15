//! Bounded audit logging over the key-value store.

use std::sync::Arc;

use serde_json::Value;

use crate::config::{AUDIT_LOG_KEY, MAX_AUDIT_ENTRIES};
use crate::core::clock::{Clock, SystemClock};
use crate::models::AuditEntry;
use crate::store::KeyValueStore;

/// Append-only audit trail, newest first, capped at
/// [`MAX_AUDIT_ENTRIES`].
///
/// Logging is fire-and-forget: storage failures are reported through
/// `tracing` and swallowed, so auditing never interrupts the operation
/// being audited.
pub struct AuditLogger {
    store: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    actor: String,
}

impl AuditLogger {
    pub fn new(store: Arc<dyn KeyValueStore>, actor: impl Into<String>) -> Self {
        Self::with_clock(store, Arc::new(SystemClock), actor)
    }

    pub fn with_clock(
        store: Arc<dyn KeyValueStore>,
        clock: Arc<dyn Clock>,
        actor: impl Into<String>,
    ) -> Self {
        Self {
            store,
            clock,
            actor: actor.into(),
        }
    }

    /// Record `action` with an optional detail payload.
    ///
    /// The new entry is prepended and the log truncated to the cap; the
    /// oldest entries are silently dropped.
    pub fn log(&self, action: &str, detail: Option<Value>) {
        let mut entries = self.get_logs();
        entries.insert(
            0,
            AuditEntry {
                timestamp: self.clock.now(),
                action: action.to_string(),
                detail,
                actor: self.actor.clone(),
            },
        );
        entries.truncate(MAX_AUDIT_ENTRIES);

        match serde_json::to_string(&entries) {
            Ok(json) => {
                if let Err(err) = self.store.set(AUDIT_LOG_KEY, &json) {
                    tracing::warn!(%err, action, "failed to persist audit entry");
                }
            }
            Err(err) => tracing::warn!(%err, action, "failed to serialize audit log"),
        }
    }

    /// Entries newest first. An unreadable stored log yields an empty one.
    pub fn get_logs(&self) -> Vec<AuditEntry> {
        let Some(raw) = self.store.get(AUDIT_LOG_KEY) else {
            return Vec::new();
        };
        serde_json::from_str(&raw).unwrap_or_else(|err| {
            tracing::warn!(%err, "discarding unparseable audit log");
            Vec::new()
        })
    }

    /// Remove every entry.
    pub fn clear_logs(&self) {
        self.store.remove(AUDIT_LOG_KEY);
    }
}
