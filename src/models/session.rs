//! Admin session record.

use serde::{Deserialize, Serialize};

/// A timestamped session record, persisted under a fixed storage key.
///
/// All times are epoch milliseconds. The invariant
/// `expires_at = issued_at + TTL` holds at creation and is restored on every
/// renewal, which re-issues the record rather than stretching it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub subject_id: String,
    pub issued_at: i64,
    pub expires_at: i64,
}

impl SessionRecord {
    /// Create a record for `subject_id` issued at `now`.
    pub fn issue(subject_id: impl Into<String>, now: i64, ttl_ms: i64) -> Self {
        Self {
            subject_id: subject_id.into(),
            issued_at: now,
            expires_at: now + ttl_ms,
        }
    }

    /// Whether the record's TTL has elapsed at `now`.
    pub fn is_expired(&self, now: i64) -> bool {
        now > self.expires_at
    }

    /// Whether a read at `now` should slide the expiry forward.
    ///
    /// Renewal kicks in once the record is past half its TTL, so an admin
    /// who keeps working is never logged out mid-session while idle
    /// sessions still lapse on schedule.
    pub fn should_renew(&self, now: i64) -> bool {
        let ttl = self.expires_at - self.issued_at;
        now - self.issued_at >= ttl / 2
    }

    /// Re-issue the record at `now`, keeping the original TTL.
    pub fn reissued(&self, now: i64) -> Self {
        let ttl = self.expires_at - self.issued_at;
        Self::issue(self.subject_id.clone(), now, ttl)
    }
}
