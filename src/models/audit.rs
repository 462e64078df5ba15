//! Audit log entry.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single audit log entry.
///
/// Detail payloads are opaque JSON values; the set of actions is open-ended
/// so no per-action schema is enforced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub timestamp: DateTime<Utc>,
    pub action: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<serde_json::Value>,
    /// Who performed the action, as configured on the logger.
    pub actor: String,
}
