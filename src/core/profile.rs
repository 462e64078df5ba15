//! Site profile load/save over the key-value store.

use std::sync::Arc;

use serde_json::json;

use crate::config::PROFILE_KEY;
use crate::core::audit::AuditLogger;
use crate::core::clock::{Clock, SystemClock};
use crate::core::content::ContentError;
use crate::core::sanitize::sanitize;
use crate::models::Profile;
use crate::store::KeyValueStore;

/// Store for the single profile record shown on the homepage.
///
/// Loading merges whatever partial record is stored over
/// [`Profile::default`]; saving sanitizes every text field first.
pub struct ProfileStore {
    store: Arc<dyn KeyValueStore>,
    audit: AuditLogger,
}

impl ProfileStore {
    pub fn new(store: Arc<dyn KeyValueStore>, actor: impl Into<String>) -> Self {
        Self::with_clock(store, Arc::new(SystemClock), actor)
    }

    pub fn with_clock(
        store: Arc<dyn KeyValueStore>,
        clock: Arc<dyn Clock>,
        actor: impl Into<String>,
    ) -> Self {
        Self {
            audit: AuditLogger::with_clock(store.clone(), clock, actor),
            store,
        }
    }

    /// Load the profile, falling back to defaults when the record is
    /// missing or unreadable.
    pub fn load(&self) -> Profile {
        let Some(raw) = self.store.get(PROFILE_KEY) else {
            return Profile::default();
        };
        serde_json::from_str(&raw).unwrap_or_else(|err| {
            tracing::warn!(%err, "discarding unparseable profile record");
            Profile::default()
        })
    }

    /// Sanitize and persist the profile, returning what was stored.
    pub fn save(&self, profile: Profile) -> Result<Profile, ContentError> {
        let clean = Profile {
            name: sanitize(&profile.name),
            headline: sanitize(&profile.headline),
            bio: sanitize(&profile.bio),
            email: sanitize_optional(profile.email),
            phone: sanitize_optional(profile.phone),
            website: sanitize_optional(profile.website),
            github: sanitize_optional(profile.github),
            twitter: sanitize_optional(profile.twitter),
            linkedin: sanitize_optional(profile.linkedin),
        };

        let json = serde_json::to_string(&clean)?;
        self.store.set(PROFILE_KEY, &json)?;

        self.audit
            .log("profile_updated", Some(json!({ "name": &clean.name })));
        Ok(clean)
    }
}

fn sanitize_optional(value: Option<String>) -> Option<String> {
    value.map(|v| sanitize(&v)).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::ManualClock;
    use crate::store::MemoryStore;

    fn profile_store() -> (ProfileStore, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        let clock = Arc::new(ManualClock::new(0));
        let profiles = ProfileStore::with_clock(store.clone(), clock, "local-admin");
        (profiles, store)
    }

    #[test]
    fn test_missing_record_loads_defaults() {
        let (profiles, _store) = profile_store();
        assert_eq!(profiles.load(), Profile::default());
    }

    #[test]
    fn test_partial_record_merges_over_defaults() {
        let (profiles, store) = profile_store();
        store
            .set(PROFILE_KEY, r#"{"name":"Ada","github":"https://github.com/ada"}"#)
            .unwrap();

        let profile = profiles.load();
        assert_eq!(profile.name, "Ada");
        assert_eq!(profile.github, Some("https://github.com/ada".to_string()));
        assert_eq!(profile.headline, Profile::default().headline);
    }

    #[test]
    fn test_corrupt_record_loads_defaults() {
        let (profiles, store) = profile_store();
        store.set(PROFILE_KEY, "][").unwrap();
        assert_eq!(profiles.load(), Profile::default());
    }

    #[test]
    fn test_save_sanitizes_and_roundtrips() {
        let (profiles, _store) = profile_store();
        let saved = profiles
            .save(Profile {
                name: "Ada <script>alert(1)</script>".to_string(),
                bio: "a < b".to_string(),
                email: Some("   ".to_string()),
                ..Profile::default()
            })
            .unwrap();

        assert!(!saved.name.to_lowercase().contains("<script"));
        assert_eq!(saved.bio, "a &lt; b");
        // An emptied optional field collapses to absent.
        assert_eq!(saved.email, None);
        assert_eq!(profiles.load(), saved);
    }

    #[test]
    fn test_save_is_audited() {
        let (profiles, _store) = profile_store();
        profiles.save(Profile::default()).unwrap();
        let logs = profiles.audit.get_logs();
        assert_eq!(logs[0].action, "profile_updated");
    }
}
