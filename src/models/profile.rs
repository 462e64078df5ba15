//! Site owner profile record.

use serde::{Deserialize, Serialize};

/// The single profile record shown on the portfolio homepage.
///
/// Every field carries a `serde` default, so a stored partial record merges
/// field-by-field over [`Profile::default`] when loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub name: String,
    pub headline: String,
    pub bio: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            name: "Site Owner".to_string(),
            headline: "Developer".to_string(),
            bio: String::new(),
            email: None,
            phone: None,
            website: None,
            github: None,
            twitter: None,
            linkedin: None,
        }
    }
}
