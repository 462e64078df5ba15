//! Blog document model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Publication state of a blog document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    /// Visible only from the admin surface.
    #[default]
    Draft,
    /// Publicly listed and addressable by slug.
    Published,
    /// Hidden from listings but retained in the store.
    Archived,
}

impl DocumentStatus {
    /// Whether documents in this state appear on the public site.
    pub fn is_published(self) -> bool {
        self == Self::Published
    }
}

/// A blog document as persisted in the content store.
///
/// The slug is derived deterministically from the title and is unique among
/// documents in the same store. `published_at` is stamped exactly once, the
/// first time the document transitions into [`DocumentStatus::Published`],
/// and survives every later edit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentDocument {
    pub id: String,
    pub title: String,
    pub slug: String,
    /// Raw markdown body, sanitized before storage.
    pub body: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured_image: Option<String>,
    /// Deduplicated, order-preserving tag list.
    #[serde(default)]
    pub tags: Vec<String>,
    pub status: DocumentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a document.
#[derive(Debug, Clone, Default)]
pub struct NewDocument {
    pub title: String,
    pub body: String,
    pub excerpt: Option<String>,
    pub featured_image: Option<String>,
    pub tags: Vec<String>,
    pub status: DocumentStatus,
}

/// Partial update for an existing document.
///
/// `None` fields are left untouched; provided fields are sanitized and
/// validated before they replace the stored values.
#[derive(Debug, Clone, Default)]
pub struct DocumentUpdate {
    pub id: String,
    pub title: Option<String>,
    pub body: Option<String>,
    pub excerpt: Option<String>,
    pub featured_image: Option<String>,
    pub tags: Option<Vec<String>>,
    pub status: Option<DocumentStatus>,
}

impl DocumentUpdate {
    /// An update that touches nothing but the given document.
    pub fn for_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&DocumentStatus::Published).unwrap(),
            "\"published\""
        );
        assert_eq!(
            serde_json::from_str::<DocumentStatus>("\"archived\"").unwrap(),
            DocumentStatus::Archived
        );
    }

    #[test]
    fn test_is_published() {
        assert!(DocumentStatus::Published.is_published());
        assert!(!DocumentStatus::Draft.is_published());
        assert!(!DocumentStatus::Archived.is_published());
    }
}
