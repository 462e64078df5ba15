//! Blog document CRUD over the key-value store.
//!
//! Composes the sanitizer, rate limiter, audit logger, and slug derivation
//! into the write path, so nothing unsanitized reaches storage and every
//! mutation leaves an audit entry. Documents live under a single fixed key
//! as a newest-first JSON array.

use std::sync::Arc;

use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

use crate::config::{MAX_BODY_CHARS, POSTS_KEY, rate_limits};
use crate::core::audit::AuditLogger;
use crate::core::clock::{Clock, SystemClock};
use crate::core::rate_limit::RateLimiter;
use crate::core::sanitize::sanitize;
use crate::models::{ContentDocument, DocumentStatus, DocumentUpdate, NewDocument};
use crate::store::{KeyValueStore, StoreError};
use crate::utils::generate_slug;
use crate::utils::{ImageUrlValidation, validate_image_url};

/// Failures surfaced by document operations.
///
/// Every variant is an expected condition with a user-facing message;
/// nothing here panics.
#[derive(Debug, Error)]
pub enum ContentError {
    /// Too many documents created inside the rate window.
    #[error("too many documents created recently")]
    RateLimited,
    /// Title was empty, or sanitization emptied it.
    #[error("document title is empty")]
    EmptyTitle,
    /// Another document already owns the derived slug.
    #[error("a document with slug '{0}' already exists")]
    DuplicateSlug(String),
    /// Body exceeds the configured length cap.
    #[error("document body is too long ({0} characters)")]
    BodyTooLong(usize),
    /// Featured image URL failed validation.
    #[error("image URL is invalid or not https")]
    InvalidImageUrl,
    /// No document with the given id.
    #[error("document '{0}' not found")]
    NotFound(String),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("failed to encode document store: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Document store over an injected [`KeyValueStore`].
///
/// The actor string keys the rate window (`create_post_<actor>`) and is
/// recorded on every audit entry.
pub struct ContentStore {
    store: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    limiter: RateLimiter,
    audit: AuditLogger,
    actor: String,
}

impl ContentStore {
    pub fn new(store: Arc<dyn KeyValueStore>, actor: impl Into<String>) -> Self {
        Self::with_clock(store, Arc::new(SystemClock), actor)
    }

    pub fn with_clock(
        store: Arc<dyn KeyValueStore>,
        clock: Arc<dyn Clock>,
        actor: impl Into<String>,
    ) -> Self {
        let actor = actor.into();
        Self {
            limiter: RateLimiter::with_clock(clock.clone()),
            audit: AuditLogger::with_clock(store.clone(), clock.clone(), actor.clone()),
            store,
            clock,
            actor,
        }
    }

    /// The audit trail shared by this store's mutations.
    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Create a document.
    ///
    /// Rate-checked, sanitized, and validated before anything is written;
    /// the new document is prepended so listings stay newest-first.
    pub fn create_post(&self, draft: NewDocument) -> Result<ContentDocument, ContentError> {
        let rate_key = format!("create_post_{}", self.actor);
        if !self.limiter.is_allowed(
            &rate_key,
            rate_limits::CREATE_POST_MAX,
            rate_limits::CREATE_POST_WINDOW_MS,
        ) {
            return Err(ContentError::RateLimited);
        }

        let title = sanitize(&draft.title);
        if title.is_empty() {
            return Err(ContentError::EmptyTitle);
        }

        let body = sanitize(&draft.body);
        let body_chars = body.chars().count();
        if body_chars > MAX_BODY_CHARS {
            return Err(ContentError::BodyTooLong(body_chars));
        }

        let excerpt = sanitize_optional(draft.excerpt.as_deref());
        let featured_image = sanitize_optional(draft.featured_image.as_deref());
        if let Some(url) = &featured_image {
            ensure_valid_image_url(url)?;
        }

        let slug = generate_slug(&title);
        let mut posts = self.load_posts();
        if posts.iter().any(|p| p.slug == slug) {
            return Err(ContentError::DuplicateSlug(slug));
        }

        let now = self.clock.now();
        let document = ContentDocument {
            id: Uuid::new_v4().to_string(),
            title,
            slug,
            body,
            excerpt,
            featured_image,
            tags: sanitize_tags(&draft.tags),
            status: draft.status,
            published_at: (draft.status == DocumentStatus::Published).then_some(now),
            created_at: now,
            updated_at: now,
        };

        posts.insert(0, document.clone());
        self.save_posts(&posts)?;

        self.audit.log(
            "document_created",
            Some(json!({
                "id": &document.id,
                "title": &document.title,
                "status": document.status,
            })),
        );
        Ok(document)
    }

    /// Apply a partial update to an existing document.
    ///
    /// Provided fields are sanitized and validated; a changed title
    /// re-derives the slug. `published_at` is stamped only on the first
    /// transition into [`DocumentStatus::Published`] and never cleared.
    pub fn update_post(&self, update: DocumentUpdate) -> Result<ContentDocument, ContentError> {
        let mut posts = self.load_posts();
        let index = posts
            .iter()
            .position(|p| p.id == update.id)
            .ok_or_else(|| ContentError::NotFound(update.id.clone()))?;

        let mut document = posts[index].clone();

        if let Some(title) = &update.title {
            let title = sanitize(title);
            if title.is_empty() {
                return Err(ContentError::EmptyTitle);
            }
            let slug = generate_slug(&title);
            if posts
                .iter()
                .enumerate()
                .any(|(i, p)| i != index && p.slug == slug)
            {
                return Err(ContentError::DuplicateSlug(slug));
            }
            document.title = title;
            document.slug = slug;
        }

        if let Some(body) = &update.body {
            let body = sanitize(body);
            let body_chars = body.chars().count();
            if body_chars > MAX_BODY_CHARS {
                return Err(ContentError::BodyTooLong(body_chars));
            }
            document.body = body;
        }

        if let Some(excerpt) = &update.excerpt {
            document.excerpt = sanitize_optional(Some(excerpt.as_str()));
        }

        if let Some(url) = &update.featured_image {
            document.featured_image = match sanitize_optional(Some(url.as_str())) {
                Some(url) => {
                    ensure_valid_image_url(&url)?;
                    Some(url)
                }
                None => None,
            };
        }

        if let Some(tags) = &update.tags {
            document.tags = sanitize_tags(tags);
        }

        if let Some(status) = update.status {
            if status == DocumentStatus::Published && document.published_at.is_none() {
                document.published_at = Some(self.clock.now());
            }
            document.status = status;
        }

        document.updated_at = self.clock.now();

        posts[index] = document.clone();
        self.save_posts(&posts)?;

        self.audit.log(
            "document_updated",
            Some(json!({ "id": &document.id, "status": document.status })),
        );
        Ok(document)
    }

    /// Delete a document by id.
    pub fn delete_post(&self, id: &str) -> Result<(), ContentError> {
        let mut posts = self.load_posts();
        let before = posts.len();
        posts.retain(|p| p.id != id);
        if posts.len() == before {
            return Err(ContentError::NotFound(id.to_string()));
        }
        self.save_posts(&posts)?;

        self.audit.log("document_deleted", Some(json!({ "id": id })));
        Ok(())
    }

    /// List documents in stored (newest-first) order.
    ///
    /// Without `include_unpublished`, drafts and archived documents are
    /// filtered out.
    pub fn list_posts(&self, include_unpublished: bool) -> Vec<ContentDocument> {
        let posts = self.load_posts();
        if include_unpublished {
            posts
        } else {
            posts
                .into_iter()
                .filter(|p| p.status.is_published())
                .collect()
        }
    }

    /// Look up a published document by slug.
    pub fn get_post_by_slug(&self, slug: &str) -> Option<ContentDocument> {
        self.load_posts()
            .into_iter()
            .find(|p| p.slug == slug && p.status.is_published())
    }

    fn load_posts(&self) -> Vec<ContentDocument> {
        let Some(raw) = self.store.get(POSTS_KEY) else {
            return Vec::new();
        };
        serde_json::from_str(&raw).unwrap_or_else(|err| {
            tracing::warn!(%err, "discarding unparseable document store");
            Vec::new()
        })
    }

    fn save_posts(&self, posts: &[ContentDocument]) -> Result<(), ContentError> {
        let json = serde_json::to_string(posts)?;
        self.store.set(POSTS_KEY, &json)?;
        Ok(())
    }
}

/// Sanitize an optional field, collapsing an emptied value to `None`.
fn sanitize_optional(value: Option<&str>) -> Option<String> {
    value.map(sanitize).filter(|s| !s.is_empty())
}

/// Sanitize tags, dropping emptied ones and deduplicating while keeping
/// first-seen order.
fn sanitize_tags(tags: &[String]) -> Vec<String> {
    let mut clean: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        let tag = sanitize(tag);
        if !tag.is_empty() && !clean.contains(&tag) {
            clean.push(tag);
        }
    }
    clean
}

fn ensure_valid_image_url(url: &str) -> Result<(), ContentError> {
    match validate_image_url(url) {
        ImageUrlValidation::Valid { .. } => Ok(()),
        ImageUrlValidation::Invalid(_) => Err(ContentError::InvalidImageUrl),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::ManualClock;
    use crate::store::MemoryStore;

    fn content_store() -> (ContentStore, Arc<ManualClock>, Arc<MemoryStore>) {
        let clock = Arc::new(ManualClock::new(1_700_000_000_000));
        let store = Arc::new(MemoryStore::new());
        let content = ContentStore::with_clock(store.clone(), clock.clone(), "local-admin");
        (content, clock, store)
    }

    fn draft(title: &str) -> NewDocument {
        NewDocument {
            title: title.to_string(),
            body: "Some **content** here.".to_string(),
            status: DocumentStatus::Published,
            ..NewDocument::default()
        }
    }

    #[test]
    fn test_create_and_list() {
        let (content, _clock, _store) = content_store();
        let doc = content.create_post(draft("Hello, World!  Foo")).unwrap();
        assert_eq!(doc.slug, "hello-world-foo");
        assert!(doc.published_at.is_some());
        assert_eq!(doc.created_at, doc.updated_at);

        let listed = content.list_posts(false);
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, doc.id);
    }

    #[test]
    fn test_listing_is_newest_first() {
        let (content, clock, _store) = content_store();
        content.create_post(draft("First")).unwrap();
        clock.advance(1000);
        content.create_post(draft("Second")).unwrap();

        let listed = content.list_posts(true);
        assert_eq!(listed[0].title, "Second");
        assert_eq!(listed[1].title, "First");
    }

    #[test]
    fn test_drafts_hidden_from_public_listing() {
        let (content, _clock, _store) = content_store();
        content
            .create_post(NewDocument {
                status: DocumentStatus::Draft,
                ..draft("Work in progress")
            })
            .unwrap();

        assert!(content.list_posts(false).is_empty());
        assert_eq!(content.list_posts(true).len(), 1);
    }

    #[test]
    fn test_get_by_slug_is_published_only() {
        let (content, _clock, _store) = content_store();
        let doc = content
            .create_post(NewDocument {
                status: DocumentStatus::Draft,
                ..draft("Hidden Post")
            })
            .unwrap();

        assert_eq!(content.get_post_by_slug("hidden-post"), None);

        content
            .update_post(DocumentUpdate {
                status: Some(DocumentStatus::Published),
                ..DocumentUpdate::for_id(doc.id.as_str())
            })
            .unwrap();
        assert!(content.get_post_by_slug("hidden-post").is_some());
    }

    #[test]
    fn test_duplicate_slug_rejected() {
        let (content, _clock, _store) = content_store();
        content.create_post(draft("Same Title")).unwrap();
        let err = content.create_post(draft("Same  Title!")).unwrap_err();
        assert!(matches!(err, ContentError::DuplicateSlug(slug) if slug == "same-title"));
    }

    #[test]
    fn test_create_sanitizes_fields() {
        let (content, _clock, _store) = content_store();
        let doc = content
            .create_post(NewDocument {
                title: "Safe <script>alert(1)</script> Title".to_string(),
                body: "a < b".to_string(),
                tags: vec!["rust".to_string(), "".to_string(), "rust".to_string()],
                status: DocumentStatus::Published,
                ..NewDocument::default()
            })
            .unwrap();

        assert!(!doc.title.to_lowercase().contains("<script"));
        assert_eq!(doc.body, "a &lt; b");
        assert_eq!(doc.tags, vec!["rust".to_string()]);
    }

    #[test]
    fn test_empty_title_rejected() {
        let (content, _clock, _store) = content_store();
        let err = content.create_post(draft("   ")).unwrap_err();
        assert!(matches!(err, ContentError::EmptyTitle));
    }

    #[test]
    fn test_body_length_cap() {
        let (content, _clock, _store) = content_store();
        let err = content
            .create_post(NewDocument {
                body: "x".repeat(MAX_BODY_CHARS + 1),
                ..draft("Long One")
            })
            .unwrap_err();
        assert!(matches!(err, ContentError::BodyTooLong(_)));
    }

    #[test]
    fn test_invalid_image_url_rejected() {
        let (content, _clock, _store) = content_store();
        let err = content
            .create_post(NewDocument {
                featured_image: Some("http://plain.example/pic.png".to_string()),
                ..draft("Pictured")
            })
            .unwrap_err();
        assert!(matches!(err, ContentError::InvalidImageUrl));
    }

    #[test]
    fn test_create_is_rate_limited() {
        let (content, _clock, _store) = content_store();
        for i in 0..rate_limits::CREATE_POST_MAX {
            content.create_post(draft(&format!("Post {i}"))).unwrap();
        }
        let err = content.create_post(draft("One Too Many")).unwrap_err();
        assert!(matches!(err, ContentError::RateLimited));
    }

    #[test]
    fn test_published_at_is_stamped_exactly_once() {
        let (content, clock, _store) = content_store();
        let doc = content
            .create_post(NewDocument {
                status: DocumentStatus::Draft,
                ..draft("Lifecycle")
            })
            .unwrap();
        assert_eq!(doc.published_at, None);

        clock.advance(60_000);
        let published = content
            .update_post(DocumentUpdate {
                status: Some(DocumentStatus::Published),
                ..DocumentUpdate::for_id(doc.id.as_str())
            })
            .unwrap();
        let first_published_at = published.published_at.expect("stamped on publish");

        // Archive and republish later; the original stamp must survive.
        clock.advance(60_000);
        content
            .update_post(DocumentUpdate {
                status: Some(DocumentStatus::Archived),
                ..DocumentUpdate::for_id(doc.id.as_str())
            })
            .unwrap();
        clock.advance(60_000);
        let republished = content
            .update_post(DocumentUpdate {
                status: Some(DocumentStatus::Published),
                ..DocumentUpdate::for_id(doc.id.as_str())
            })
            .unwrap();

        assert_eq!(republished.published_at, Some(first_published_at));
    }

    #[test]
    fn test_update_title_rederives_slug() {
        let (content, clock, _store) = content_store();
        let doc = content.create_post(draft("Original Title")).unwrap();

        clock.advance(1000);
        let updated = content
            .update_post(DocumentUpdate {
                title: Some("Fresh Title".to_string()),
                ..DocumentUpdate::for_id(doc.id.as_str())
            })
            .unwrap();

        assert_eq!(updated.slug, "fresh-title");
        assert!(updated.updated_at > updated.created_at);
        assert_eq!(content.get_post_by_slug("original-title"), None);
    }

    #[test]
    fn test_update_rejects_slug_collision() {
        let (content, _clock, _store) = content_store();
        content.create_post(draft("Taken")).unwrap();
        let doc = content.create_post(draft("Other")).unwrap();

        let err = content
            .update_post(DocumentUpdate {
                title: Some("Taken".to_string()),
                ..DocumentUpdate::for_id(doc.id.as_str())
            })
            .unwrap_err();
        assert!(matches!(err, ContentError::DuplicateSlug(_)));
    }

    #[test]
    fn test_update_missing_document() {
        let (content, _clock, _store) = content_store();
        let err = content
            .update_post(DocumentUpdate::for_id("no-such-id"))
            .unwrap_err();
        assert!(matches!(err, ContentError::NotFound(_)));
    }

    #[test]
    fn test_delete_post() {
        let (content, _clock, _store) = content_store();
        let doc = content.create_post(draft("Short Lived")).unwrap();
        content.delete_post(&doc.id).unwrap();
        assert!(content.list_posts(true).is_empty());
        assert!(matches!(
            content.delete_post(&doc.id),
            Err(ContentError::NotFound(_))
        ));
    }

    #[test]
    fn test_corrupt_store_recovers_empty() {
        let (content, _clock, store) = content_store();
        store.set(POSTS_KEY, "{broken").unwrap();
        assert!(content.list_posts(true).is_empty());

        // Writes start a fresh array over the corrupt value.
        content.create_post(draft("Fresh Start")).unwrap();
        assert_eq!(content.list_posts(true).len(), 1);
    }

    #[test]
    fn test_mutations_are_audited() {
        let (content, _clock, _store) = content_store();
        let doc = content.create_post(draft("Audited")).unwrap();
        content.delete_post(&doc.id).unwrap();

        let logs = content.audit().get_logs();
        assert_eq!(logs[0].action, "document_deleted");
        assert_eq!(logs[1].action, "document_created");
        assert_eq!(logs[1].actor, "local-admin");
    }
}
