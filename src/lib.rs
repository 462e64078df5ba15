//! Content core for a personal portfolio site with an admin-managed blog.
//!
//! Turns free-text author input into safe, displayable markup and gates what
//! enters that pipeline:
//!
//! - [`core::sanitize`](core::sanitize()) - strips scripts, `javascript:`
//!   schemes, and inline event handlers, then escapes angle brackets
//! - [`RateLimiter`](core::RateLimiter) - sliding-window request counter
//!   keyed by actor and action
//! - [`SessionManager`](core::SessionManager) - TTL'd admin session with
//!   lazy expiry and renew-on-read
//! - [`AuditLogger`](core::AuditLogger) - bounded newest-first audit trail
//! - [`ContentStore`](core::ContentStore) / [`ProfileStore`](core::ProfileStore) -
//!   document and profile CRUD over an injected [`KeyValueStore`](store::KeyValueStore)
//! - [`utils::markdown`] - constrained markdown dialect rendered to HTML by
//!   ordered sequential substitution
//!
//! Storage is abstracted behind [`store::KeyValueStore`] so the backing
//! medium (browser storage, a file, the bundled [`store::MemoryStore`])
//! stays swappable and tests never touch a real persistence layer.
//!
//! ```
//! use std::sync::Arc;
//!
//! use webfolio::core::ContentStore;
//! use webfolio::store::MemoryStore;
//! use webfolio::utils::markdown;
//!
//! let store = Arc::new(MemoryStore::new());
//! let content = ContentStore::new(store, "local-admin");
//! assert!(content.list_posts(true).is_empty());
//!
//! let html = markdown::render("# Hello\n\nSome **bold** text.");
//! assert!(html.contains("<h1"));
//! ```

pub mod config;
pub mod core;
pub mod models;
pub mod store;
pub mod utils;
