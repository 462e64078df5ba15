//! Data models for the content core.
//!
//! Contains domain types for:
//! - [`ContentDocument`], [`DocumentStatus`], [`NewDocument`], [`DocumentUpdate`] - blog documents
//! - [`SessionRecord`] - TTL'd admin session state
//! - [`AuditEntry`] - bounded audit trail entries
//! - [`Profile`] - the site owner record

mod audit;
mod document;
mod profile;
mod session;

pub use audit::AuditEntry;
pub use document::{ContentDocument, DocumentStatus, DocumentUpdate, NewDocument};
pub use profile::Profile;
pub use session::SessionRecord;
