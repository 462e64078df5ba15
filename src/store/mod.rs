//! Key-value storage abstraction.
//!
//! Every persisted record (session, audit log, documents, profile) goes
//! through [`KeyValueStore`], so the backing medium stays swappable: browser
//! storage in a web embedding, a file on a desktop, [`MemoryStore`] in tests.
//!
//! Values are plain strings; callers serialize with `serde_json`. If the
//! backing medium is shared across processes, last-writer-wins applies; no
//! cross-process locking is implemented.

mod memory;

pub use memory::MemoryStore;

use thiserror::Error;

/// Errors raised by a key-value store implementation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The backing medium rejected the write (quota, I/O, ...).
    #[error("failed to write key '{0}'")]
    WriteFailed(String),
    /// The backing medium is not available.
    #[error("storage unavailable")]
    Unavailable,
}

/// Minimal string key-value contract.
///
/// Methods take `&self`; implementations use interior mutability so one
/// store instance can be shared by the session manager, audit logger, and
/// content store that compose it.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored at `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Store `value` at `key`, replacing any prior value.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Delete the value at `key`. Removing a missing key is a no-op.
    fn remove(&self, key: &str);
}
