//! Application configuration.
//!
//! Centralizes the storage keys, limits, and security constants used
//! throughout the content core.

// =============================================================================
// Storage Keys
// =============================================================================

/// Storage key for the admin session record.
pub const SESSION_KEY: &str = "admin_session";

/// Storage key for the audit log array.
pub const AUDIT_LOG_KEY: &str = "admin_audit_log";

/// Storage key for the blog document array.
pub const POSTS_KEY: &str = "local_blog_posts";

/// Storage key for the profile record.
pub const PROFILE_KEY: &str = "local_profile";

// =============================================================================
// Session Configuration
// =============================================================================

/// Session time-to-live in milliseconds (30 minutes).
pub const SESSION_TTL_MS: i64 = 30 * 60 * 1000;

// =============================================================================
// Audit Configuration
// =============================================================================

/// Maximum number of audit entries retained; oldest are silently dropped.
pub const MAX_AUDIT_ENTRIES: usize = 100;

// =============================================================================
// Rate Limiting
// =============================================================================

/// Rate-limit defaults per gated action.
pub mod rate_limits {
    /// Maximum document creations per window.
    pub const CREATE_POST_MAX: usize = 5;
    /// Document creation window in milliseconds (5 minutes).
    pub const CREATE_POST_WINDOW_MS: i64 = 5 * 60 * 1000;
    /// Maximum login attempts per window.
    pub const LOGIN_MAX: usize = 5;
    /// Login attempt window in milliseconds (1 minute).
    pub const LOGIN_WINDOW_MS: i64 = 60 * 1000;
}

// =============================================================================
// Content Limits
// =============================================================================

/// Maximum document body length in characters.
pub const MAX_BODY_CHARS: usize = 50_000;

/// Maximum slug length in characters.
pub const MAX_SLUG_LEN: usize = 100;

// =============================================================================
// Image Hosting
// =============================================================================

/// Domains trusted to serve document images.
///
/// URLs from other hosts are accepted but flagged with a warning.
pub const TRUSTED_IMAGE_DOMAINS: &[&str] = &[
    "images.unsplash.com",
    "cdn.pixabay.com",
    "images.pexels.com",
    "i.imgur.com",
    "github.com",
    "githubusercontent.com",
    "cloudinary.com",
    "amazonaws.com",
];
