//! Utility modules for content transformation and validation.
//!
//! Provides:
//! - [`markdown`] - markdown-to-HTML rendering and plain-text extraction
//! - [`generate_slug`] - deterministic slug derivation from titles
//! - [`validate_image_url`] - HTTPS-and-allowlist image URL validation

pub mod markdown;
mod slug;
mod url;

pub use slug::generate_slug;
pub use url::{ImageUrlError, ImageUrlValidation, validate_image_url};
