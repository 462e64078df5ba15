//! Image URL validation.
//!
//! Post images must be served over HTTPS. Hosts outside the trusted-domain
//! list are accepted but flagged, so an author can still link an unusual
//! host while the audit trail shows it.

use crate::config::TRUSTED_IMAGE_DOMAINS;

/// Result of validating an image URL.
#[derive(Debug, Clone, PartialEq)]
pub enum ImageUrlValidation {
    /// URL is acceptable. `trusted` is false when the host is outside the
    /// allowlist.
    Valid { trusted: bool },
    /// URL was rejected.
    Invalid(ImageUrlError),
}

/// Reasons an image URL is rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageUrlError {
    /// Only `https://` URLs are accepted.
    NotHttps,
    /// URL has no host component.
    NoHost,
}

impl std::fmt::Display for ImageUrlError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotHttps => write!(f, "image URL must use https://"),
            Self::NoHost => write!(f, "image URL has no host"),
        }
    }
}

impl std::error::Error for ImageUrlError {}

/// Validate an image URL.
///
/// An empty URL is valid (the field is optional). Otherwise the URL must
/// use the `https` scheme and carry a host. Unknown hosts stay valid but
/// emit a warning.
pub fn validate_image_url(url: &str) -> ImageUrlValidation {
    let url = url.trim();

    if url.is_empty() {
        return ImageUrlValidation::Valid { trusted: true };
    }

    if !url.to_lowercase().starts_with("https://") {
        return ImageUrlValidation::Invalid(ImageUrlError::NotHttps);
    }

    let Some(host) = extract_host(url) else {
        return ImageUrlValidation::Invalid(ImageUrlError::NoHost);
    };

    let trusted = is_domain_trusted(&host);
    if !trusted {
        tracing::warn!(host = %host, "image URL from untrusted domain");
    }

    ImageUrlValidation::Valid { trusted }
}

/// Extract the host from an `https://` URL.
fn extract_host(url: &str) -> Option<String> {
    let scheme = url.get(..8)?;
    if !scheme.eq_ignore_ascii_case("https://") {
        return None;
    }
    let without_scheme = &url[8..];

    // Host part ends at the first path separator; ports and a leading
    // www. are not part of the matched domain.
    let host_part = without_scheme.split('/').next()?;
    let host = host_part.split(':').next()?;
    let host = host.strip_prefix("www.").unwrap_or(host);

    if host.is_empty() {
        return None;
    }

    Some(host.to_lowercase())
}

/// Exact or subdomain match against [`TRUSTED_IMAGE_DOMAINS`].
fn is_domain_trusted(host: &str) -> bool {
    TRUSTED_IMAGE_DOMAINS
        .iter()
        .any(|domain| host == *domain || host.ends_with(&format!(".{domain}")))
}
