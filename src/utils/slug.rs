//! URL slug derivation from document titles.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::config::MAX_SLUG_LEN;

/// Derive a URL-friendly slug from a title.
///
/// Deterministic: NFKD-decompose (so accented letters reduce to their ASCII
/// base), lowercase, strip everything that is not alphanumeric, turn
/// whitespace and hyphen runs into single hyphens, trim edge hyphens, and
/// truncate to [`MAX_SLUG_LEN`].
pub fn generate_slug(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_hyphen = false;

    for c in title.nfkd() {
        if is_combining_mark(c) {
            continue;
        }
        let c = c.to_ascii_lowercase();
        if c.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c);
        } else if c.is_whitespace() || c == '-' {
            pending_hyphen = true;
        }
        // Everything else (punctuation, symbols) is dropped without
        // breaking the current word.
    }

    slug.truncate(MAX_SLUG_LEN);
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}
