//! Input sanitization for user-supplied text.
//!
//! Strips `<script>` blocks, `javascript:` schemes, and inline event
//! handler attributes, then escapes any remaining angle brackets. Applied
//! to every free-text field (title, body, excerpt, tag, image URL) before
//! it reaches the store or the renderer.

use once_cell::sync::Lazy;
use regex::Regex;

static SCRIPT_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<script\b.*?</script>").expect("valid script pattern"));

static JS_SCHEME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)javascript:").expect("valid scheme pattern"));

static EVENT_HANDLER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)on\w+\s*=").expect("valid handler pattern"));

/// Sanitize a user-supplied string.
///
/// The output contains no `<script>...</script>` span, no `javascript:`
/// scheme, no inline `on*=` handler, and every remaining `<` / `>` escaped
/// to an entity. Pure and idempotent: `sanitize(sanitize(x)) == sanitize(x)`.
pub fn sanitize(input: &str) -> String {
    let mut text = input.trim().to_string();

    // Strip to a fixpoint: removing one match can splice surrounding text
    // into a new match, which must not survive a single call.
    loop {
        let stripped = SCRIPT_BLOCK.replace_all(&text, "");
        let stripped = JS_SCHEME.replace_all(&stripped, "");
        let stripped = EVENT_HANDLER.replace_all(&stripped, "").into_owned();
        if stripped == text {
            break;
        }
        text = stripped;
    }

    text.replace('<', "&lt;").replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_script_blocks() {
        let out = sanitize("hello <script>alert('xss')</script> world");
        assert!(!out.to_lowercase().contains("<script"));
        assert!(out.contains("hello"));
        assert!(out.contains("world"));
    }

    #[test]
    fn test_strips_script_blocks_case_insensitive() {
        let out = sanitize("<SCRIPT src=x>payload</SCRIPT>");
        assert!(!out.to_lowercase().contains("<script"));
        assert!(!out.contains("payload"));
    }

    #[test]
    fn test_strips_javascript_scheme() {
        assert_eq!(sanitize("JavaScript:alert(1)"), "alert(1)");
    }

    #[test]
    fn test_strips_event_handlers() {
        let out = sanitize("<img src=x onerror=alert(1)>");
        assert!(!out.contains("onerror"));
        assert_eq!(out, "&lt;img src=x alert(1)&gt;");
    }

    #[test]
    fn test_escapes_angle_brackets() {
        assert_eq!(sanitize("a < b > c"), "a &lt; b &gt; c");
        assert_eq!(sanitize("<b>bold</b>"), "&lt;b&gt;bold&lt;/b&gt;");
    }

    #[test]
    fn test_trims_whitespace() {
        assert_eq!(sanitize("  plain  "), "plain");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(sanitize(""), "");
    }

    #[test]
    fn test_idempotent() {
        let inputs = [
            "plain text",
            "hello <script>alert(1)</script>",
            "a < b > c",
            "javascript:void(0)",
            "<img onload=x>",
            "&lt;already escaped&gt;",
        ];
        for input in inputs {
            let once = sanitize(input);
            assert_eq!(sanitize(&once), once, "not idempotent for {input:?}");
        }
    }

    #[test]
    fn test_recombined_fragments_do_not_survive() {
        // Removing the embedded handler splices the rest into a scheme.
        let out = sanitize("javasonload=cript:alert(1)");
        assert!(!out.to_lowercase().contains("javascript:"));
    }

    #[test]
    fn test_unterminated_script_is_escaped() {
        let out = sanitize("<script>no closing tag");
        assert!(!out.contains("<script"));
        assert_eq!(out, "&lt;script&gt;no closing tag");
    }
}
