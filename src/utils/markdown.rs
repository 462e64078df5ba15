//! Markdown rendering for blog content.
//!
//! Converts a constrained markdown dialect to HTML through ordered
//! sequential substitution rather than a real parser. Fenced code is
//! isolated behind placeholder tokens before any other transform runs, so
//! markdown syntax inside a sample is never reinterpreted. The sequential
//! approach has known limits (no escape for literal asterisks, no nested
//! structures); those are accepted, not worked around.
//!
//! [`extract_plain_text`] strips the same constructs to produce an
//! excerpt-safe plain string.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static FENCED_CODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)```(\w+)?\n(.*?)```").expect("valid fence pattern"));

static HEADING_3: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^### (.*)$").expect("valid heading pattern"));
static HEADING_2: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^## (.*)$").expect("valid heading pattern"));
static HEADING_1: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^# (.*)$").expect("valid heading pattern"));

static BOLD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*(.*?)\*\*").expect("valid bold pattern"));
static ITALIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*(.*?)\*").expect("valid italic pattern"));
static INLINE_CODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"`([^`]+)`").expect("valid inline code pattern"));

static IMAGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"!\[(.*?)\]\((.*?)\)(?:\{(.*?)\})?").expect("valid image pattern"));
static LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").expect("valid link pattern"));

static PARAGRAPH_BREAK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\r?\n\r?\n+").expect("valid paragraph pattern"));
static LINE_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\r?\n").expect("valid newline pattern"));

static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"__CODE_BLOCK_(\d+)__").expect("valid placeholder pattern"));
static PLACEHOLDER_ONLY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^__CODE_BLOCK_\d+__$").expect("valid placeholder pattern"));

// Stripping patterns for plain-text extraction. The fence pattern here is
// looser than the renderer's: extraction drops any fenced span, even one
// without a language line.
static ANY_FENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)```.*?```").expect("valid fence pattern"));
static HEADING_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^#{1,6}\s+").expect("valid heading pattern"));
static NEWLINE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n+").expect("valid newline pattern"));

/// Render markdown to HTML. Empty input renders to an empty string.
///
/// Transform order matters and is part of the contract: fenced code is
/// extracted first, then headings (deepest prefix first), bold before
/// italic, inline code, images before links, then paragraph segmentation
/// and placeholder resolution.
pub fn render(markdown: &str) -> String {
    if markdown.is_empty() {
        return String::new();
    }

    // 1. Isolate fenced code behind placeholder tokens.
    let mut code_blocks: Vec<String> = Vec::new();
    let text = FENCED_CODE
        .replace_all(markdown, |caps: &Captures| {
            let language = caps.get(1).map_or("text", |m| m.as_str());
            let code = caps.get(2).map_or("", |m| m.as_str()).trim();
            let index = code_blocks.len();
            code_blocks.push(code_block_html(index, language, &escape_html(code)));
            format!("__CODE_BLOCK_{index}__")
        })
        .into_owned();

    // 2. Headings, three levels only. A deeper prefix like #### matches no
    //    pattern and stays plain text.
    let text = HEADING_3
        .replace_all(&text, r#"<h3 class="text-lg font-semibold mb-2 mt-4">${1}</h3>"#)
        .into_owned();
    let text = HEADING_2
        .replace_all(&text, r#"<h2 class="text-xl font-bold mb-3 mt-6">${1}</h2>"#)
        .into_owned();
    let text = HEADING_1
        .replace_all(&text, r#"<h1 class="text-2xl font-bold mb-4 mt-8">${1}</h1>"#)
        .into_owned();

    // 3. Inline emphasis and code. Placeholders contain no backticks or
    //    asterisks, so they pass through untouched.
    let text = BOLD
        .replace_all(&text, r#"<strong class="font-semibold">${1}</strong>"#)
        .into_owned();
    let text = ITALIC
        .replace_all(&text, r#"<em class="italic">${1}</em>"#)
        .into_owned();
    let text = INLINE_CODE
        .replace_all(
            &text,
            r#"<code class="bg-muted px-1 py-0.5 rounded text-sm font-mono">${1}</code>"#,
        )
        .into_owned();

    // 4. Images with an optional {caption} suffix, before links so the
    //    bracket syntax is not consumed as an anchor.
    let text = IMAGE
        .replace_all(&text, |caps: &Captures| {
            let alt = caps.get(1).map_or("", |m| m.as_str());
            let src = caps.get(2).map_or("", |m| m.as_str());
            figure_html(src, alt, caps.get(3).map(|m| m.as_str()))
        })
        .into_owned();

    // 5. Links open in a new tab without an opener reference.
    let text = LINK
        .replace_all(
            &text,
            r#"<a href="${2}" class="text-primary hover:underline" target="_blank" rel="noopener noreferrer">${1}</a>"#,
        )
        .into_owned();

    // 6. Paragraph segmentation on blank lines. A segment that is exactly a
    //    placeholder token passes through unwrapped; inside a normal
    //    paragraph, single newlines become explicit breaks.
    let mut html = String::new();
    for part in PARAGRAPH_BREAK.split(&text) {
        let trimmed = part.trim();
        if trimmed.is_empty() {
            continue;
        }
        if PLACEHOLDER_ONLY.is_match(trimmed) {
            html.push_str(trimmed);
            continue;
        }
        let with_breaks = LINE_BREAK.replace_all(trimmed, "<br>");
        html.push_str(r#"<p class="mb-4">"#);
        html.push_str(&with_breaks);
        html.push_str("</p>");
    }

    // 7. Resolve placeholders; an index with no stored block resolves to
    //    nothing.
    let html = PLACEHOLDER
        .replace_all(&html, |caps: &Captures| {
            caps[1]
                .parse::<usize>()
                .ok()
                .and_then(|index| code_blocks.get(index).cloned())
                .unwrap_or_default()
        })
        .into_owned();

    // 8. Drop paragraphs that resolved to nothing.
    html.replace(r#"<p class="mb-4"></p>"#, "")
}

/// Extract plain text from markdown for excerpts.
///
/// Strips fenced and inline code, heading prefixes, emphasis markers, and
/// links (keeping the link text, dropping the URL), then collapses newline
/// runs into single spaces.
pub fn extract_plain_text(markdown: &str) -> String {
    if markdown.is_empty() {
        return String::new();
    }

    let text = ANY_FENCE.replace_all(markdown, "");
    let text = INLINE_CODE.replace_all(&text, "");
    let text = HEADING_PREFIX.replace_all(&text, "");
    let text = BOLD.replace_all(&text, "${1}");
    let text = ITALIC.replace_all(&text, "${1}");
    let text = LINK.replace_all(&text, "${1}");
    NEWLINE_RUN.replace_all(&text, " ").trim().to_string()
}

/// Escape a code sample for literal display.
fn escape_html(code: &str) -> String {
    code.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#039;")
}

/// Labeled, copy-button-equipped container for a fenced code block.
///
/// Ids are deterministic per render (`code-block-<n>`) so the copy button
/// can address its code element.
fn code_block_html(index: usize, language: &str, escaped_code: &str) -> String {
    let code_id = format!("code-block-{index}");
    format!(
        concat!(
            r#"<div class="relative group code-block-container">"#,
            r#"<div class="absolute right-2 top-2 opacity-0 group-hover:opacity-100 transition-opacity">"#,
            r#"<button class="bg-primary text-primary-foreground hover:bg-primary/90 px-2 py-1 rounded text-xs font-medium copy-code-button" data-code-id="{id}" aria-label="Copy code to clipboard">Copy</button>"#,
            r#"</div>"#,
            r#"<div class="flex items-center justify-between bg-muted/50 px-4 py-1 text-xs font-mono border-b border-border/30 rounded-t-md"><span>{lang}</span></div>"#,
            r#"<pre class="bg-muted p-4 rounded-b-md my-0 overflow-x-auto"><code id="{id}" class="font-mono text-sm">{code}</code></pre>"#,
            r#"</div>"#
        ),
        id = code_id,
        lang = language,
        code = escaped_code,
    )
}

/// Figure element with a lazy-loaded image and optional caption.
fn figure_html(src: &str, alt: &str, caption: Option<&str>) -> String {
    let caption = caption.map_or(String::new(), |c| {
        format!(
            r#"<figcaption class="text-center text-sm text-muted-foreground mt-2">{c}</figcaption>"#
        )
    });
    format!(
        r#"<figure class="my-6"><img src="{src}" alt="{alt}" class="rounded-lg shadow-md max-w-full mx-auto" loading="lazy" />{caption}</figure>"#
    )
}
