//! Inline markdown stripping for slide text.
//!
//! Turns a line of markdown into plain text: images and links keep their
//! visible text, emphasis markers and HTML tags are removed, escapes are
//! resolved, and whitespace is collapsed.

use regex::Regex;
use std::sync::LazyLock;

/// `![alt](url)` image references.
static IMAGE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[([^\]]*)\]\([^)]+\)").unwrap());

/// `[text](url)` links.
static LINK_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\([^)]+\)").unwrap());

/// Code, emphasis and strikethrough markers.
static EMPHASIS_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[`*_~]").unwrap());

/// Opening and closing HTML tags.
static HTML_TAG_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"</?[^>]+>").unwrap());

/// Backslash-escaped markdown punctuation.
static ESCAPE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\([`*_{}\[\]()#+\-.!])").unwrap());

/// Runs of any whitespace, newlines included.
static WHITESPACE_COLLAPSE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Strips inline markdown from single lines of slide text.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextNormalizer;

impl TextNormalizer {
    /// Create a new text normalizer.
    pub fn new() -> Self {
        Self
    }

    /// Normalize a single line of markdown into plain text.
    ///
    /// - `![alt](url)` becomes `alt`, `[text](url)` becomes `text`
    /// - `` ` ``, `*`, `_` and `~` are deleted
    /// - HTML tags are deleted
    /// - backslash escapes are resolved (`\#` becomes `#`)
    /// - whitespace runs collapse to one space, ends are trimmed
    ///
    /// Unescaping can expose new link syntax (`\[a\]\(u\)`), so the pass is
    /// repeated until the text stops changing. Every pass either shrinks the
    /// text or leaves it untouched apart from whitespace, so this terminates.
    pub fn normalize_line(&self, text: &str) -> String {
        let mut current = strip_inline_markdown(text);
        loop {
            let next = strip_inline_markdown(&current);
            if next == current {
                return current;
            }
            current = next;
        }
    }
}

/// One stripping pass, in the fixed order images, links, markers, tags,
/// escapes, whitespace.
fn strip_inline_markdown(text: &str) -> String {
    let text = IMAGE_REGEX.replace_all(text, "$1");
    let text = LINK_REGEX.replace_all(&text, "$1");
    let text = EMPHASIS_REGEX.replace_all(&text, "");
    let text = HTML_TAG_REGEX.replace_all(&text, "");
    let text = ESCAPE_REGEX.replace_all(&text, "$1");
    let text = WHITESPACE_COLLAPSE_REGEX.replace_all(&text, " ");
    text.trim().to_string()
}
