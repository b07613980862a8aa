//! Slide parser: one markdown slide block into a [`SlideRecord`].
//!
//! Lines are classified into a [`LineKind`] and folded into the record.
//! Fenced code blocks bypass classification and land in the body verbatim
//! (after inline stripping).

use regex::Regex;
use std::sync::LazyLock;

use crate::normalize::TextNormalizer;
use crate::types::SlideRecord;

/// `<!-- ... -->`, possibly spanning lines.
static HTML_COMMENT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->").unwrap());

static HEADING_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#{1,6}\s+(.+)$").unwrap());

static UNORDERED_ITEM_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-*+]\s+(.+)$").unwrap());

static ORDERED_ITEM_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.\s+(.+)$").unwrap());

static IMAGE_ALT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^!\[([^\]]*)\]").unwrap());

/// Opening or closing code fence (an info string may follow).
const CODE_FENCE: &str = "```";

/// Prefix for image placeholders in the body.
const IMAGE_TAG: &str = "[Image]";

/// Alt text used when the image syntax is too broken to read one.
const DEFAULT_IMAGE_ALT: &str = "image";

/// Syntactic role of a trimmed, non-blank line outside code blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// `# Heading` (levels 1-6); holds the heading text.
    Heading(&'a str),
    /// `- item`, `* item` or `+ item`; holds the item text.
    UnorderedItem(&'a str),
    /// `1. item`; holds the item text.
    OrderedItem(&'a str),
    /// A line starting with `![`; holds the alt text when it could be read.
    Image(Option<&'a str>),
    /// Anything else; holds the whole line.
    Plain(&'a str),
}

impl<'a> LineKind<'a> {
    /// Classify a trimmed line. The first matching pattern wins.
    pub fn classify(line: &'a str) -> Self {
        let capture = |regex: &Regex| {
            regex
                .captures(line)
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str())
        };

        if let Some(text) = capture(&HEADING_REGEX) {
            Self::Heading(text)
        } else if let Some(text) = capture(&UNORDERED_ITEM_REGEX) {
            Self::UnorderedItem(text)
        } else if let Some(text) = capture(&ORDERED_ITEM_REGEX) {
            Self::OrderedItem(text)
        } else if line.starts_with("![") {
            Self::Image(capture(&IMAGE_ALT_REGEX))
        } else {
            Self::Plain(line)
        }
    }
}

/// Parser for individual slide blocks.
#[derive(Debug, Clone, Default)]
pub struct SlideParser {
    normalizer: TextNormalizer,
}

impl SlideParser {
    /// Create a new slide parser.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse one slide block into its title, bullets and body.
    ///
    /// Never fails: anything that is not a heading, list item or image ends
    /// up as body text. When no heading is found the first body line is
    /// promoted to the title.
    pub fn parse(&self, block: &str) -> SlideRecord {
        let without_comments = HTML_COMMENT_REGEX.replace_all(block, "");

        let state = without_comments
            .lines()
            .fold(ParseState::default(), |state, line| self.consume(state, line));

        let mut slide = state.slide;
        if slide.title.is_empty() && !slide.body.is_empty() {
            slide.title = slide.body.remove(0);
        }

        log::debug!(
            "Parsed slide {:?}: {} bullets, {} body lines",
            slide.title,
            slide.bullets.len(),
            slide.body.len()
        );
        slide
    }

    /// Fold one raw line into the parse state.
    fn consume(&self, mut state: ParseState, raw_line: &str) -> ParseState {
        let line = raw_line.trim();
        if line.is_empty() {
            return state;
        }

        if line.starts_with(CODE_FENCE) {
            state.in_code_block = !state.in_code_block;
            return state;
        }

        if state.in_code_block {
            push_non_empty(&mut state.slide.body, self.normalizer.normalize_line(raw_line));
            return state;
        }

        match LineKind::classify(line) {
            LineKind::Heading(text) => {
                if state.slide.title.is_empty() {
                    state.slide.title = self.normalizer.normalize_line(text);
                } else {
                    log::trace!("Dropping extra heading: {}", line);
                }
            }
            LineKind::UnorderedItem(text) | LineKind::OrderedItem(text) => {
                push_non_empty(&mut state.slide.bullets, self.normalizer.normalize_line(text));
            }
            LineKind::Image(alt) => {
                let alt = match alt {
                    Some(alt) => self.normalizer.normalize_line(alt),
                    None => DEFAULT_IMAGE_ALT.to_string(),
                };
                let tag = format!("{} {}", IMAGE_TAG, alt);
                state.slide.body.push(tag.trim_end().to_string());
            }
            LineKind::Plain(text) => {
                push_non_empty(&mut state.slide.body, self.normalizer.normalize_line(text));
            }
        }

        state
    }
}

/// Accumulator threaded through the line fold.
#[derive(Debug, Default)]
struct ParseState {
    slide: SlideRecord,
    in_code_block: bool,
}

fn push_non_empty(lines: &mut Vec<String>, text: String) {
    if !text.is_empty() {
        lines.push(text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(block: &str) -> SlideRecord {
        SlideParser::new().parse(block)
    }

    #[test]
    fn test_classify_lines() {
        assert_eq!(LineKind::classify("# Title"), LineKind::Heading("Title"));
        assert_eq!(LineKind::classify("###### Deep"), LineKind::Heading("Deep"));
        assert_eq!(
            LineKind::classify("####### Too deep"),
            LineKind::Plain("####### Too deep")
        );
        assert_eq!(LineKind::classify("#hashtag"), LineKind::Plain("#hashtag"));
        assert_eq!(LineKind::classify("- item"), LineKind::UnorderedItem("item"));
        assert_eq!(LineKind::classify("* item"), LineKind::UnorderedItem("item"));
        assert_eq!(LineKind::classify("+ item"), LineKind::UnorderedItem("item"));
        assert_eq!(LineKind::classify("12. item"), LineKind::OrderedItem("item"));
        assert_eq!(LineKind::classify("![alt](a.png)"), LineKind::Image(Some("alt")));
        assert_eq!(LineKind::classify("![broken"), LineKind::Image(None));
        assert_eq!(LineKind::classify("just text"), LineKind::Plain("just text"));
    }

    #[test]
    fn test_title_bullets_body() {
        let slide = parse("# Title\n- one\n- two\nplain text");
        assert_eq!(
            slide,
            SlideRecord {
                title: "Title".into(),
                bullets: vec!["one".into(), "two".into()],
                body: vec!["plain text".into()],
            }
        );
    }

    #[test]
    fn test_title_promotion() {
        let slide = parse("Just a line\nsecond line");
        assert_eq!(slide.title, "Just a line");
        assert!(slide.bullets.is_empty());
        assert_eq!(slide.body, vec!["second line"]);
    }

    #[test]
    fn test_bullets_only_keeps_empty_title() {
        let slide = parse("- a\n- b");
        assert_eq!(slide.title, "");
        assert_eq!(slide.bullets, vec!["a", "b"]);
        assert!(slide.body.is_empty());
    }

    #[test]
    fn test_only_first_heading_is_title() {
        let slide = parse("# First\n## Second\ntext");
        assert_eq!(slide.title, "First");
        assert_eq!(slide.body, vec!["text"]);
    }

    #[test]
    fn test_heading_after_body_still_becomes_title() {
        let slide = parse("intro\n# Late Title");
        assert_eq!(slide.title, "Late Title");
        assert_eq!(slide.body, vec!["intro"]);
    }

    #[test]
    fn test_inline_markdown_stripped() {
        let slide = parse("# **Bold** [Title](http://x)\n- *em* item\n1. `code` step");
        assert_eq!(slide.title, "Bold Title");
        assert_eq!(slide.bullets, vec!["em item", "code step"]);
    }

    #[test]
    fn test_html_comments_removed() {
        let slide = parse("# Title\n<!-- speaker\nnotes -->\nvisible <!-- inline --> text");
        assert_eq!(slide.title, "Title");
        assert_eq!(slide.body, vec!["visible text"]);
    }

    #[test]
    fn test_code_block_lines_go_to_body() {
        let slide = parse("# Code\n```rust\nlet x = 1;\n# not a heading\n- not a bullet\n```\nafter");
        assert_eq!(slide.title, "Code");
        assert!(slide.bullets.is_empty());
        assert_eq!(
            slide.body,
            vec!["let x = 1;", "# not a heading", "- not a bullet", "after"]
        );
    }

    #[test]
    fn test_unclosed_code_block() {
        let slide = parse("# T\n```\n- inside");
        assert!(slide.bullets.is_empty());
        assert_eq!(slide.body, vec!["- inside"]);
    }

    #[test]
    fn test_image_lines() {
        let slide = parse("# Pics\n![Architecture **diagram**](a.png)\n![oops");
        assert_eq!(slide.body, vec!["[Image] Architecture diagram", "[Image] image"]);
    }

    #[test]
    fn test_image_with_blank_alt_keeps_bare_tag() {
        let slide = parse("# T\n![](b.png)\n![**](c.png)");
        assert_eq!(slide.body, vec!["[Image]", "[Image]"]);
    }

    #[test]
    fn test_empty_items_filtered() {
        let slide = parse("# T\n- **\n* * *\n<br>");
        assert!(slide.bullets.is_empty());
        assert!(slide.body.is_empty());
    }

    #[test]
    fn test_degenerate_slide() {
        let slide = parse("<!-- only a comment -->");
        assert!(slide.is_empty());
    }

    #[test]
    fn test_crlf_lines() {
        let slide = parse("# Title\r\n- one\r\ntext\r\n");
        assert_eq!(slide.title, "Title");
        assert_eq!(slide.bullets, vec!["one"]);
        assert_eq!(slide.body, vec!["text"]);
    }
}
