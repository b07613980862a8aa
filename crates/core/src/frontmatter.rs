//! YAML front matter extraction from markdown decks.
//!
//! Front matter is metadata at the very start of the document, delimited by
//! `---` lines:
//!
//! ```markdown
//! ---
//! backgroundColor: "#1e293b"
//! header: Quarterly Review
//! paginate: true
//! ---
//!
//! # First slide
//! ```
//!
//! # Usage
//!
//! ```rust
//! use slidemd_core::frontmatter::extract_frontmatter;
//!
//! let doc = extract_frontmatter("---\nheader: Intro\n---\n# Slide");
//! assert_eq!(doc.metadata.get_str("header"), Some("Intro"));
//! assert_eq!(doc.body.trim(), "# Slide");
//! ```

use serde_yaml::Value;

use crate::types::{Document, Metadata};

const DELIMITER: &str = "---";

/// Split a document into front matter metadata and body.
///
/// # Behavior
///
/// - No `---` on the first line: no metadata, the whole text is the body
/// - Opening `---` without a closing `---` line: same as no front matter
/// - YAML that fails to parse, or is not a mapping: logs a warning, empty
///   metadata, body starts after the closing delimiter
pub fn extract_frontmatter(source: &str) -> Document {
    let source = source.trim_start_matches('\u{feff}');

    let Some((yaml, body)) = split_frontmatter(source) else {
        return Document::new(Metadata::new(), source);
    };

    let metadata = match serde_yaml::from_str::<Value>(yaml) {
        Ok(value @ (Value::Mapping(_) | Value::Null)) => Metadata::from_yaml(value),
        Ok(_) => {
            log::warn!("Front matter is not a key/value mapping; ignoring it");
            Metadata::new()
        }
        Err(e) => {
            log::warn!("Failed to parse front matter YAML: {}", e);
            Metadata::new()
        }
    };

    Document::new(metadata, body)
}

/// Locate the YAML text and the body that follows it.
fn split_frontmatter(source: &str) -> Option<(&str, &str)> {
    let mut lines = source.split_inclusive('\n');

    let first = lines.next()?;
    if first.trim_end() != DELIMITER {
        return None;
    }

    let yaml_start = first.len();
    let mut offset = yaml_start;
    for line in lines {
        if line.trim() == DELIMITER {
            let yaml = &source[yaml_start..offset];
            let body = &source[offset + line.len()..];
            return Some((yaml, body));
        }
        offset += line.len();
    }

    log::warn!("Front matter opening delimiter found but no closing delimiter");
    None
}
