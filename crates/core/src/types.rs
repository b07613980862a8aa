//! Domain types for parsed decks and per-slide render options.

use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use std::collections::BTreeMap;

use crate::color::{normalize_color, Palette, DEFAULT_BACKGROUND};

/// A loaded markdown document: front matter metadata plus body text.
#[derive(Debug, Clone, Default)]
pub struct Document {
    /// Parsed front matter (empty when the document has none).
    pub metadata: Metadata,

    /// Markdown after the front matter block.
    pub body: String,
}

impl Document {
    /// Create a document from its parts.
    pub fn new(metadata: Metadata, body: impl Into<String>) -> Self {
        Self {
            metadata,
            body: body.into(),
        }
    }
}

/// Front matter keys mapped to their YAML values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Metadata {
    values: BTreeMap<String, Value>,
}

impl Metadata {
    /// Metadata with no keys.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build metadata from a YAML value. Non-mapping values and non-string
    /// keys are ignored.
    pub fn from_yaml(value: Value) -> Self {
        let values = match value {
            Value::Mapping(mapping) => mapping
                .into_iter()
                .filter_map(|(key, value)| match key {
                    Value::String(key) => Some((key, value)),
                    _ => None,
                })
                .collect(),
            _ => BTreeMap::new(),
        };
        Self { values }
    }

    /// Raw YAML value for a key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Check whether any keys are present.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// String value for a key. Other scalar types are not converted.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key)?.as_str()
    }

    /// Scalar value rendered as text, for display strings like headers.
    ///
    /// Strings, numbers and `true` are accepted. Blank strings, `false` and
    /// zero count as absent.
    pub fn get_text(&self, key: &str) -> Option<String> {
        match self.get(key)? {
            Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
            Value::Number(n) if n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()) => {
                Some(n.to_string())
            }
            Value::Bool(true) => Some(true.to_string()),
            _ => None,
        }
    }

    /// Boolean-ish flag.
    ///
    /// Booleans are taken as is, numbers are true when non-zero, and strings
    /// are true unless empty or one of `false`, `no`, `off`, `0`.
    pub fn get_flag(&self, key: &str) -> bool {
        match self.get(key) {
            Some(Value::Bool(b)) => *b,
            Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
            Some(Value::String(s)) => {
                let s = s.trim().to_ascii_lowercase();
                !matches!(s.as_str(), "" | "false" | "no" | "off" | "0")
            }
            _ => false,
        }
    }
}

/// The structured content of one slide.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlideRecord {
    /// First heading, or the promoted first body line. May be empty.
    pub title: String,

    /// List items in source order, never empty strings.
    pub bullets: Vec<String>,

    /// Paragraph and code lines in source order, never empty strings.
    pub body: Vec<String>,
}

impl SlideRecord {
    /// Check whether the slide carries no content at all.
    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.bullets.is_empty() && self.body.is_empty()
    }
}

/// Presentation-level options for laying out one slide.
///
/// Everything except the slide position is derived once per document.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    /// Canonical 6-digit hex background color.
    pub background_color: String,

    /// Color for title, bullets and body.
    pub text_color: String,

    /// Color for header, footer and page number.
    pub sub_text_color: String,

    /// Header text shown at the top of every slide.
    pub header: Option<String>,

    /// Footer text shown at the bottom of every slide.
    pub footer: Option<String>,

    /// Whether to show `n/total` page numbers.
    pub paginate: bool,

    /// 0-based index of the slide being rendered.
    pub slide_index: usize,

    /// Number of slides in the deck.
    pub total_slides: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::with_background(DEFAULT_BACKGROUND)
    }
}

impl RenderOptions {
    /// Options for a background color with no header, footer or pagination.
    pub fn with_background(background_color: &str) -> Self {
        let background_color = normalize_color(Some(background_color), DEFAULT_BACKGROUND);
        let palette = Palette::for_background(&background_color);
        Self {
            background_color,
            text_color: palette.text.to_string(),
            sub_text_color: palette.sub_text.to_string(),
            header: None,
            footer: None,
            paginate: false,
            slide_index: 0,
            total_slides: 1,
        }
    }

    /// Derive options from document front matter.
    ///
    /// Reads `backgroundColor`, `header`, `footer` and `paginate`.
    pub fn from_metadata(metadata: &Metadata) -> Self {
        let background_color = normalize_color(metadata.get_str("backgroundColor"), DEFAULT_BACKGROUND);
        Self {
            header: metadata.get_text("header"),
            footer: metadata.get_text("footer"),
            paginate: metadata.get_flag("paginate"),
            ..Self::with_background(&background_color)
        }
    }

    /// Copy of these options positioned at a slide.
    pub fn at_slide(&self, slide_index: usize, total_slides: usize) -> Self {
        Self {
            slide_index,
            total_slides,
            ..self.clone()
        }
    }

    /// Page indicator such as `2/3`.
    pub fn page_label(&self) -> String {
        format!("{}/{}", self.slide_index + 1, self.total_slides)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metadata(yaml: &str) -> Metadata {
        Metadata::from_yaml(serde_yaml::from_str(yaml).unwrap())
    }

    #[test]
    fn test_metadata_ignores_non_mapping() {
        assert!(Metadata::from_yaml(Value::String("text".into())).is_empty());
        assert!(Metadata::from_yaml(Value::Null).is_empty());
    }

    #[test]
    fn test_get_str_only_strings() {
        let meta = metadata("backgroundColor: fff\nnumber: 123456");
        assert_eq!(meta.get_str("backgroundColor"), Some("fff"));
        assert_eq!(meta.get_str("number"), None);
        assert_eq!(meta.get_str("missing"), None);
    }

    #[test]
    fn test_get_text_scalars() {
        let meta = metadata("header: Team Sync\nfooter: 2024\nblank: '  '\nlist: [a]");
        assert_eq!(meta.get_text("header"), Some("Team Sync".to_string()));
        assert_eq!(meta.get_text("footer"), Some("2024".to_string()));
        assert_eq!(meta.get_text("blank"), None);
        assert_eq!(meta.get_text("list"), None);
    }

    #[test]
    fn test_get_text_falsy_scalars_are_absent() {
        let meta = metadata("header: false\nfooter: 0\nzero: 0.0\non: true");
        assert_eq!(meta.get_text("header"), None);
        assert_eq!(meta.get_text("footer"), None);
        assert_eq!(meta.get_text("zero"), None);
        assert_eq!(meta.get_text("on"), Some("true".to_string()));

        let options = RenderOptions::from_metadata(&meta);
        assert_eq!(options.header, None);
        assert_eq!(options.footer, None);
    }

    #[test]
    fn test_get_flag() {
        let meta = metadata(
            "a: true\nb: false\nc: 1\nd: 0\ne: 'yes'\nf: 'false'\ng: 'Off'\nh: ''\ni: ~",
        );
        assert!(meta.get_flag("a"));
        assert!(!meta.get_flag("b"));
        assert!(meta.get_flag("c"));
        assert!(!meta.get_flag("d"));
        assert!(meta.get_flag("e"));
        assert!(!meta.get_flag("f"));
        assert!(!meta.get_flag("g"));
        assert!(!meta.get_flag("h"));
        assert!(!meta.get_flag("i"));
        assert!(!meta.get_flag("missing"));
    }

    #[test]
    fn test_render_options_defaults() {
        let options = RenderOptions::from_metadata(&Metadata::new());
        assert_eq!(options.background_color, "FFFFFF");
        assert_eq!(options.text_color, "111827");
        assert_eq!(options.sub_text_color, "6B7280");
        assert_eq!(options.header, None);
        assert_eq!(options.footer, None);
        assert!(!options.paginate);
    }

    #[test]
    fn test_render_options_dark_background() {
        let meta = metadata("backgroundColor: '#123'\nheader: Intro\npaginate: true");
        let options = RenderOptions::from_metadata(&meta);
        assert_eq!(options.background_color, "112233");
        assert_eq!(options.text_color, "F9FAFB");
        assert_eq!(options.sub_text_color, "D1D5DB");
        assert_eq!(options.header.as_deref(), Some("Intro"));
        assert!(options.paginate);
    }

    #[test]
    fn test_page_label() {
        let options = RenderOptions::default().at_slide(1, 3);
        assert_eq!(options.page_label(), "2/3");
    }

    #[test]
    fn test_slide_record_is_empty() {
        assert!(SlideRecord::default().is_empty());
        let slide = SlideRecord {
            bullets: vec!["one".into()],
            ..Default::default()
        };
        assert!(!slide.is_empty());
    }
}
