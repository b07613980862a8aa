//! Core of slidemd: front matter, slide segmentation and parsing, inline
//! markdown stripping, contrast selection, and fixed-grid slide layout.

pub mod color;
pub mod deck;
pub mod error;
pub mod frontmatter;
pub mod layout;
pub mod normalize;
pub mod parser;
pub mod segment;
pub mod types;

pub use color::{is_dark, normalize_color, Palette, DEFAULT_BACKGROUND};
pub use deck::Deck;
pub use error::{Error, Result};
pub use frontmatter::extract_frontmatter;
pub use layout::{Align, Geometry, LayoutEngine, RenderTarget, TextStyle, VerticalAlign};
pub use normalize::TextNormalizer;
pub use parser::{LineKind, SlideParser};
pub use segment::split_slides;
pub use types::{Document, Metadata, RenderOptions, SlideRecord};
