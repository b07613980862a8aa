//! End-to-end pipeline: markdown source to parsed deck to render calls.

use serde::Serialize;

use crate::frontmatter::extract_frontmatter;
use crate::layout::{LayoutEngine, RenderTarget};
use crate::parser::SlideParser;
use crate::segment::split_slides;
use crate::types::{Metadata, RenderOptions, SlideRecord};
use crate::Result;

/// A parsed markdown deck.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Deck {
    /// Front matter of the source document.
    pub metadata: Metadata,

    /// Slides in presentation order.
    pub slides: Vec<SlideRecord>,
}

impl Deck {
    /// Parse a full markdown document, front matter included.
    ///
    /// Fails with [`crate::Error::EmptyDeckError`] when the body holds no
    /// slide content.
    pub fn parse(source: &str) -> Result<Self> {
        let document = extract_frontmatter(source);
        let parser = SlideParser::new();

        let slides = split_slides(&document.body)?
            .iter()
            .map(|block| parser.parse(block))
            .collect();

        Ok(Self {
            metadata: document.metadata,
            slides,
        })
    }

    /// Number of slides.
    pub fn len(&self) -> usize {
        self.slides.len()
    }

    /// Check whether the deck has no slides.
    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    /// Render options derived from the front matter.
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions::from_metadata(&self.metadata)
    }

    /// Draw every slide into `target`. Does not save.
    pub fn render<T: RenderTarget + ?Sized>(&self, target: &mut T) -> Result<()> {
        LayoutEngine::new().render_deck(&self.slides, &self.render_options(), target)
    }
}
