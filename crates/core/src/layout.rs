//! Fixed-grid slide layout.
//!
//! Places header, footer, page number, title, bullets and body on a wide
//! 13.333" x 7.5" canvas using a running vertical cursor. There is no text
//! measurement; text that does not fit is clipped by the target.

use std::path::Path;

use crate::types::{RenderOptions, SlideRecord};
use crate::Result;

/// Canvas width in inches (16:9 wide layout, 13.333").
pub const CANVAS_WIDTH: f64 = 40.0 / 3.0;
/// Canvas height in inches.
pub const CANVAS_HEIGHT: f64 = 7.5;

const BAND_FONT_SIZE: u32 = 10;
const HEADER_BOX: Geometry = Geometry::new(0.45, 0.16, 12.2, 0.18);
const FOOTER_BOX: Geometry = Geometry::new(0.45, 7.14, 10.2, 0.2);
const PAGE_NUMBER_BOX: Geometry = Geometry::new(11.0, 7.14, 1.85, 0.2);

const CURSOR_START: f64 = 0.4;
const CURSOR_START_WITH_HEADER: f64 = 0.58;

const TITLE_X: f64 = 0.72;
const TITLE_WIDTH: f64 = 11.9;
const TITLE_HEIGHT: f64 = 0.95;
const TITLE_ADVANCE: f64 = 1.05;
const TITLE_FONT_SIZE: u32 = 34;

const CONTENT_X: f64 = 0.95;
const CONTENT_WIDTH: f64 = 11.35;

const BULLET_HEIGHT_PER_ITEM: f64 = 0.5;
const BULLET_BASE_PADDING: f64 = 0.5;
const BULLET_MAX_HEIGHT: f64 = 4.0;
const BULLET_SPACING: f64 = 0.15;
const BULLET_FONT_SIZE: u32 = 20;
const BULLET_PREFIX: &str = "- ";

const BODY_BOTTOM: f64 = 7.0;
const BODY_FONT_SIZE: u32 = 16;

/// A text box position and size, in inches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Geometry {
    /// Create a geometry from position and size.
    pub const fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }
}

/// Horizontal paragraph alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Left,
    Right,
}

/// Vertical anchoring of text inside its box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VerticalAlign {
    #[default]
    Top,
    Middle,
}

/// How a text box is drawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextStyle {
    /// Font size in points.
    pub font_size: u32,
    pub bold: bool,
    /// 6-digit hex color.
    pub color: String,
    pub align: Align,
    pub valign: VerticalAlign,
}

impl TextStyle {
    fn new(font_size: u32, color: &str) -> Self {
        Self {
            font_size,
            bold: false,
            color: color.to_string(),
            align: Align::Left,
            valign: VerticalAlign::Top,
        }
    }

    fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    fn valign(mut self, valign: VerticalAlign) -> Self {
        self.valign = valign;
        self
    }
}

/// A stateful slide-deck sink that the layout engine draws into.
///
/// Calls arrive strictly in order: `new_canvas` opens a slide, the
/// following `set_background` and `place_text` calls apply to it, and
/// `save` writes everything out once the whole deck is drawn.
pub trait RenderTarget {
    /// Start a new blank slide.
    fn new_canvas(&mut self) -> Result<()>;

    /// Set the current slide's solid background color.
    fn set_background(&mut self, color: &str) -> Result<()>;

    /// Place a text box on the current slide. Newlines separate paragraphs.
    fn place_text(&mut self, text: &str, geometry: Geometry, style: &TextStyle) -> Result<()>;

    /// Write the finished deck to `path`.
    fn save(&mut self, path: &Path) -> Result<()>;
}

/// Height of the bullet block for `count` items.
pub fn bullet_block_height(count: usize) -> f64 {
    (BULLET_HEIGHT_PER_ITEM * count as f64 + BULLET_BASE_PADDING).min(BULLET_MAX_HEIGHT)
}

/// Maps slide records onto positioned text boxes.
#[derive(Debug, Clone, Copy, Default)]
pub struct LayoutEngine;

impl LayoutEngine {
    /// Create a new layout engine.
    pub fn new() -> Self {
        Self
    }

    /// Render every slide in order, filling in slide index and total.
    pub fn render_deck<T: RenderTarget + ?Sized>(
        &self,
        slides: &[SlideRecord],
        options: &RenderOptions,
        target: &mut T,
    ) -> Result<()> {
        let total = slides.len();
        for (index, slide) in slides.iter().enumerate() {
            self.render_slide(slide, &options.at_slide(index, total), target)?;
        }
        Ok(())
    }

    /// Render one slide onto a fresh canvas.
    pub fn render_slide<T: RenderTarget + ?Sized>(
        &self,
        slide: &SlideRecord,
        options: &RenderOptions,
        target: &mut T,
    ) -> Result<()> {
        log::debug!(
            "Rendering slide {}/{}: {:?}",
            options.slide_index + 1,
            options.total_slides,
            slide.title
        );

        target.new_canvas()?;
        target.set_background(&options.background_color)?;

        let band = TextStyle::new(BAND_FONT_SIZE, &options.sub_text_color)
            .valign(VerticalAlign::Middle);

        if let Some(header) = non_empty(options.header.as_deref()) {
            target.place_text(header, HEADER_BOX, &band)?;
        }
        if let Some(footer) = non_empty(options.footer.as_deref()) {
            target.place_text(footer, FOOTER_BOX, &band)?;
        }
        if options.paginate {
            let page = band.clone().align(Align::Right);
            target.place_text(&options.page_label(), PAGE_NUMBER_BOX, &page)?;
        }

        let mut cursor = if non_empty(options.header.as_deref()).is_some() {
            CURSOR_START_WITH_HEADER
        } else {
            CURSOR_START
        };

        if !slide.title.is_empty() {
            let style = TextStyle::new(TITLE_FONT_SIZE, &options.text_color)
                .bold()
                .valign(VerticalAlign::Middle);
            let geometry = Geometry::new(TITLE_X, cursor, TITLE_WIDTH, TITLE_HEIGHT);
            target.place_text(&slide.title, geometry, &style)?;
            cursor += TITLE_ADVANCE;
        }

        if !slide.bullets.is_empty() {
            let text = slide
                .bullets
                .iter()
                .map(|item| format!("{}{}", BULLET_PREFIX, item))
                .collect::<Vec<_>>()
                .join("\n");
            let height = bullet_block_height(slide.bullets.len());
            let style = TextStyle::new(BULLET_FONT_SIZE, &options.text_color);
            let geometry = Geometry::new(CONTENT_X, cursor, CONTENT_WIDTH, height);
            target.place_text(&text, geometry, &style)?;
            cursor += height + BULLET_SPACING;
        }

        if !slide.body.is_empty() {
            let style = TextStyle::new(BODY_FONT_SIZE, &options.text_color);
            let geometry = Geometry::new(CONTENT_X, cursor, CONTENT_WIDTH, BODY_BOTTOM - cursor);
            target.place_text(&slide.body.join("\n"), geometry, &style)?;
        }

        Ok(())
    }
}

fn non_empty(text: Option<&str>) -> Option<&str> {
    text.filter(|t| !t.is_empty())
}
