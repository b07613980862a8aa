//! PPTX deck writer implementation.

use slidemd_core::{Error, Geometry, RenderTarget, Result, TextStyle};
use std::io::{Cursor, Seek, Write};
use std::path::Path;
use zip::write::FileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

use crate::parts::{self, DocProps};
use crate::slide::{SlidePart, TextShape};

/// Default `dc:creator` for generated decks.
pub const DEFAULT_AUTHOR: &str = "slidemd";

/// Default `dc:subject` for generated decks.
pub const DEFAULT_SUBJECT: &str = "Presentation generated from Marp markdown";

/// An in-memory PPTX deck that the layout engine draws into.
///
/// Slides are kept in memory until [`RenderTarget::save`], which writes
/// the whole package in one go.
#[derive(Debug, Clone)]
pub struct PptxDeck {
    props: DocProps,
    slides: Vec<SlidePart>,
}

impl PptxDeck {
    /// Create an empty deck with default properties.
    pub fn new() -> Self {
        Self {
            props: DocProps {
                title: String::new(),
                author: DEFAULT_AUTHOR.to_string(),
                subject: DEFAULT_SUBJECT.to_string(),
            },
            slides: Vec::new(),
        }
    }

    /// Set the document title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.props.title = title.into();
        self
    }

    /// Set the document author.
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.props.author = author.into();
        self
    }

    /// Set the document subject.
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.props.subject = subject.into();
        self
    }

    /// Number of slides drawn so far.
    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    /// Write the package to any seekable writer.
    pub fn write_to<W: Write + Seek>(&self, writer: W) -> Result<W> {
        let mut zip = ZipWriter::new(writer);
        // Fixed timestamps keep output byte-identical across runs.
        let options = FileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .last_modified_time(DateTime::default());

        let count = self.slides.len();
        let fixed_parts = [
            ("[Content_Types].xml", parts::content_types(count)),
            ("_rels/.rels", parts::root_rels()),
            ("docProps/core.xml", parts::core_props(&self.props)),
            ("docProps/app.xml", parts::app_props(count)),
            ("ppt/presentation.xml", parts::presentation(count)),
            ("ppt/_rels/presentation.xml.rels", parts::presentation_rels(count)),
            ("ppt/presProps.xml", parts::pres_props()),
            ("ppt/viewProps.xml", parts::view_props()),
            ("ppt/tableStyles.xml", parts::table_styles()),
            ("ppt/theme/theme1.xml", parts::theme()),
            ("ppt/slideMasters/slideMaster1.xml", parts::slide_master()),
            ("ppt/slideMasters/_rels/slideMaster1.xml.rels", parts::slide_master_rels()),
            ("ppt/slideLayouts/slideLayout1.xml", parts::slide_layout()),
            ("ppt/slideLayouts/_rels/slideLayout1.xml.rels", parts::slide_layout_rels()),
        ];
        for (path, content) in &fixed_parts {
            write_entry(&mut zip, path, content.as_bytes(), options)?;
        }

        let slide_rels = parts::slide_rels();
        for (idx, slide) in self.slides.iter().enumerate() {
            let number = idx + 1;
            write_entry(
                &mut zip,
                &format!("ppt/slides/slide{}.xml", number),
                &slide.to_xml()?,
                options,
            )?;
            write_entry(
                &mut zip,
                &format!("ppt/slides/_rels/slide{}.xml.rels", number),
                slide_rels.as_bytes(),
                options,
            )?;
        }

        zip.finish()
            .map_err(|e| Error::ZipError(format!("Failed to finish archive: {}", e)))
    }

    /// Build the complete package in memory.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(self.write_to(Cursor::new(Vec::new()))?.into_inner())
    }

    fn current_slide(&mut self) -> Result<&mut SlidePart> {
        self.slides
            .last_mut()
            .ok_or_else(|| Error::RenderError("no slide started; call new_canvas first".to_string()))
    }
}

impl Default for PptxDeck {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderTarget for PptxDeck {
    fn new_canvas(&mut self) -> Result<()> {
        self.slides.push(SlidePart::default());
        Ok(())
    }

    fn set_background(&mut self, color: &str) -> Result<()> {
        self.current_slide()?.background = Some(color.to_string());
        Ok(())
    }

    fn place_text(&mut self, text: &str, geometry: Geometry, style: &TextStyle) -> Result<()> {
        self.current_slide()?.shapes.push(TextShape {
            text: text.to_string(),
            geometry,
            style: style.clone(),
        });
        Ok(())
    }

    /// Serialize everything first so a failure never leaves a partial file.
    fn save(&mut self, path: &Path) -> Result<()> {
        let bytes = self.to_bytes()?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, bytes)?;

        log::info!("Wrote {} slides to {}", self.slides.len(), path.display());
        Ok(())
    }
}

fn write_entry<W: Write + Seek>(
    zip: &mut ZipWriter<W>,
    path: &str,
    content: &[u8],
    options: FileOptions,
) -> Result<()> {
    zip.start_file(path, options)
        .map_err(|e| Error::ZipError(format!("Failed to add '{}': {}", path, e)))?;
    zip.write_all(content)
        .map_err(|e| Error::ZipError(format!("Failed to write '{}': {}", path, e)))?;
    Ok(())
}
