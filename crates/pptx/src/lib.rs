//! PPTX (Office Open XML) writer backend for slidemd.
//!
//! Writes .pptx files, which are ZIP archives of XML parts, from the text
//! boxes the layout engine places.

mod parts;
mod slide;
pub mod writer;

pub use writer::PptxDeck;
