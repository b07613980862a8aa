//! Error types for markdown-to-slide conversion.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while converting a markdown deck.
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to read the input or write the output file.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Bad or missing command-line arguments.
    #[error("{0}")]
    UsageError(String),

    /// No slide content was found after splitting the document.
    #[error("No slides found. Use `---` separators in the markdown content.")]
    EmptyDeckError,

    /// The renderer target was driven out of order.
    #[error("Render error: {0}")]
    RenderError(String),

    /// ZIP archive error (for PPTX).
    #[error("ZIP error: {0}")]
    ZipError(String),

    /// XML writing error (for PPTX).
    #[error("XML error: {0}")]
    XmlError(String),
}
