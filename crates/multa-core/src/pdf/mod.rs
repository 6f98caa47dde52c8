//! Infraction PDF reading.

mod reader;

pub use reader::PdfTextReader;

use std::path::Path;

use crate::error::PdfError;

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Text recovered from one notice.
#[derive(Debug, Clone, Default)]
pub struct DocumentText {
    /// Whole document as one normalized block.
    pub full_text: String,
    /// Reconstructed lines, top to bottom, each normalized. Some layouts
    /// split a label from its value across lines, so extractors get both
    /// views.
    pub lines: Vec<String>,
}

/// Anything that can turn a notice file into normalized text plus ordered
/// lines. The pipeline only depends on this trait, so tests substitute
/// canned text for real PDFs.
pub trait DocumentReader {
    fn read(&self, path: &Path) -> Result<DocumentText>;
}
