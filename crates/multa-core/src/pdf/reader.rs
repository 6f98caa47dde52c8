//! PDF text reading using lopdf and pdf-extract.

use std::fs;
use std::path::Path;

use lopdf::Document;
use tracing::debug;

use super::{DocumentReader, DocumentText, Result};
use crate::error::PdfError;
use crate::text;

/// Reader for text-based infraction PDFs.
///
/// `lopdf` validates the document structure (and handles the
/// empty-password encryption some municipal portals apply), `pdf-extract`
/// reconstructs the reading order. Both the full text and the individual
/// lines come back normalized.
pub struct PdfTextReader;

impl PdfTextReader {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PdfTextReader {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentReader for PdfTextReader {
    fn read(&self, path: &Path) -> Result<DocumentText> {
        let data = fs::read(path)?;

        let mut doc = Document::load_mem(&data).map_err(|e| PdfError::Parse(e.to_string()))?;

        // Handle PDFs with empty password encryption.
        let data = if doc.is_encrypted() {
            if doc.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("decrypted PDF with empty password: {}", path.display());

            let mut decrypted = Vec::new();
            doc.save_to(&mut decrypted)
                .map_err(|e| PdfError::Parse(format!("failed to save decrypted PDF: {e}")))?;
            decrypted
        } else {
            data
        };

        if doc.get_pages().is_empty() {
            return Err(PdfError::NoPages);
        }

        let raw = pdf_extract::extract_text_from_mem(&data)
            .map_err(|e| PdfError::TextExtraction(e.to_string()))?;

        let lines: Vec<String> = raw
            .lines()
            .map(text::normalize)
            .filter(|l| !l.is_empty())
            .collect();
        let full_text = text::normalize(&raw);

        debug!("read {} lines from {}", lines.len(), path.display());

        Ok(DocumentText { full_text, lines })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_io_error() {
        let reader = PdfTextReader::new();
        let err = reader.read(Path::new("/nonexistent/notice.pdf")).unwrap_err();
        assert!(matches!(err, PdfError::Io(_)));
    }

    #[test]
    fn test_garbage_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.pdf");
        fs::write(&path, b"not a pdf at all").unwrap();

        let reader = PdfTextReader::new();
        let err = reader.read(&path).unwrap_err();
        assert!(matches!(err, PdfError::Parse(_)));
    }
}
