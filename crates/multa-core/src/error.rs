//! Error types for the multa-core library.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the multa library.
#[derive(Error, Debug)]
pub enum MultaError {
    /// PDF reading error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Contract store error.
    #[error("contract store error: {0}")]
    Store(#[from] StoreError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to reading infraction PDFs.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// I/O error while reading the file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors related to the rental-contract store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The history file could not be read.
    #[error("failed to read contract history {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The history file is not valid CSV.
    #[error("malformed contract history: {0}")]
    Malformed(String),

    /// A column the store cannot work without is missing.
    #[error("contract history is missing required column: {0}")]
    MissingColumn(&'static str),
}

/// Result type for the multa library.
pub type Result<T> = std::result::Result<T, MultaError>;
