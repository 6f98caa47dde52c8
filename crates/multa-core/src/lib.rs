//! Core library for traffic-infraction reconciliation.
//!
//! This crate provides:
//! - OCR-tolerant text normalization and Spanish plate extraction
//! - Per-authority date/time extractors with ordered fallback chains
//! - Rental-contract lookup by plate and temporal containment
//! - Deterministic evidence-folder assembly
//! - The sequential batch pipeline tying it all together

pub mod error;
pub mod extract;
pub mod models;
pub mod output;
pub mod pdf;
pub mod pipeline;
pub mod store;
pub mod text;

pub use error::{MultaError, PdfError, Result, StoreError};
pub use extract::{DateTimeExtractor, Dispatcher, ExtractedDateTime, Extraction};
pub use models::config::MultaConfig;
pub use models::document::{DocumentReport, DocumentStatus, InfractionDocument, RunSummary};
pub use output::{folder_name, OutputAssembler};
pub use pdf::{DocumentReader, DocumentText, PdfTextReader};
pub use pipeline::{Pipeline, PipelineEvent};
pub use store::{ContractFiles, ContractMatch, ContractStore, CsvContractStore};
