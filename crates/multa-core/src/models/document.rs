//! Domain records flowing through the pipeline.

use std::path::{Path, PathBuf};

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

lazy_static! {
    // Plate at the end of the stem, optionally with a duplicate marker:
    // "AYTO. DE BENALMADENA_9371MGF_2"
    static ref FILENAME_PLATE: Regex = Regex::new(
        r"(\d{4}[BCDFGHJKLMNPRSTVWXYZ]{3})(?:_(\d+))?$"
    ).unwrap();

    static ref DUP_MARKER: Regex = Regex::new(r"_(\d+)$").unwrap();
}

/// A discovered infraction notice. Immutable once created; everything is
/// derived from the path at discovery time.
#[derive(Debug, Clone)]
pub struct InfractionDocument {
    pub path: PathBuf,
    pub file_name: String,
    /// Plate encoded in the file name by the acquisition stage, if any.
    pub plate: Option<String>,
    /// Duplicate marker (`_2`, `_3`, ...) carried verbatim from the file
    /// name so otherwise-identical output folders stay distinct.
    pub duplicate_suffix: Option<String>,
}

impl InfractionDocument {
    pub fn from_path(path: &Path) -> Self {
        let file_name = path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_string();
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_uppercase();

        let (plate, duplicate_suffix) = match FILENAME_PLATE.captures(&stem) {
            Some(c) => (
                Some(c[1].to_string()),
                c.get(2).map(|m| format!("_{}", m.as_str())),
            ),
            None => (None, None),
        };

        Self {
            path: path.to_path_buf(),
            file_name,
            plate,
            duplicate_suffix,
        }
    }
}

/// Strip a trailing `_N` duplicate marker from a file stem.
pub fn strip_duplicate_marker(stem: &str) -> String {
    DUP_MARKER.replace(stem, "").to_string()
}

/// Per-document outcome, kept for the run summary and CSV export.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentReport {
    pub file_name: String,
    pub plate: String,
    /// Extracted date text (`dd/mm/yyyy`), if any extractor succeeded.
    pub date: Option<String>,
    /// Extracted time text (`HH:MM`), if any extractor succeeded.
    pub time: Option<String>,
    /// Name of the extractor that produced the date/time.
    pub extractor: Option<String>,
    /// Whether the date/time parsed into a usable instant.
    pub resolved: bool,
    /// Whether a covering contract was found.
    pub matched: bool,
    /// Name of the evidence folder that was produced.
    pub folder: Option<String>,
    pub status: DocumentStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    Done,
    Failed,
}

/// Whole-run counters plus the per-document reports.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub processed: usize,
    pub matched: usize,
    pub unmatched: usize,
    pub unresolved: usize,
    pub failed: usize,
    pub reports: Vec<DocumentReport>,
}
