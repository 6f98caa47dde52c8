//! Batch orchestration.
//!
//! Documents are processed one at a time, in name order. A document that
//! fails (corrupt PDF, store outage, I/O trouble) is logged and skipped; the
//! batch always moves on. Anything already written stays on disk, including
//! when a run is cancelled between documents.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{NaiveDate, NaiveTime};
use tracing::{error, info, warn};

use crate::error::{MultaError, Result};
use crate::extract::Dispatcher;
use crate::models::config::MultaConfig;
use crate::models::document::{DocumentReport, DocumentStatus, InfractionDocument, RunSummary};
use crate::output::OutputAssembler;
use crate::pdf::DocumentReader;
use crate::store::ContractStore;
use crate::text::{self, plate};

/// Progress events emitted while a run advances.
///
/// The `Document` audit record fires after extraction and before any output
/// is assembled, so an operator watching the console sees what was read even
/// when a later step fails.
#[derive(Debug, Clone)]
pub enum PipelineEvent {
    /// Plate/date/time audit record, one per readable document. Date and
    /// time are empty when no extractor resolved them.
    Document {
        plate: String,
        date: String,
        time: String,
        file_name: String,
    },
    /// A covering contract was found.
    Match { branch: String, customer: String },
    /// Reconciliation found nothing, or was skipped for lack of a resolved
    /// date/time.
    NoMatch,
    /// The document failed; the batch continues with the next one.
    Failed { file_name: String, error: String },
}

/// Sequential orchestrator over the discovered document set.
pub struct Pipeline {
    reader: Box<dyn DocumentReader>,
    store: Box<dyn ContractStore>,
    dispatcher: Dispatcher,
    assembler: OutputAssembler,
    input_dir: PathBuf,
}

impl Pipeline {
    pub fn new(
        config: &MultaConfig,
        reader: Box<dyn DocumentReader>,
        store: Box<dyn ContractStore>,
    ) -> Self {
        Self {
            reader,
            store,
            dispatcher: Dispatcher::new(),
            assembler: OutputAssembler::new(&config.output.root, &config.contracts.root),
            input_dir: config.input.dir.clone(),
        }
    }

    /// Run over every PDF in the input directory. `cancel` is checked
    /// between documents only; a mid-document cancel finishes that document
    /// first.
    pub fn run(
        &self,
        cancel: &AtomicBool,
        mut on_event: impl FnMut(&PipelineEvent),
    ) -> Result<RunSummary> {
        if !self.input_dir.is_dir() {
            return Err(MultaError::Config(format!(
                "input directory does not exist: {}",
                self.input_dir.display()
            )));
        }

        let pdfs = discover_pdfs(&self.input_dir)?;
        if pdfs.is_empty() {
            warn!("no PDFs found in {}", self.input_dir.display());
            return Ok(RunSummary::default());
        }
        info!("processing {} documents from {}", pdfs.len(), self.input_dir.display());

        let mut summary = RunSummary::default();
        for path in pdfs {
            if cancel.load(Ordering::Relaxed) {
                info!("cancellation requested, stopping after {} documents", summary.processed);
                break;
            }

            let file_name = path
                .file_name()
                .and_then(|s| s.to_str())
                .unwrap_or_default()
                .to_string();

            match self.process_document(&path, &mut on_event) {
                Ok(report) => {
                    summary.processed += 1;
                    if report.matched {
                        summary.matched += 1;
                    } else if report.resolved {
                        summary.unmatched += 1;
                    } else {
                        summary.unresolved += 1;
                    }
                    summary.reports.push(report);
                }
                Err(e) => {
                    error!("[{}] {}", file_name, e);
                    on_event(&PipelineEvent::Failed {
                        file_name: file_name.clone(),
                        error: e.to_string(),
                    });
                    summary.failed += 1;
                    summary.reports.push(DocumentReport {
                        file_name,
                        plate: String::new(),
                        date: None,
                        time: None,
                        extractor: None,
                        resolved: false,
                        matched: false,
                        folder: None,
                        status: DocumentStatus::Failed,
                        error: Some(e.to_string()),
                    });
                }
            }
        }

        Ok(summary)
    }

    fn process_document(
        &self,
        path: &Path,
        on_event: &mut impl FnMut(&PipelineEvent),
    ) -> Result<DocumentReport> {
        let doc = InfractionDocument::from_path(path);
        let document_text = self.reader.read(path)?;

        let plate = self.resolve_plate(&doc, &document_text.full_text);
        let extraction =
            self.dispatcher
                .dispatch(&doc.file_name, &document_text.full_text, &document_text.lines);

        on_event(&PipelineEvent::Document {
            plate: plate.clone(),
            date: extraction.as_ref().map(|e| e.date.clone()).unwrap_or_default(),
            time: extraction.as_ref().map(|e| e.time.clone()).unwrap_or_default(),
            file_name: doc.file_name.clone(),
        });

        let date = extraction.as_ref().and_then(|e| parse_date(&e.date));
        let time = extraction.as_ref().and_then(|e| parse_time(&e.time));
        if extraction.is_some() && (date.is_none() || time.is_none()) {
            warn!("[{}] extracted date/time did not parse", doc.file_name);
        }
        let resolved = date.is_some() && time.is_some();

        // A half-resolved instant cannot be matched against a rental period;
        // skip the query instead of asking a meaningless question.
        let matched = match (date, time) {
            (Some(d), Some(t)) => self.store.find_covering_contract(&plate, d, t)?,
            _ => None,
        };

        match &matched {
            Some(m) => on_event(&PipelineEvent::Match {
                branch: m.branch.clone(),
                customer: m.customer.clone(),
            }),
            None => on_event(&PipelineEvent::NoMatch),
        }

        let folder = self
            .assembler
            .assemble(&doc, &plate, date, time, matched.as_ref())?;

        Ok(DocumentReport {
            file_name: doc.file_name,
            plate,
            date: extraction.as_ref().map(|e| e.date.clone()),
            time: extraction.as_ref().map(|e| e.time.clone()),
            extractor: extraction.map(|e| e.extractor.to_string()),
            resolved,
            matched: matched.is_some(),
            folder: folder
                .file_name()
                .and_then(|s| s.to_str())
                .map(String::from),
            status: DocumentStatus::Done,
            error: None,
        })
    }

    /// Plate resolution order: file name, general text search, loose text
    /// search. The sanitized stem stands in as a last resort so the document
    /// still gets a folder staff can triage by hand.
    fn resolve_plate(&self, doc: &InfractionDocument, full_text: &str) -> String {
        if let Some(p) = &doc.plate {
            return p.clone();
        }
        if let Some(p) = plate::find_plate(full_text) {
            return p;
        }
        if let Some(p) = plate::find_plate_loose(full_text) {
            return p;
        }

        warn!("[{}] no plate found, using file stem", doc.file_name);
        let stem = Path::new(&doc.file_name)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("SIN MATRICULA");
        text::sanitize_file_name(stem)
    }
}

fn discover_pdfs(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut pdfs: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file()
                && path
                    .extension()
                    .and_then(|e| e.to_str())
                    .is_some_and(|e| e.eq_ignore_ascii_case("pdf"))
        })
        .collect();
    pdfs.sort();
    Ok(pdfs)
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%d/%m/%Y").ok()
}

fn parse_time(s: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(s.trim(), "%H:%M").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        assert!(parse_date("27/07/2025").is_some());
        assert!(parse_date(" 05/01/2024 ").is_some());
        assert!(parse_date("2025-07-27").is_none());
        assert!(parse_date("99/99/9999").is_none());
        assert!(parse_date("").is_none());
    }

    #[test]
    fn test_parse_time() {
        assert!(parse_time("11:34").is_some());
        assert!(parse_time("9:05").is_some());
        assert!(parse_time("25:00").is_none());
        assert!(parse_time("").is_none());
    }
}
