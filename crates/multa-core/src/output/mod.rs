//! Evidence folder assembly.
//!
//! Every processed notice ends up as one folder under the output root, named
//! so that back-office staff can see at a glance what is known and what is
//! missing. Copies overwrite, so re-running a batch converges on the same
//! filesystem state.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{NaiveDate, NaiveTime};
use tracing::{debug, warn};

use crate::error::Result;
use crate::models::document::{strip_duplicate_marker, InfractionDocument};
use crate::store::{ContractFiles, ContractMatch};
use crate::text;

pub const NO_CONTRACT_SUFFIX: &str = " - contrato no encontrado";
pub const HOC_NOTE: &str = "es hoc.txt";
pub const NO_HOC_NOTE: &str = "no es hoc.txt";

/// Destination folder name. Pure function of its inputs: identical inputs
/// always produce byte-identical names.
pub fn folder_name(
    plate: &str,
    date: Option<NaiveDate>,
    time: Option<NaiveTime>,
    contract_found: bool,
    duplicate_suffix: Option<&str>,
) -> String {
    let mut name = match (date, time) {
        (None, None) => format!("{plate}-sin fecha ni hora"),
        (None, Some(t)) => format!("{plate}-sin fecha-{}", t.format("%H%M")),
        (Some(d), None) => format!("{plate}-{}-sin hora", d.format("%d%m%Y")),
        (Some(d), Some(t)) => format!("{plate}-{}-{}", d.format("%d%m%Y"), t.format("%H%M")),
    };

    if !contract_found {
        name.push_str(NO_CONTRACT_SUFFIX);
    }

    if let Some(suffix) = duplicate_suffix {
        name.push_str(suffix);
    }

    name
}

/// Writes one evidence folder per document: the infraction PDF, the branch
/// contract PDF when one exists, and the small marker files the back office
/// keys on.
pub struct OutputAssembler {
    output_root: PathBuf,
    contract_files: ContractFiles,
}

impl OutputAssembler {
    pub fn new(output_root: impl Into<PathBuf>, contracts_root: impl Into<PathBuf>) -> Self {
        Self {
            output_root: output_root.into(),
            contract_files: ContractFiles::new(contracts_root),
        }
    }

    /// Create the folder and fill it. Returns the folder path.
    pub fn assemble(
        &self,
        doc: &InfractionDocument,
        plate: &str,
        date: Option<NaiveDate>,
        time: Option<NaiveTime>,
        matched: Option<&ContractMatch>,
    ) -> Result<PathBuf> {
        let name = folder_name(
            plate,
            date,
            time,
            matched.is_some(),
            doc.duplicate_suffix.as_deref(),
        );
        let dest = self.output_root.join(&name);
        fs::create_dir_all(&dest)?;

        // The infraction PDF always lands in the folder; re-runs overwrite.
        fs::copy(&doc.path, dest.join(&doc.file_name))?;

        if let Some(contract) = matched {
            self.write_nationality_marker(&dest, contract)?;

            match self.contract_files.find_newest_by_branch(&contract.branch) {
                Some(contract_pdf) => {
                    let copied = copy_contract(&contract_pdf, &dest)?;
                    debug!("copied contract {} into {}", copied.display(), dest.display());
                    self.write_program_note(&dest, contract)?;
                }
                None => {
                    warn!("no contract PDF on disk for branch {}", contract.branch);
                }
            }
        }

        Ok(dest)
    }

    /// Empty file named after the customer's nationality, `null` when the
    /// store did not have one.
    fn write_nationality_marker(&self, dest: &Path, contract: &ContractMatch) -> Result<()> {
        let raw = contract.nationality.as_deref().unwrap_or("null");
        let mut name = text::sanitize_file_name(raw);
        if name.is_empty() {
            name = "null".to_string();
        }
        fs::write(dest.join(name), b"")?;
        Ok(())
    }

    fn write_program_note(&self, dest: &Path, contract: &ContractMatch) -> Result<()> {
        match &contract.program_code {
            Some(code) => {
                let body = format!(
                    "Sucursal: {}\nCliente: {}\nPrograma: {}\n",
                    contract.branch, contract.customer, code
                );
                fs::write(dest.join(HOC_NOTE), body)?;
            }
            None => {
                fs::write(dest.join(NO_HOC_NOTE), b"")?;
            }
        }
        Ok(())
    }
}

/// Copy the contract PDF with any `_N` duplicate marker stripped from its
/// stem, so evidence folders always carry the canonical contract name.
fn copy_contract(contract_pdf: &Path, dest: &Path) -> Result<PathBuf> {
    let stem = contract_pdf
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("contrato");
    let name = match contract_pdf.extension().and_then(|s| s.to_str()) {
        Some(ext) => format!("{}.{ext}", strip_duplicate_marker(stem)),
        None => strip_duplicate_marker(stem),
    };

    let target = dest.join(name);
    fs::copy(contract_pdf, &target)?;
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%d/%m/%Y").unwrap()
    }

    fn time(s: &str) -> NaiveTime {
        NaiveTime::parse_from_str(s, "%H:%M").unwrap()
    }

    #[test]
    fn test_folder_name_all_shapes() {
        let d = Some(date("27/07/2025"));
        let t = Some(time("11:34"));

        assert_eq!(folder_name("9371MGF", None, None, true, None), "9371MGF-sin fecha ni hora");
        assert_eq!(folder_name("9371MGF", None, t, true, None), "9371MGF-sin fecha-1134");
        assert_eq!(folder_name("9371MGF", d, None, true, None), "9371MGF-27072025-sin hora");
        assert_eq!(folder_name("9371MGF", d, t, true, None), "9371MGF-27072025-1134");
    }

    #[test]
    fn test_folder_name_no_contract_suffix() {
        let name = folder_name("9371MGF", Some(date("27/07/2025")), Some(time("11:34")), false, None);
        assert_eq!(name, "9371MGF-27072025-1134 - contrato no encontrado");
    }

    #[test]
    fn test_folder_name_duplicate_suffix_last() {
        let name = folder_name("9371MGF", None, None, false, Some("_2"));
        assert_eq!(name, "9371MGF-sin fecha ni hora - contrato no encontrado_2");
    }

    #[test]
    fn test_folder_name_is_deterministic() {
        let d = Some(date("05/01/2024"));
        let t = Some(time("09:15"));
        let a = folder_name("1234BCD", d, t, false, Some("_3"));
        let b = folder_name("1234BCD", d, t, false, Some("_3"));
        assert_eq!(a, b);
    }

    fn sample_doc(dir: &Path, name: &str) -> InfractionDocument {
        let path = dir.join(name);
        fs::write(&path, b"%PDF-1.4 sample").unwrap();
        InfractionDocument::from_path(&path)
    }

    #[test]
    fn test_assemble_without_match() {
        let input = tempfile::tempdir().unwrap();
        let contracts = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();

        let doc = sample_doc(input.path(), "AYTO_9371MGF.pdf");
        let assembler = OutputAssembler::new(output.path(), contracts.path());

        let dest = assembler
            .assemble(&doc, "9371MGF", Some(date("27/07/2025")), Some(time("11:34")), None)
            .unwrap();

        assert!(dest.ends_with("9371MGF-27072025-1134 - contrato no encontrado"));
        assert!(dest.join("AYTO_9371MGF.pdf").is_file());
        // Only the infraction PDF, nothing else.
        assert_eq!(fs::read_dir(&dest).unwrap().count(), 1);
    }

    #[test]
    fn test_assemble_with_hoc_match() {
        let input = tempfile::tempdir().unwrap();
        let contracts = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();

        // Contract PDF carries a duplicate marker that must not survive the copy.
        fs::write(contracts.path().join("A01_contrato_2.pdf"), b"%PDF").unwrap();

        let doc = sample_doc(input.path(), "AYTO_9371MGF.pdf");
        let assembler = OutputAssembler::new(output.path(), contracts.path());
        let contract = ContractMatch {
            branch: "A01".to_string(),
            customer: "C-1001".to_string(),
            program_code: Some("HOC-77".to_string()),
            nationality: Some("Reino Unido".to_string()),
        };

        let dest = assembler
            .assemble(
                &doc,
                "9371MGF",
                Some(date("27/07/2025")),
                Some(time("11:34")),
                Some(&contract),
            )
            .unwrap();

        assert!(dest.ends_with("9371MGF-27072025-1134"));
        assert!(dest.join("A01_contrato.pdf").is_file());
        assert!(dest.join("Reino Unido").is_file());

        let note = fs::read_to_string(dest.join(HOC_NOTE)).unwrap();
        assert!(note.contains("Sucursal: A01"));
        assert!(note.contains("Cliente: C-1001"));
        assert!(note.contains("Programa: HOC-77"));
        assert!(!dest.join(NO_HOC_NOTE).exists());
    }

    #[test]
    fn test_assemble_match_without_program_code() {
        let input = tempfile::tempdir().unwrap();
        let contracts = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();

        fs::write(contracts.path().join("A01_contrato.pdf"), b"%PDF").unwrap();

        let doc = sample_doc(input.path(), "AYTO_9371MGF.pdf");
        let assembler = OutputAssembler::new(output.path(), contracts.path());
        let contract = ContractMatch {
            branch: "A01".to_string(),
            customer: "C-1001".to_string(),
            program_code: None,
            nationality: None,
        };

        let dest = assembler
            .assemble(&doc, "9371MGF", Some(date("27/07/2025")), Some(time("11:34")), Some(&contract))
            .unwrap();

        assert!(dest.join(NO_HOC_NOTE).is_file());
        assert_eq!(fs::read_to_string(dest.join(NO_HOC_NOTE)).unwrap(), "");
        // Nationality absent in the store becomes the literal "null" marker.
        assert!(dest.join("null").is_file());
    }

    #[test]
    fn test_assemble_is_idempotent() {
        let input = tempfile::tempdir().unwrap();
        let contracts = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();

        let doc = sample_doc(input.path(), "AYTO_9371MGF.pdf");
        let assembler = OutputAssembler::new(output.path(), contracts.path());

        let first = assembler.assemble(&doc, "9371MGF", None, None, None).unwrap();
        let second = assembler.assemble(&doc, "9371MGF", None, None, None).unwrap();
        assert_eq!(first, second);
        assert!(first.join("AYTO_9371MGF.pdf").is_file());
    }

    #[test]
    fn test_assemble_keeps_duplicate_suffix() {
        let input = tempfile::tempdir().unwrap();
        let contracts = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();

        let doc = sample_doc(input.path(), "AYTO_9371MGF_2.pdf");
        let assembler = OutputAssembler::new(output.path(), contracts.path());

        let dest = assembler.assemble(&doc, "9371MGF", None, None, None).unwrap();
        assert!(dest.ends_with("9371MGF-sin fecha ni hora - contrato no encontrado_2"));
    }
}
