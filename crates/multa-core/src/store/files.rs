//! Locating branch contract PDFs on disk.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use tracing::debug;

/// Looks up contract PDFs under a flat contracts directory. Files follow the
/// `{branch}_*.pdf` convention; the newest one per branch is authoritative.
pub struct ContractFiles {
    root: PathBuf,
}

impl ContractFiles {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Newest `{branch}_*.pdf` by modification time, or `None` when the
    /// branch has no contract on disk (a normal outcome for closed
    /// branches).
    pub fn find_newest_by_branch(&self, branch: &str) -> Option<PathBuf> {
        if branch.trim().is_empty() {
            return None;
        }

        let prefix = format!("{}_", branch.trim().to_uppercase());
        let entries = fs::read_dir(&self.root).ok()?;

        let mut newest: Option<(SystemTime, PathBuf)> = None;
        for entry in entries.flatten() {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let Some(name) = path.file_name().and_then(|s| s.to_str()) else {
                continue;
            };
            let upper = name.to_uppercase();
            if !upper.starts_with(&prefix) || !upper.ends_with(".PDF") {
                continue;
            }
            let Ok(modified) = entry.metadata().and_then(|m| m.modified()) else {
                continue;
            };
            if newest.as_ref().is_none_or(|(t, _)| modified > *t) {
                newest = Some((modified, path));
            }
        }

        if newest.is_none() {
            debug!("no contract PDF for branch {} under {}", branch, self.root.display());
        }
        newest.map(|(_, path)| path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;

    fn touch(dir: &Path, name: &str, content: &[u8]) {
        let mut f = File::create(dir.join(name)).unwrap();
        f.write_all(content).unwrap();
    }

    #[test]
    fn test_finds_branch_contract() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "A01_contrato.pdf", b"x");
        touch(dir.path(), "B02_contrato.pdf", b"x");

        let files = ContractFiles::new(dir.path());
        let found = files.find_newest_by_branch("A01").unwrap();
        assert_eq!(found.file_name().unwrap(), "A01_contrato.pdf");
    }

    #[test]
    fn test_newest_wins() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "A01_viejo.pdf", b"x");
        std::thread::sleep(std::time::Duration::from_millis(20));
        touch(dir.path(), "A01_nuevo.pdf", b"x");

        let files = ContractFiles::new(dir.path());
        let found = files.find_newest_by_branch("A01").unwrap();
        assert_eq!(found.file_name().unwrap(), "A01_nuevo.pdf");
    }

    #[test]
    fn test_no_contract_for_branch() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "A01_contrato.pdf", b"x");

        let files = ContractFiles::new(dir.path());
        assert!(files.find_newest_by_branch("Z99").is_none());
        assert!(files.find_newest_by_branch("").is_none());
    }

    #[test]
    fn test_ignores_non_pdf() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "A01_notas.txt", b"x");

        let files = ContractFiles::new(dir.path());
        assert!(files.find_newest_by_branch("A01").is_none());
    }
}
