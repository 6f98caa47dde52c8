//! Configuration structures for the reconciliation pipeline.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration for the multa pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MultaConfig {
    /// Input documents.
    pub input: InputConfig,

    /// Contract PDFs and rental history.
    pub contracts: ContractsConfig,

    /// Output folder assembly.
    pub output: OutputConfig,

    /// Plate-based renaming.
    pub rename: RenameConfig,
}

impl Default for MultaConfig {
    fn default() -> Self {
        Self {
            input: InputConfig::default(),
            contracts: ContractsConfig::default(),
            output: OutputConfig::default(),
            rename: RenameConfig::default(),
        }
    }
}

/// Where the infraction PDFs come from.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Directory the acquisition stage deposits PDFs into.
    pub dir: PathBuf,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("multas"),
        }
    }
}

/// Contract datastore locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContractsConfig {
    /// Directory holding branch contract PDFs (`{branch}_*.pdf`).
    pub root: PathBuf,

    /// Rental-history CSV export queried for covering contracts.
    pub history: PathBuf,
}

impl Default for ContractsConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("contratos"),
            history: PathBuf::from("contratos/historico.csv"),
        }
    }
}

/// Where evidence folders are written.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Root under which one folder per document is created.
    pub root: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("salida"),
        }
    }
}

/// Settings for the plate-based rename pass.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RenameConfig {
    /// Documents whose normalized leading text matches one of these prefixes
    /// are left untouched (known non-notice paperwork).
    pub excluded_starts: Vec<String>,
}

impl MultaConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        std::fs::write(path, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = MultaConfig::default();
        assert_eq!(config.input.dir, PathBuf::from("multas"));
        assert_eq!(config.output.root, PathBuf::from("salida"));
        assert!(config.rename.excluded_starts.is_empty());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: MultaConfig =
            serde_json::from_str(r#"{"input": {"dir": "/srv/multas"}}"#).unwrap();
        assert_eq!(config.input.dir, PathBuf::from("/srv/multas"));
        assert_eq!(config.contracts.root, PathBuf::from("contratos"));
    }
}
