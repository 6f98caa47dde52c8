//! CLI subcommands.

pub mod config;
pub mod inspect;
pub mod rename;
pub mod run;

use std::path::{Path, PathBuf};

use multa_core::MultaConfig;

/// Load configuration from an explicit path, the default location, or
/// built-in defaults, in that order.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<MultaConfig> {
    if let Some(path) = config_path {
        return Ok(MultaConfig::from_file(Path::new(path))?);
    }

    let default = default_config_path();
    if default.exists() {
        return Ok(MultaConfig::from_file(&default)?);
    }

    Ok(MultaConfig::default())
}

pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("multa")
        .join("config.json")
}
