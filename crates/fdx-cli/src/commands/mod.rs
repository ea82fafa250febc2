//! Subcommand implementations.

pub mod address;
pub mod batch;
pub mod config;
pub mod extract;
pub mod ledger;
pub mod measure;

use std::path::{Path, PathBuf};

use fdx_core::models::config::FdxConfig;
use tracing::debug;

/// Load configuration from `-c`, else the default file if present, else defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<FdxConfig> {
    let path = match config_path {
        Some(path) => PathBuf::from(path),
        None => {
            let default = config::default_config_path();
            if !default.exists() {
                return Ok(FdxConfig::default());
            }
            default
        }
    };

    debug!("Loading configuration from {}", path.display());
    Ok(FdxConfig::from_file(&path)?)
}

/// Ledger file to use: the command-line override or the configured path.
pub fn ledger_path(override_path: Option<&Path>, config: &FdxConfig) -> PathBuf {
    override_path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| config.ledger.path.clone())
}
