//! Command implementations.

pub mod build;
pub mod check;

use std::path::{Path, PathBuf};

use color_eyre::eyre::{Result, WrapErr};
use mdindex_core::Config;

/// Load the configuration file, falling back to defaults when it is absent.
///
/// Environment variables prefixed with `MDINDEX__` override file values.
pub fn load_config(config_path: &Path) -> Result<Config> {
    if !config_path.exists() {
        tracing::info!(?config_path, "configuration file not found, using defaults");
        let config = Config::default();
        config.validate()?;
        return Ok(config);
    }

    Config::load_with_env(config_path).wrap_err("Failed to load configuration")
}

/// Resolve a configured directory against the configuration file's directory.
pub fn resolve_dir(config_path: &Path, dir: &Path) -> PathBuf {
    match config_path.parent() {
        Some(base) if !base.as_os_str().is_empty() => base.join(dir),
        _ => dir.to_path_buf(),
    }
}
