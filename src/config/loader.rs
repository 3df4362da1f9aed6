// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::config::model::{Config, RawConfig};
use crate::errors::Result;

/// Load a configuration file from a given path and return the raw
/// [`RawConfig`].
///
/// This only performs JSON deserialization; it does **not** perform semantic
/// validation (non-empty pipelines, etc.). Use [`load_and_validate`] for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawConfig> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)
        .with_context(|| format!("reading config file at {:?}", path))?;

    let config: RawConfig = serde_json::from_str(&contents)?;

    Ok(config)
}

/// Load a configuration file from path and run validation.
///
/// This is the recommended entry point for the rest of the application:
///
/// - Reads JSON.
/// - Applies defaults (handled by `serde` + `Default` impls).
/// - Checks for empty source directories, empty pipelines, and a zero quiet
///   period.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<Config> {
    let raw = load_from_path(&path)?;
    Config::try_from(raw)
}

/// Helper to resolve a default config path.
///
/// Currently this just returns `watchrun.json` in the current working
/// directory; project-local discovery can hang off this function later.
pub fn default_config_path() -> PathBuf {
    PathBuf::from("watchrun.json")
}
