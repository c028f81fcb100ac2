// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::Result;

/// Load a configuration file from a given path and return the raw `RawConfigFile`.
///
/// This only performs TOML deserialization; it does **not** validate the
/// sandbox root or tool paths. Use [`load_and_validate`] for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawConfigFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let config: RawConfigFile = toml::from_str(&contents)?;

    Ok(config)
}

/// Load a configuration file from path and validate it.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let raw_config = load_from_path(&path)?;
    let config = ConfigFile::try_from(raw_config)?;
    Ok(config)
}

/// Resolve the effective configuration.
///
/// - An explicit path must exist and be valid.
/// - Otherwise [`default_config_path`] is used if present.
/// - Otherwise built-in defaults apply (temp dir root, tools from `PATH`).
pub fn load_or_default(explicit: Option<&Path>) -> Result<ConfigFile> {
    if let Some(path) = explicit {
        return load_and_validate(path);
    }

    let default_path = default_config_path();
    if default_path.is_file() {
        debug!(path = ?default_path, "loading default config file");
        return load_and_validate(&default_path);
    }

    debug!("no config file found; using built-in defaults");
    ConfigFile::try_from(RawConfigFile::default())
}

/// `Tmpguard.toml` in the current working directory.
pub fn default_config_path() -> PathBuf {
    PathBuf::from("Tmpguard.toml")
}
