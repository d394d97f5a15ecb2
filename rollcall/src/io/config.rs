//! Session configuration stored alongside the roster (`rollcall.toml`).

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::debug;

/// Session configuration (TOML).
///
/// Intended to be edited by humans; every field has a default, so a partial
/// or missing file is fine.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SessionConfig {
    /// Write the updated roster back to disk when the session ends.
    pub autosave: bool,

    /// Keep a `.bak` copy of the previous roster before overwriting it.
    pub backup: bool,

    /// Fixed shuffle seed. Unset seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            autosave: true,
            backup: false,
            seed: None,
        }
    }
}

/// Default config location: `rollcall.toml` in the roster's directory.
pub fn config_path_for(roster: &Path) -> PathBuf {
    roster
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join("rollcall.toml")
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `SessionConfig::default()`.
pub fn load_config(path: &Path) -> Result<SessionConfig> {
    if !path.exists() {
        return Ok(SessionConfig::default());
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: SessionConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    debug!(path = %path.display(), "config loaded");
    Ok(cfg)
}
