//! Storage locations and `~` expansion.

use prism_common::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const APP_NAME: &str = "prism";

/// Storage directory overrides. Empty strings select the platform default.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Where snapshots are written (default `<data_dir>/prism/backups`).
    pub backups_dir: String,
    /// Where saved palettes live (default `<data_dir>/prism/palettes`).
    pub palettes_dir: String,
}

impl PathsConfig {
    pub fn backups_dir(&self, home: &Path) -> Result<PathBuf, ConfigError> {
        resolve_dir(&self.backups_dir, "backups", home)
    }

    pub fn palettes_dir(&self, home: &Path) -> Result<PathBuf, ConfigError> {
        resolve_dir(&self.palettes_dir, "palettes", home)
    }
}

fn resolve_dir(configured: &str, leaf: &str, home: &Path) -> Result<PathBuf, ConfigError> {
    if !configured.trim().is_empty() {
        return Ok(expand_home(configured.trim(), home));
    }
    let data_dir = dirs::data_dir()
        .ok_or_else(|| ConfigError::ParseError("could not determine data directory".into()))?;
    Ok(data_dir.join(APP_NAME).join(leaf))
}

/// Expand a leading `~` or `~/` against `home`. Other paths pass through.
pub fn expand_home(raw: &str, home: &Path) -> PathBuf {
    if raw == "~" {
        home.to_path_buf()
    } else if let Some(rest) = raw.strip_prefix("~/") {
        home.join(rest)
    } else {
        PathBuf::from(raw)
    }
}
