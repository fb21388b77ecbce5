//! Named palette records on disk.
//!
//! Each palette lives in `<root>/<name>.json`. Writes go through
//! [`write_atomic`](crate::writer::write_atomic) so a crash never leaves a
//! half-written record behind.

mod record;

#[cfg(test)]
mod tests;

use prism_common::PaletteError;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::palette::Palette;
use crate::writer::write_atomic;
use record::PaletteRecord;

const RECORD_EXTENSION: &str = "json";

pub struct PaletteStore {
    root: PathBuf,
}

impl PaletteStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn record_path(&self, name: &str) -> Result<PathBuf, PaletteError> {
        validate_name(name)?;
        Ok(self.root.join(format!("{name}.{RECORD_EXTENSION}")))
    }

    /// Persist `palette` under `name`, replacing any existing record.
    pub fn save(&self, palette: &Palette, name: &str) -> Result<PathBuf, PaletteError> {
        let path = self.record_path(name)?;
        let record = PaletteRecord::from_palette(palette, name);
        let json = serde_json::to_string_pretty(&record).map_err(|e| {
            PaletteError::MalformedRecord {
                name: name.to_string(),
                reason: format!("failed to serialize: {e}"),
            }
        })?;

        write_atomic(&path, json.as_bytes()).map_err(|source| PaletteError::Io {
            path: path.clone(),
            source,
        })?;

        info!(name, path = %path.display(), "palette saved");
        Ok(path)
    }

    pub fn load(&self, name: &str) -> Result<Palette, PaletteError> {
        let path = self.record_path(name)?;
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(PaletteError::NotFound(name.to_string()));
            }
            Err(source) => return Err(PaletteError::Io { path, source }),
        };

        let record: PaletteRecord =
            serde_json::from_str(&content).map_err(|e| PaletteError::MalformedRecord {
                name: name.to_string(),
                reason: e.to_string(),
            })?;

        debug!(name, path = %path.display(), "palette loaded");
        record.into_palette(name)
    }

    /// Names of all stored palettes, sorted. Missing directory means none.
    pub fn list(&self) -> Result<Vec<String>, PaletteError> {
        let entries = match std::fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(PaletteError::Io {
                    path: self.root.clone(),
                    source,
                })
            }
        };

        let mut names: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file()
                    && path.extension().and_then(|e| e.to_str()) == Some(RECORD_EXTENSION)
            })
            .filter_map(|path| path.file_stem()?.to_str().map(str::to_string))
            .collect();
        names.sort();
        Ok(names)
    }

    /// Human-readable dump of a stored palette.
    pub fn describe(&self, name: &str) -> Result<String, PaletteError> {
        let palette = self.load(name)?;
        Ok(describe_palette(&palette))
    }

    pub fn delete(&self, name: &str) -> Result<(), PaletteError> {
        let path = self.record_path(name)?;
        match std::fs::remove_file(&path) {
            Ok(()) => {
                info!(name, "palette deleted");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(PaletteError::NotFound(name.to_string()))
            }
            Err(source) => Err(PaletteError::Io { path, source }),
        }
    }
}

/// Render a palette as aligned `role  value` lines under a short header.
pub fn describe_palette(palette: &Palette) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Palette: {}", palette.name);
    let _ = writeln!(
        out,
        "Created: {}",
        palette.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    let _ = writeln!(out, "Source:  {}", palette.source_image);
    out.push('\n');
    for (role, color) in palette.colors.iter() {
        let _ = writeln!(out, "  {:<12} {}", role.key(), color);
    }
    out
}

/// Names become file stems, so anything path-like is rejected.
pub fn validate_name(name: &str) -> Result<(), PaletteError> {
    let invalid = name.trim().is_empty()
        || name.starts_with('.')
        || name.contains(['/', '\\'])
        || name.chars().any(char::is_control);
    if invalid {
        return Err(PaletteError::InvalidName(name.to_string()));
    }
    Ok(())
}
