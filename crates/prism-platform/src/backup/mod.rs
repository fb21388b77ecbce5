//! Timestamped snapshots of the files a theme operation is about to touch.
//!
//! Layout: `<backups_root>/<id>/<relative path>`, where the relative path
//! comes from [`PathLayout::relative_for`]. Snapshots are best-effort: files
//! that do not exist are skipped, and an empty snapshot is still a snapshot.

#[cfg(test)]
mod tests;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use chrono::{DateTime, Local};
use prism_common::BackupError;
use regex::Regex;
use tracing::{debug, info, warn};

use crate::paths::PathLayout;

/// `chrono` format of the base snapshot id (local time, second resolution).
pub const SNAPSHOT_ID_FORMAT: &str = "%Y-%m-%d_%H%M%S";

/// Snapshots taken within the same second get `_01` .. `_99` appended.
const MAX_COLLISION_SUFFIX: u32 = 99;

static SNAPSHOT_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}_\d{6}(_\d{2})?$").unwrap());

/// Whether `name` has the shape of a snapshot id.
pub fn is_snapshot_id(name: &str) -> bool {
    SNAPSHOT_ID_RE.is_match(name)
}

/// One captured file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotEntry {
    /// Path inside the snapshot directory.
    pub relative: PathBuf,
    /// Live location the file was captured from and restores to.
    pub source: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub id: String,
    /// Absolute snapshot directory.
    pub path: PathBuf,
    pub files: Vec<SnapshotEntry>,
}

impl Snapshot {
    /// Where the captured copy of `entry` is stored.
    pub fn stored_path(&self, entry: &SnapshotEntry) -> PathBuf {
        self.path.join(&entry.relative)
    }
}

pub struct BackupManager {
    backups_root: PathBuf,
    layout: PathLayout,
}

impl BackupManager {
    pub fn new(backups_root: impl Into<PathBuf>, layout: PathLayout) -> Self {
        Self {
            backups_root: backups_root.into(),
            layout,
        }
    }

    pub fn backups_root(&self) -> &Path {
        &self.backups_root
    }

    /// Copy every existing file in `files` into a new snapshot.
    pub fn snapshot(&self, files: &[PathBuf]) -> Result<Snapshot, BackupError> {
        self.snapshot_at(files, Local::now())
    }

    pub(crate) fn snapshot_at(
        &self,
        files: &[PathBuf],
        now: DateTime<Local>,
    ) -> Result<Snapshot, BackupError> {
        let (id, dir) = self.allocate(&now.format(SNAPSHOT_ID_FORMAT).to_string())?;

        let mut captured = Vec::new();
        for source in files {
            match self.capture(&dir, source) {
                Ok(Some(entry)) => captured.push(entry),
                Ok(None) => {}
                Err(e) => {
                    let _ = fs::remove_dir_all(&dir);
                    return Err(e);
                }
            }
        }

        info!(
            id = %id,
            files = captured.len(),
            requested = files.len(),
            "snapshot created"
        );
        Ok(Snapshot {
            id,
            path: dir,
            files: captured,
        })
    }

    /// Reserve a fresh snapshot directory. `create_dir` fails on an existing
    /// directory, so each id is handed out at most once.
    fn allocate(&self, base: &str) -> Result<(String, PathBuf), BackupError> {
        fs::create_dir_all(&self.backups_root).map_err(|source| BackupError::Io {
            path: self.backups_root.clone(),
            source,
        })?;

        let candidates = std::iter::once(base.to_string())
            .chain((1..=MAX_COLLISION_SUFFIX).map(|n| format!("{base}_{n:02}")));
        for id in candidates {
            let dir = self.backups_root.join(&id);
            match fs::create_dir(&dir) {
                Ok(()) => return Ok((id, dir)),
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                    debug!(id = %id, "snapshot id taken, trying next suffix");
                }
                Err(source) => return Err(BackupError::Io { path: dir, source }),
            }
        }

        Err(BackupError::Io {
            path: self.backups_root.join(base),
            source: io::Error::new(
                io::ErrorKind::AlreadyExists,
                "too many snapshots within one second",
            ),
        })
    }

    fn capture(&self, dir: &Path, source: &Path) -> Result<Option<SnapshotEntry>, BackupError> {
        if !source.is_file() {
            debug!(path = %source.display(), "not present, skipping");
            return Ok(None);
        }
        let Some(relative) = self.layout.relative_for(source) else {
            warn!(
                path = %source.display(),
                "outside home and system config roots, not backed up"
            );
            return Ok(None);
        };

        let dest = dir.join(&relative);
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent).map_err(|e| BackupError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
        fs::copy(source, &dest).map_err(|e| BackupError::Io {
            path: source.to_path_buf(),
            source: e,
        })?;

        debug!(path = %source.display(), "captured");
        Ok(Some(SnapshotEntry {
            relative,
            source: source.to_path_buf(),
        }))
    }

    /// Snapshot ids, newest first. A missing root yields an empty list.
    pub fn list(&self) -> Result<Vec<String>, BackupError> {
        let entries = match fs::read_dir(&self.backups_root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(BackupError::Io {
                    path: self.backups_root.clone(),
                    source,
                })
            }
        };

        let mut ids: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().is_dir())
            .filter_map(|entry| entry.file_name().into_string().ok())
            .filter(|name| is_snapshot_id(name))
            .collect();
        ids.sort_unstable_by(|a, b| b.cmp(a));
        Ok(ids)
    }

    /// Load the file listing of an existing snapshot.
    pub fn get(&self, id: &str) -> Result<Snapshot, BackupError> {
        if !is_snapshot_id(id) {
            return Err(BackupError::NotFound(id.to_string()));
        }
        let path = self.backups_root.join(id);
        if !path.is_dir() {
            return Err(BackupError::NotFound(id.to_string()));
        }

        let mut relatives = Vec::new();
        collect_files(&path, Path::new(""), &mut relatives)?;
        relatives.sort();

        let files = relatives
            .into_iter()
            .map(|relative| SnapshotEntry {
                source: self.layout.target_for(&relative),
                relative,
            })
            .collect();

        Ok(Snapshot {
            id: id.to_string(),
            path,
            files,
        })
    }
}

fn collect_files(root: &Path, prefix: &Path, out: &mut Vec<PathBuf>) -> Result<(), BackupError> {
    let dir = root.join(prefix);
    let entries = fs::read_dir(&dir).map_err(|source| BackupError::Io {
        path: dir.clone(),
        source,
    })?;
    for entry in entries {
        let entry = entry.map_err(|source| BackupError::Io {
            path: dir.clone(),
            source,
        })?;
        let relative = prefix.join(entry.file_name());
        let file_type = entry.file_type().map_err(|source| BackupError::Io {
            path: entry.path(),
            source,
        })?;
        if file_type.is_dir() {
            collect_files(root, &relative, out)?;
        } else if file_type.is_file() {
            out.push(relative);
        }
    }
    Ok(())
}
