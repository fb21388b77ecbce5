//! Replays a snapshot onto the live configuration.
//!
//! Every captured file is copied back atomically. System targets that reject
//! the direct write with `PermissionDenied` are retried through a
//! [`PrivilegedCopy`]; home targets never escalate. Failures are collected
//! and reported together, and files that were restored stay restored.

mod escalate;

#[cfg(test)]
mod tests;

use std::io;
use std::path::{Path, PathBuf};

use prism_common::BackupError;
use prism_config::copy_atomic;
use tracing::{debug, info, warn};

use crate::backup::{BackupManager, SnapshotEntry};
use crate::paths::PathLayout;

pub use escalate::{PrivilegedCopy, SudoCopy};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestoreOutcome {
    Complete,
    PartialFailure,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RestoreReport {
    pub snapshot_id: String,
    /// Live paths written, escalated ones included.
    pub restored: Vec<PathBuf>,
    /// Subset of `restored` that needed the privileged copy.
    pub escalated: Vec<PathBuf>,
    pub failed: Vec<PathBuf>,
}

impl RestoreReport {
    pub fn outcome(&self) -> RestoreOutcome {
        if self.failed.is_empty() {
            RestoreOutcome::Complete
        } else {
            RestoreOutcome::PartialFailure
        }
    }

    pub fn into_result(self) -> Result<Self, BackupError> {
        match self.outcome() {
            RestoreOutcome::Complete => Ok(self),
            RestoreOutcome::PartialFailure => Err(BackupError::PartialFailure {
                failed: self.failed,
            }),
        }
    }
}

/// Escalation is only worth trying for system files refused on permissions.
pub fn should_escalate(relative: &Path, err: &io::Error) -> bool {
    err.kind() == io::ErrorKind::PermissionDenied && PathLayout::is_system(relative)
}

/// Unprivileged copy from a stored file to its live location.
type DirectCopy = fn(&Path, &Path) -> io::Result<()>;

pub struct RestoreEngine {
    backups: BackupManager,
    escalator: Box<dyn PrivilegedCopy>,
    direct: DirectCopy,
}

impl RestoreEngine {
    pub fn new(backups: BackupManager, escalator: Box<dyn PrivilegedCopy>) -> Self {
        Self {
            backups,
            escalator,
            direct: copy_atomic,
        }
    }

    pub fn backups(&self) -> &BackupManager {
        &self.backups
    }

    /// Restore snapshot `id`. An unknown id fails before anything is written.
    pub fn restore(&self, id: &str) -> Result<RestoreReport, BackupError> {
        let snapshot = self.backups.get(id)?;
        info!(id, files = snapshot.files.len(), "restoring snapshot");

        let mut report = RestoreReport {
            snapshot_id: snapshot.id.clone(),
            ..Default::default()
        };
        for entry in &snapshot.files {
            let stored = snapshot.stored_path(entry);
            match self.restore_file(&stored, entry) {
                Ok(escalated) => {
                    if escalated {
                        report.escalated.push(entry.source.clone());
                    }
                    report.restored.push(entry.source.clone());
                }
                Err(reason) => {
                    warn!(path = %entry.source.display(), "restore failed: {reason}");
                    report.failed.push(entry.source.clone());
                }
            }
        }

        info!(
            id,
            restored = report.restored.len(),
            failed = report.failed.len(),
            "restore finished"
        );
        Ok(report)
    }

    /// Returns whether the privileged copy was used.
    fn restore_file(&self, stored: &Path, entry: &SnapshotEntry) -> Result<bool, String> {
        match (self.direct)(stored, &entry.source) {
            Ok(()) => {
                debug!(path = %entry.source.display(), "restored");
                Ok(false)
            }
            Err(e) if should_escalate(&entry.relative, &e) => {
                debug!(path = %entry.source.display(), "permission denied, escalating");
                self.escalator
                    .copy(stored, &entry.source)
                    .map(|()| true)
                    .map_err(|e| e.to_string())
            }
            Err(e) => Err(e.to_string()),
        }
    }
}
