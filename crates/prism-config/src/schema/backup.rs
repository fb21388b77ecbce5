//! Backup configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BackupConfig {
    /// Files snapshotted in addition to every template target.
    /// Absolute paths outside the home directory must live under `/etc`.
    pub extra_files: Vec<String>,
}
