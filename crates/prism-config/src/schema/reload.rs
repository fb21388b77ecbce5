//! Reload hooks run after templates are rendered.

use serde::{Deserialize, Serialize};

/// A command that tells a running program to pick up new colors.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReloadConfig {
    pub name: String,
    /// Program followed by its arguments; no shell is involved.
    pub command: Vec<String>,
    pub timeout_secs: u64,
}

impl Default for ReloadConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            command: Vec::new(),
            timeout_secs: 10,
        }
    }
}
