//! Configuration schema types for prism.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod backup;
mod extractor;
mod paths;
mod reload;
mod templates;

pub use backup::*;
pub use extractor::*;
pub use paths::*;
pub use reload::*;
pub use templates::*;

pub use crate::template::PlaceholderStyle;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root configuration for prism.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PrismConfig {
    pub paths: PathsConfig,
    pub extractor: ExtractorConfig,
    pub backup: BackupConfig,
    pub templates: Vec<TemplateConfig>,
    pub reload: Vec<ReloadConfig>,
}

impl PrismConfig {
    /// Every file a theme operation may overwrite: template targets first,
    /// then `backup.extra_files`, without duplicates.
    pub fn tracked_files(&self, home: &Path) -> Vec<PathBuf> {
        let mut files: Vec<PathBuf> = Vec::new();
        let targets = self.templates.iter().map(|t| t.target.as_str());
        let extras = self.backup.extra_files.iter().map(String::as_str);
        for raw in targets.chain(extras) {
            let path = expand_home(raw, home);
            if !files.contains(&path) {
                files.push(path);
            }
        }
        files
    }
}
