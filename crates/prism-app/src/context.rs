//! Everything a command needs, resolved once from the loaded config.

use std::path::{Path, PathBuf};

use prism_common::PrismError;
use prism_config::schema::expand_home;
use prism_config::{PaletteStore, PrismConfig};
use prism_platform::{BackupManager, PathLayout, RestoreEngine, SudoCopy};

pub struct Context {
    pub config: PrismConfig,
    pub layout: PathLayout,
    pub palettes: PaletteStore,
    pub backups_root: PathBuf,
}

impl Context {
    /// Load config (explicit path or the default location) against the real
    /// home directory.
    pub fn load(config_path: Option<&Path>) -> Result<Self, PrismError> {
        if let Some(path) = config_path {
            tracing::info!("using config override: {}", path.display());
        }
        let config = prism_config::load_config_from(config_path)?;
        Self::new(config, PathLayout::detect()?)
    }

    pub fn new(config: PrismConfig, layout: PathLayout) -> Result<Self, PrismError> {
        let palettes = PaletteStore::new(config.paths.palettes_dir(&layout.home)?);
        let backups_root = config.paths.backups_dir(&layout.home)?;
        Ok(Self {
            config,
            layout,
            palettes,
            backups_root,
        })
    }

    pub fn backup_manager(&self) -> BackupManager {
        BackupManager::new(&self.backups_root, self.layout.clone())
    }

    pub fn restore_engine(&self) -> RestoreEngine {
        RestoreEngine::new(self.backup_manager(), Box::new(SudoCopy))
    }

    /// Files snapshotted before any theme change.
    pub fn tracked_files(&self) -> Vec<PathBuf> {
        self.config.tracked_files(&self.layout.home)
    }

    pub fn expand(&self, raw: &str) -> PathBuf {
        expand_home(raw, &self.layout.home)
    }
}


#[cfg(test)]
mod tests {
    use super::testing::temp_context;
    use super::*;
    use prism_config::TemplateConfig;

    #[test]
    fn tracked_files_expand_against_layout_home() {
        let mut config = PrismConfig::default();
        config.templates.push(TemplateConfig {
            name: "kitty".into(),
            source: "~/t/kitty.conf".into(),
            target: "~/.config/kitty/colors.conf".into(),
            ..Default::default()
        });
        config.backup.extra_files.push("/etc/sddm.conf".into());
        let (_dir, ctx) = temp_context(config);

        assert_eq!(
            ctx.tracked_files(),
            [
                ctx.layout.home.join(".config/kitty/colors.conf"),
                PathBuf::from("/etc/sddm.conf")
            ]
        );
    }

    #[test]
    fn configured_dirs_are_used() {
        let (dir, ctx) = temp_context(PrismConfig::default());
        assert_eq!(ctx.palettes.root(), dir.path().join("data/palettes"));
        assert_eq!(ctx.backup_manager().backups_root(), dir.path().join("data/backups"));
    }
}
