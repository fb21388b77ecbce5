//! Where files live, and how a live path maps into a snapshot.
//!
//! Snapshot-relative paths come in two flavours: files under the home
//! directory are stored relative to home, system files are stored relative
//! to the filesystem root and always begin with [`SYSTEM_PREFIX`].

use std::path::{Component, Path, PathBuf};

use prism_common::PlatformError;

/// First component of every system-file path inside a snapshot.
pub const SYSTEM_PREFIX: &str = "etc";

/// Returns the current user's home directory.
pub fn home_dir() -> Result<PathBuf, PlatformError> {
    dirs::home_dir()
        .ok_or_else(|| PlatformError::PathError("could not determine home directory".into()))
}

/// The two roots that live paths are resolved against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathLayout {
    pub home: PathBuf,
    pub system_root: PathBuf,
}

impl PathLayout {
    pub fn new(home: impl Into<PathBuf>, system_root: impl Into<PathBuf>) -> Self {
        Self {
            home: home.into(),
            system_root: system_root.into(),
        }
    }

    /// The real layout: the user's home and `/`.
    pub fn detect() -> Result<Self, PlatformError> {
        Ok(Self::new(home_dir()?, "/"))
    }

    /// Snapshot-relative path for a live file, or `None` when the file is
    /// outside both supported roots.
    pub fn relative_for(&self, path: &Path) -> Option<PathBuf> {
        if let Ok(rel) = path.strip_prefix(&self.home) {
            // A home file under ~/etc would be restored into the system root.
            if is_plain(rel) && !Self::is_system(rel) {
                return Some(rel.to_path_buf());
            }
            return None;
        }
        let rel = path.strip_prefix(&self.system_root).ok()?;
        (is_plain(rel) && Self::is_system(rel)).then(|| rel.to_path_buf())
    }

    /// Live location for a snapshot-relative path.
    pub fn target_for(&self, relative: &Path) -> PathBuf {
        if Self::is_system(relative) {
            self.system_root.join(relative)
        } else {
            self.home.join(relative)
        }
    }

    pub fn is_system(relative: &Path) -> bool {
        matches!(
            relative.components().next(),
            Some(Component::Normal(first)) if first == SYSTEM_PREFIX
        )
    }
}

/// Non-empty and made only of normal components (no `..`, no root).
fn is_plain(rel: &Path) -> bool {
    rel.components().next().is_some()
        && rel.components().all(|c| matches!(c, Component::Normal(_)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> PathLayout {
        PathLayout::new("/home/ada", "/")
    }

    #[test]
    fn home_files_are_home_relative() {
        assert_eq!(
            layout().relative_for(Path::new("/home/ada/.config/kitty/colors.conf")),
            Some(PathBuf::from(".config/kitty/colors.conf"))
        );
    }

    #[test]
    fn etc_files_keep_their_prefix() {
        assert_eq!(
            layout().relative_for(Path::new("/etc/sddm.conf.d/theme.conf")),
            Some(PathBuf::from("etc/sddm.conf.d/theme.conf"))
        );
    }

    #[test]
    fn unsupported_locations_are_rejected() {
        let layout = layout();
        assert_eq!(layout.relative_for(Path::new("/usr/share/x.conf")), None);
        assert_eq!(layout.relative_for(Path::new("/home/ada")), None);
        assert_eq!(layout.relative_for(Path::new("/home/ada/etc/x")), None);
        assert_eq!(layout.relative_for(Path::new("/home/ada/../bob/x")), None);
    }

    #[test]
    fn target_for_inverts_relative_for() {
        let layout = layout();
        for live in ["/home/ada/.config/waybar/colors.css", "/etc/sddm.conf"] {
            let rel = layout.relative_for(Path::new(live)).unwrap();
            assert_eq!(layout.target_for(&rel), PathBuf::from(live));
        }
    }

    #[test]
    fn system_root_can_be_relocated() {
        let layout = PathLayout::new("/tmp/h", "/tmp/root");
        assert_eq!(
            layout.relative_for(Path::new("/tmp/root/etc/x.conf")),
            Some(PathBuf::from("etc/x.conf"))
        );
        assert_eq!(
            layout.target_for(Path::new("etc/x.conf")),
            PathBuf::from("/tmp/root/etc/x.conf")
        );
    }

    #[test]
    fn home_dir_resolves() {
        assert!(home_dir().is_ok());
    }
}
