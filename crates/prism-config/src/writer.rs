//! Atomic file writes.
//!
//! Live configuration files are read by other programs at arbitrary times,
//! so every replacement is written to a sibling `.tmp` file and renamed over
//! the target.

use std::io;
use std::path::{Path, PathBuf};

// =============================================================================
// ATOMIC WRITE
// =============================================================================

fn tmp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Where a write to `path` should land: the file a symlink points at, so
/// the link itself survives the rename.
fn resolve_target(path: &Path) -> io::Result<PathBuf> {
    match std::fs::symlink_metadata(path) {
        Ok(meta) if meta.file_type().is_symlink() => match std::fs::canonicalize(path) {
            Ok(real) => Ok(real),
            // Dangling link: write where it points.
            Err(_) => {
                let link = std::fs::read_link(path)?;
                let base = path.parent().unwrap_or(Path::new(""));
                Ok(base.join(link))
            }
        },
        _ => Ok(path.to_path_buf()),
    }
}

/// Write `contents` to `path` via a temporary sibling file and a rename.
///
/// Creates parent directories if they don't exist. Existing file permissions
/// are carried over to the replacement. A symlinked `path` is followed and
/// its target replaced instead.
pub fn write_atomic(path: &Path, contents: &[u8]) -> io::Result<()> {
    let resolved = resolve_target(path)?;
    let path = resolved.as_path();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let tmp_path = tmp_path_for(path);
    std::fs::write(&tmp_path, contents)?;

    if let Ok(meta) = std::fs::metadata(path) {
        let _ = std::fs::set_permissions(&tmp_path, meta.permissions());
    }

    if let Err(e) = std::fs::rename(&tmp_path, path) {
        let _ = std::fs::remove_file(&tmp_path);
        return Err(e);
    }

    tracing::debug!(path = %path.display(), "file written atomically");
    Ok(())
}

/// Copy `src` over `dst` atomically.
pub fn copy_atomic(src: &Path, dst: &Path) -> io::Result<()> {
    let contents = std::fs::read(src)?;
    write_atomic(dst, &contents)
}

// =============================================================================
// TESTS
// =============================================================================
