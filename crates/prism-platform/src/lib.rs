//! Platform side of prism: file-system layout, snapshots, restore, and the
//! external programs prism drives (color extractor, reload hooks, sudo).

pub mod backup;
pub mod external;
pub mod paths;
pub mod restore;

pub use backup::{BackupManager, Snapshot, SnapshotEntry};
pub use external::{
    notify_all, ColorExtractor, CommandNotifier, ImageMagickExtractor, ReloadNotifier,
};
pub use paths::{home_dir, PathLayout};
pub use restore::{PrivilegedCopy, RestoreEngine, RestoreOutcome, RestoreReport, SudoCopy};
