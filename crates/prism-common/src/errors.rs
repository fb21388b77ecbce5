use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColorError {
    #[error("malformed color: {0:?}")]
    Malformed(String),
}

#[derive(Debug, thiserror::Error)]
pub enum PaletteError {
    #[error("palette not found: {0}")]
    NotFound(String),

    #[error("malformed palette record '{name}': {reason}")]
    MalformedRecord { name: String, reason: String },

    #[error("invalid palette name: {0:?}")]
    InvalidName(String),

    #[error("palette io error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Color(#[from] ColorError),
}

#[derive(Debug, thiserror::Error)]
pub enum BackupError {
    #[error("snapshot not found: {0}")]
    NotFound(String),

    #[error("backup io error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} exists but is not in the snapshot; refusing to overwrite it", .0.display())]
    Uncovered(PathBuf),

    #[error("restore partially failed for {} file(s): {}", failed.len(), join_paths(failed))]
    PartialFailure { failed: Vec<PathBuf> },
}

#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("image not found: {0}")]
    MissingImage(PathBuf),

    #[error("color extractor failed: {0}")]
    Tool(String),

    #[error("color extractor timed out after {0}s")]
    Timeout(u64),

    #[error("color extractor returned no usable colors")]
    NoCandidates,
}

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("unresolved placeholders in {}: {}", target.display(), names.join(", "))]
    Unresolved { target: PathBuf, names: Vec<String> },

    #[error("template io error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    #[error("path error: {0}")]
    PathError(String),

    #[error("command error: {0}")]
    CommandError(String),
}

#[derive(Debug, thiserror::Error)]
pub enum PrismError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Color(#[from] ColorError),

    #[error(transparent)]
    Palette(#[from] PaletteError),

    #[error(transparent)]
    Backup(#[from] BackupError),

    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    Platform(#[from] PlatformError),

    #[error("{source} (previous configuration backed up to {})", snapshot.display())]
    RenderAfterBackup {
        snapshot: PathBuf,
        #[source]
        source: RenderError,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

fn join_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
