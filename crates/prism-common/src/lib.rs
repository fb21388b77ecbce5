pub mod errors;
pub mod types;

pub use errors::{
    BackupError, ColorError, ConfigError, ExtractionError, PaletteError, PlatformError,
    PrismError, RenderError,
};
pub use types::Color;

pub type Result<T> = std::result::Result<T, PrismError>;
