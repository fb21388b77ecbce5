//! Prism configuration and palette core.
//!
//! Color math, palette derivation and persistence, template rendering, and
//! the TOML configuration file. Everything here is synchronous and free of
//! external processes; the platform crate drives the outside world.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use prism_config::{load_config, Palette, PaletteStore, SourceImage};
//!
//! let config = load_config().expect("failed to load config");
//! let palette = Palette::derive("demo", SourceImage::Custom, &["#1e1e2e", "#cdd6f4"]);
//! let home = dirs::home_dir().unwrap();
//! let store = PaletteStore::new(config.paths.palettes_dir(&home).unwrap());
//! store.save(&palette, "demo").unwrap();
//! ```

pub mod colors;
pub mod palette;
pub mod schema;
pub mod store;
pub mod template;
pub mod toml_loader;
pub mod validation;
pub mod writer;

// Re-export core types for convenience
pub use palette::{Palette, PaletteColors, Role, SourceImage};
pub use schema::{PlaceholderStyle, PrismConfig, ReloadConfig, TemplateConfig};
pub use store::{describe_palette, PaletteStore};
pub use template::render_to_file;
pub use writer::{copy_atomic, write_atomic};

use prism_common::ConfigError;
use std::path::Path;

/// Load config from the platform default path, creating a commented
/// default file on first run.
pub fn load_config() -> Result<PrismConfig, ConfigError> {
    toml_loader::load_default()
}

/// Load config from `path` when given, otherwise from the default location.
pub fn load_config_from(path: Option<&Path>) -> Result<PrismConfig, ConfigError> {
    match path {
        Some(path) => toml_loader::load_from_path(path),
        None => load_config(),
    }
}
