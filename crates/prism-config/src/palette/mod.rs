//! Semantic palettes.
//!
//! A [`Palette`] maps a fixed set of [`Role`]s to colors. Palettes are built
//! once (derived from candidate colors or loaded from disk) and never mutated;
//! renderers receive them by reference.

mod derive;
mod roles;


use chrono::{DateTime, SubsecRound, Utc};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

pub use derive::{
    bg_light_for, button_bg_for, cursorline_for, derive_colors, prepare_candidates,
    BG_LIGHT_ON_DARK_TEXT, BG_LIGHT_ON_LIGHT_TEXT, CURSORLINE_DARKEN_FACTOR,
    CURSORLINE_LIGHTEN_FACTOR, DEFAULT_ERROR, DEFAULT_SUCCESS, DEFAULT_WARNING,
    FALLBACK_BACKGROUND, FALLBACK_CANDIDATES, MIN_CANDIDATES, MIN_TEXT_CONTRAST,
    MIN_UI_CONTRAST, TEXT_ON_DARK, TEXT_ON_LIGHT,
};
pub use roles::{PaletteColors, Role};

/// Sentinel stored in `source_image` for palettes not derived from an image.
pub const CUSTOM_SOURCE: &str = "custom";

/// Roles that also get `_RGB` / `_RGBA` encodings in render bindings.
const ENCODED_ROLES: [Role; 6] = [
    Role::Primary,
    Role::Secondary,
    Role::Accent,
    Role::Background,
    Role::Text,
    Role::BgLight,
];

/// Where a palette's colors came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceImage {
    Path(PathBuf),
    Custom,
}

impl SourceImage {
    pub fn from_record(value: &str) -> Self {
        if value == CUSTOM_SOURCE {
            Self::Custom
        } else {
            Self::Path(PathBuf::from(value))
        }
    }
}

impl fmt::Display for SourceImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path(p) => write!(f, "{}", p.display()),
            Self::Custom => f.write_str(CUSTOM_SOURCE),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub source_image: SourceImage,
    pub colors: PaletteColors,
}

impl Palette {
    /// Derive a new palette from raw candidate colors.
    ///
    /// Never fails: malformed candidates are dropped and short lists fall back
    /// to [`FALLBACK_CANDIDATES`].
    pub fn derive<S: AsRef<str>>(
        name: impl Into<String>,
        source_image: SourceImage,
        candidates: &[S],
    ) -> Self {
        Self {
            name: name.into(),
            created_at: Utc::now().trunc_subsecs(0),
            source_image,
            colors: derive_colors(candidates),
        }
    }

    /// Flat uppercase-keyed map consumed by template rendering.
    ///
    /// Every role yields `ROLE` (`#rrggbb`) and `ROLE_HEX` (digits only); the
    /// main UI roles additionally yield `ROLE_RGB` (`r, g, b`) and
    /// `ROLE_RGBA` (`rgba(r,g,b,0xff)`).
    pub fn render_bindings(&self) -> BTreeMap<String, String> {
        let mut bindings = BTreeMap::new();
        for (role, color) in self.colors.iter() {
            let key = role.binding_name();
            let hex = color.to_hex();
            bindings.insert(format!("{key}_HEX"), hex[1..].to_string());
            bindings.insert(key.clone(), hex);
        }
        for role in ENCODED_ROLES {
            let color = self.colors.get(role);
            let key = role.binding_name();
            bindings.insert(format!("{key}_RGB"), color.to_rgb_triplet());
            bindings.insert(format!("{key}_RGBA"), color.to_rgba_string(0xff));
        }
        bindings
    }
}
