//! On-disk JSON shape of a saved palette.

use chrono::{DateTime, SecondsFormat, Utc};
use prism_common::{Color, PaletteError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::palette::{Palette, PaletteColors, Role, SourceImage};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct PaletteRecord {
    pub name: String,
    pub timestamp: String,
    pub source_image: String,
    pub colors: BTreeMap<String, String>,
}

impl PaletteRecord {
    pub fn from_palette(palette: &Palette, name: &str) -> Self {
        Self {
            name: name.to_string(),
            timestamp: palette
                .created_at
                .to_rfc3339_opts(SecondsFormat::Secs, true),
            source_image: palette.source_image.to_string(),
            colors: palette
                .colors
                .iter()
                .map(|(role, color)| (role.key().to_string(), color.to_hex()))
                .collect(),
        }
    }

    pub fn into_palette(self, name: &str) -> Result<Palette, PaletteError> {
        let malformed = |reason: String| PaletteError::MalformedRecord {
            name: name.to_string(),
            reason,
        };

        let created_at = DateTime::parse_from_rfc3339(&self.timestamp)
            .map_err(|e| malformed(format!("bad timestamp {:?}: {e}", self.timestamp)))?
            .with_timezone(&Utc);

        let role = |role: Role| -> Result<Color, PaletteError> {
            let value = self
                .colors
                .get(role.key())
                .ok_or_else(|| malformed(format!("missing role '{role}'")))?;
            Color::from_hex(value)
                .map_err(|_| malformed(format!("role '{role}' has invalid color {value:?}")))
        };

        let colors = PaletteColors {
            primary: role(Role::Primary)?,
            secondary: role(Role::Secondary)?,
            accent: role(Role::Accent)?,
            background: role(Role::Background)?,
            text: role(Role::Text)?,
            error: role(Role::Error)?,
            success: role(Role::Success)?,
            warning: role(Role::Warning)?,
            bg_light: role(Role::BgLight)?,
            bg_dark: role(Role::BgDark)?,
            cursorline: role(Role::Cursorline)?,
            button_bg: role(Role::ButtonBg)?,
        };

        Ok(Palette {
            name: self.name,
            created_at,
            source_image: SourceImage::from_record(&self.source_image),
            colors,
        })
    }
}
