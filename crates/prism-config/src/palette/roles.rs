//! Role names and the role → color table.

use prism_common::Color;
use std::fmt;
use std::str::FromStr;

/// A fixed semantic slot in a palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Role {
    Primary,
    Secondary,
    Accent,
    Background,
    Text,
    Error,
    Success,
    Warning,
    BgLight,
    BgDark,
    Cursorline,
    ButtonBg,
}

impl Role {
    pub const ALL: [Role; 12] = [
        Role::Primary,
        Role::Secondary,
        Role::Accent,
        Role::Background,
        Role::Text,
        Role::Error,
        Role::Success,
        Role::Warning,
        Role::BgLight,
        Role::BgDark,
        Role::Cursorline,
        Role::ButtonBg,
    ];

    /// Lowercase storage key.
    pub fn key(self) -> &'static str {
        match self {
            Role::Primary => "primary",
            Role::Secondary => "secondary",
            Role::Accent => "accent",
            Role::Background => "background",
            Role::Text => "text",
            Role::Error => "error",
            Role::Success => "success",
            Role::Warning => "warning",
            Role::BgLight => "bg_light",
            Role::BgDark => "bg_dark",
            Role::Cursorline => "cursorline",
            Role::ButtonBg => "button_bg",
        }
    }

    /// Uppercase name used as a template placeholder.
    pub fn binding_name(self) -> String {
        self.key().to_ascii_uppercase()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|r| r.key().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown role '{s}'"))
    }
}

/// One color per [`Role`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteColors {
    pub primary: Color,
    pub secondary: Color,
    pub accent: Color,
    pub background: Color,
    pub text: Color,
    pub error: Color,
    pub success: Color,
    pub warning: Color,
    pub bg_light: Color,
    pub bg_dark: Color,
    pub cursorline: Color,
    pub button_bg: Color,
}

impl PaletteColors {
    pub fn get(&self, role: Role) -> Color {
        match role {
            Role::Primary => self.primary,
            Role::Secondary => self.secondary,
            Role::Accent => self.accent,
            Role::Background => self.background,
            Role::Text => self.text,
            Role::Error => self.error,
            Role::Success => self.success,
            Role::Warning => self.warning,
            Role::BgLight => self.bg_light,
            Role::BgDark => self.bg_dark,
            Role::Cursorline => self.cursorline,
            Role::ButtonBg => self.button_bg,
        }
    }

    /// Roles paired with their colors, in [`Role::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (Role, Color)> + '_ {
        Role::ALL.into_iter().map(|role| (role, self.get(role)))
    }
}
