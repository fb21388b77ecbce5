//! Template registrations.

use serde::{Deserialize, Serialize};

use crate::template::PlaceholderStyle;

/// One rendered config file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    pub name: String,
    /// Template file containing placeholders.
    pub source: String,
    /// Live config file that gets replaced.
    pub target: String,
    pub style: PlaceholderStyle,
}
