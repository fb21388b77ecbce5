//! Color extraction tool configuration.

use serde::{Deserialize, Serialize};

/// External color extractor settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// ImageMagick executable (`magick`, or `convert` on older installs).
    pub program: String,
    /// Number of colors to quantize the image down to.
    pub colors: u32,
    /// Seconds before the extractor is abandoned.
    pub timeout_secs: u64,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            program: "magick".into(),
            colors: 16,
            timeout_secs: 10,
        }
    }
}
