//! Candidate color extraction via ImageMagick.

use std::ffi::OsString;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use prism_common::ExtractionError;
use prism_config::colors::extract_hex_tokens;
use prism_config::schema::ExtractorConfig;
use tokio::process::Command;
use tracing::{debug, info};

/// Produces raw candidate colors for an image.
#[async_trait]
pub trait ColorExtractor: Send + Sync {
    async fn extract(&self, image: &Path) -> Result<Vec<String>, ExtractionError>;
}

/// Quantizes the image with ImageMagick and reads the unique colors back
/// from its `txt:` output.
#[derive(Debug, Clone)]
pub struct ImageMagickExtractor {
    program: String,
    colors: u32,
    timeout: Duration,
}

impl ImageMagickExtractor {
    pub fn new(program: impl Into<String>, colors: u32, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            colors,
            timeout,
        }
    }

    pub fn from_config(config: &ExtractorConfig) -> Self {
        Self::new(
            config.program.clone(),
            config.colors,
            Duration::from_secs(config.timeout_secs),
        )
    }

    fn args(&self, image: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![image.as_os_str().to_os_string()];
        args.extend(
            [
                "-alpha".to_string(),
                "off".to_string(),
                "-resize".to_string(),
                "25%".to_string(),
                "-colors".to_string(),
                self.colors.to_string(),
                "-unique-colors".to_string(),
                // 16-bit images would otherwise print #rrrrggggbbbb.
                "-depth".to_string(),
                "8".to_string(),
                "txt:-".to_string(),
            ]
            .map(OsString::from),
        );
        args
    }
}

#[async_trait]
impl ColorExtractor for ImageMagickExtractor {
    async fn extract(&self, image: &Path) -> Result<Vec<String>, ExtractionError> {
        if !image.is_file() {
            return Err(ExtractionError::MissingImage(image.to_path_buf()));
        }

        debug!(program = %self.program, image = %image.display(), "running color extractor");
        let child = Command::new(&self.program)
            .args(self.args(image))
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output();

        let output = tokio::time::timeout(self.timeout, child)
            .await
            .map_err(|_| ExtractionError::Timeout(self.timeout.as_secs()))?
            .map_err(|e| ExtractionError::Tool(format!("failed to run {}: {e}", self.program)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ExtractionError::Tool(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }

        let candidates = extract_hex_tokens(&String::from_utf8_lossy(&output.stdout));
        if candidates.is_empty() {
            return Err(ExtractionError::NoCandidates);
        }
        info!(count = candidates.len(), "extracted candidate colors");
        Ok(candidates)
    }
}
