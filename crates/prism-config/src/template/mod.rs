//! Template rendering with palette bindings.
//!
//! Each registered template declares its [`PlaceholderStyle`] up front; the
//! renderer never guesses syntax from file names. A render that leaves any
//! placeholder unresolved is an error, and nothing is written.


use prism_common::RenderError;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::LazyLock;
use tracing::info;

use crate::palette::Palette;
use crate::writer::write_atomic;

static BRACED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{\s*([A-Za-z][A-Za-z0-9_]*)\s*\}\}").unwrap());

static ATAT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@@([A-Za-z][A-Za-z0-9_]*)@@").unwrap());

/// Placeholder syntax used by a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaceholderStyle {
    /// `{{NAME}}`
    #[default]
    Braced,
    /// `@@NAME@@`
    AtAt,
}

impl PlaceholderStyle {
    fn pattern(self) -> &'static Regex {
        match self {
            Self::Braced => &BRACED_RE,
            Self::AtAt => &ATAT_RE,
        }
    }
}

/// Substitute every placeholder whose name is bound. Unknown names are left as-is.
pub fn render(text: &str, style: PlaceholderStyle, bindings: &BTreeMap<String, String>) -> String {
    style
        .pattern()
        .replace_all(text, |caps: &Captures| match bindings.get(&caps[1]) {
            Some(value) => value.clone(),
            None => caps[0].to_string(),
        })
        .into_owned()
}

/// Names of placeholders still present in `text`, deduplicated, in order of appearance.
pub fn unresolved_placeholders(text: &str, style: PlaceholderStyle) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for caps in style.pattern().captures_iter(text) {
        let name = caps[1].to_string();
        if !names.contains(&name) {
            names.push(name);
        }
    }
    names
}

pub fn has_unresolved(text: &str, style: PlaceholderStyle) -> bool {
    style.pattern().is_match(text)
}

/// Render `source` with the palette and atomically replace `target`.
pub fn render_to_file(
    source: &Path,
    target: &Path,
    style: PlaceholderStyle,
    palette: &Palette,
) -> Result<(), RenderError> {
    let text = std::fs::read_to_string(source).map_err(|e| RenderError::Io {
        path: source.to_path_buf(),
        source: e,
    })?;

    let rendered = render(&text, style, &palette.render_bindings());
    let missing = unresolved_placeholders(&rendered, style);
    if !missing.is_empty() {
        return Err(RenderError::Unresolved {
            target: target.to_path_buf(),
            names: missing,
        });
    }

    write_atomic(target, rendered.as_bytes()).map_err(|e| RenderError::Io {
        path: target.to_path_buf(),
        source: e,
    })?;

    info!(path = %target.display(), palette = %palette.name, "template rendered");
    Ok(())
}
