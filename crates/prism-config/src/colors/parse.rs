//! Candidate color parsing.
//!
//! The extraction tools emit free-form text; only `#` followed by exactly six
//! hex digits counts as a color; every other token is dropped.

use prism_common::Color;
use regex::Regex;
use std::sync::LazyLock;

/// A standalone `#rrggbb` token. Longer hex runs (`#rrggbbaa`) do not match.
pub(crate) static HEX_TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#[0-9a-fA-F]{6}\b").unwrap());

/// Strict whole-string form used for validation.
pub(crate) static HEX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#[0-9a-fA-F]{6}$").unwrap());

/// Pull every `#rrggbb` token out of `text`, in order, lowercased.
pub fn extract_hex_tokens(text: &str) -> Vec<String> {
    HEX_TOKEN_RE
        .find_iter(text)
        .map(|m| m.as_str().to_ascii_lowercase())
        .collect()
}

/// Parse candidate strings, silently discarding anything that is not `#rrggbb`.
pub fn parse_candidates<S: AsRef<str>>(candidates: &[S]) -> Vec<Color> {
    candidates
        .iter()
        .map(|s| s.as_ref().trim())
        .filter(|s| HEX_RE.is_match(s))
        .filter_map(|s| Color::from_hex(s).ok())
        .collect()
}

/// Whether `s` is a `#rrggbb` color.
pub fn validate_color(s: &str) -> bool {
    HEX_RE.is_match(s.trim())
}
