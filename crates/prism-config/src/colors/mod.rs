//! Color math: hex conversion, WCAG luminance and contrast, lighten/darken.
//!
//! Hex output is always lowercase `#rrggbb`. Luminance follows the WCAG 2.0
//! definition (sRGB gamma threshold `0.03928`, weights `0.2126/0.7152/0.0722`).

mod parse;


use prism_common::{Color, ColorError};

pub use parse::{extract_hex_tokens, parse_candidates, validate_color};

/// Default factor for [`lighten`] call sites that do not pass their own.
pub const DEFAULT_LIGHTEN_FACTOR: f64 = 0.2;

/// Default factor for [`darken`] call sites that do not pass their own (`bg_dark`).
pub const DEFAULT_DARKEN_FACTOR: f64 = 0.15;

/// Luminance at or above which a color counts as "light".
pub const LIGHT_LUMINANCE_THRESHOLD: f64 = 0.5;

/// Parse a 6-digit hex color (optional leading `#`) into channels.
pub fn hex_to_rgb(hex: &str) -> Result<(u8, u8, u8), ColorError> {
    let c = Color::from_hex(hex)?;
    Ok((c.r, c.g, c.b))
}

/// Format channels as lowercase `#rrggbb`, clamping each to `[0, 255]`.
pub fn rgb_to_hex(r: i32, g: i32, b: i32) -> String {
    Color::from_rgb_clamped(r, g, b).to_hex()
}

/// Canonical form of a hex color: lowercase with a leading `#`.
pub fn normalize_hex(hex: &str) -> Result<String, ColorError> {
    Color::from_hex(hex.trim()).map(|c| c.to_hex())
}

fn linearize(channel: u8) -> f64 {
    let c = f64::from(channel) / 255.0;
    if c <= 0.03928 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// WCAG relative luminance in `[0, 1]`.
pub fn relative_luminance(color: Color) -> f64 {
    0.2126 * linearize(color.r) + 0.7152 * linearize(color.g) + 0.0722 * linearize(color.b)
}

/// WCAG contrast ratio in `[1, 21]`. Symmetric in its arguments.
pub fn contrast_ratio(a: Color, b: Color) -> f64 {
    let la = relative_luminance(a);
    let lb = relative_luminance(b);
    let (lighter, darker) = if la >= lb { (la, lb) } else { (lb, la) };
    (lighter + 0.05) / (darker + 0.05)
}

/// [`relative_luminance`] on a hex string.
pub fn luminance_of_hex(hex: &str) -> Result<f64, ColorError> {
    Color::from_hex(hex).map(relative_luminance)
}

/// [`contrast_ratio`] on two hex strings.
pub fn contrast_ratio_hex(a: &str, b: &str) -> Result<f64, ColorError> {
    Ok(contrast_ratio(Color::from_hex(a)?, Color::from_hex(b)?))
}

pub fn is_light(color: Color) -> bool {
    relative_luminance(color) >= LIGHT_LUMINANCE_THRESHOLD
}

fn shift(color: Color, factor: f64, direction: i32) -> Color {
    let step = (factor * 255.0).round() as i32 * direction;
    Color::from_rgb_clamped(
        i32::from(color.r) + step,
        i32::from(color.g) + step,
        i32::from(color.b) + step,
    )
}

/// Move every channel toward 255 by `factor * 255`, clamped.
pub fn lighten(color: Color, factor: f64) -> Color {
    shift(color, factor, 1)
}

/// Move every channel toward 0 by `factor * 255`, clamped.
pub fn darken(color: Color, factor: f64) -> Color {
    shift(color, factor, -1)
}
