//! Palette derivation and contrast repair.
//!
//! Turns an unordered bag of candidate colors into a full [`PaletteColors`].
//! Every step that could break the contrast floor has a literal fallback, so
//! the output meets [`MIN_TEXT_CONTRAST`] and [`MIN_UI_CONTRAST`] for any input.

use prism_common::Color;
use tracing::debug;

use super::roles::PaletteColors;
use crate::colors::{
    contrast_ratio, darken, is_light, lighten, parse_candidates, relative_luminance,
    DEFAULT_DARKEN_FACTOR, LIGHT_LUMINANCE_THRESHOLD,
};

/// Fewer unique candidates than this and the fallback list is used instead.
pub const MIN_CANDIDATES: usize = 8;

/// Used verbatim when extraction yields fewer than [`MIN_CANDIDATES`] colors.
pub const FALLBACK_CANDIDATES: [&str; 8] = [
    "#1e1e2e", "#313244", "#45475a", "#89b4fa", "#cba6f7", "#f38ba8", "#a6e3a1", "#cdd6f4",
];

/// Replaces a background whose luminance exceeds the light threshold.
pub const FALLBACK_BACKGROUND: &str = "#1e1e2e";

/// Text replacement on dark backgrounds.
pub const TEXT_ON_DARK: &str = "#e0e0e0";
/// Text replacement on light backgrounds.
pub const TEXT_ON_LIGHT: &str = "#1a1a1a";

pub const MIN_TEXT_CONTRAST: f64 = 4.5;
pub const MIN_UI_CONTRAST: f64 = 3.0;

pub const DEFAULT_ERROR: &str = "#f38ba8";
pub const DEFAULT_SUCCESS: &str = "#a6e3a1";
pub const DEFAULT_WARNING: &str = "#f9e2af";
const BRIGHT_ERROR: &str = "#ff5555";
const BRIGHT_SUCCESS: &str = "#50fa7b";
const BRIGHT_WARNING: &str = "#f1fa8c";

/// `bg_light` on a dark background when the text is light.
pub const BG_LIGHT_ON_LIGHT_TEXT: &str = "#45475a";
/// `bg_light` on a dark background when the text is dark.
pub const BG_LIGHT_ON_DARK_TEXT: &str = "#9399b2";
const BG_LIGHT_DARKEN_FACTOR: f64 = 0.25;

/// Cursorline is meant to be barely visible against the background.
pub const CURSORLINE_DARKEN_FACTOR: f64 = 0.45;
pub const CURSORLINE_LIGHTEN_FACTOR: f64 = 0.02;
/// Primaries below this luminance are lightened, not darkened, for the cursorline.
const DARK_PRIMARY_LUMINANCE: f64 = 0.15;

const BUTTON_BG_FACTOR: f64 = 0.08;

const PRIMARY_INDEX: usize = 3;
const SECONDARY_INDEX: usize = 4;
const ACCENT_INDEX: usize = 5;

/// Literal constants are checked by the test suite; a typo here is a bug.
fn literal(hex: &str) -> Color {
    Color::from_hex(hex).unwrap_or(Color::BLACK)
}

/// Parse, dedupe (first seen wins), apply the short-list fallback, then sort
/// ascending by luminance with the hex string as tie-breaker.
pub fn prepare_candidates<S: AsRef<str>>(candidates: &[S]) -> Vec<Color> {
    let mut unique: Vec<Color> = Vec::new();
    for color in parse_candidates(candidates) {
        if !unique.contains(&color) {
            unique.push(color);
        }
    }

    if unique.len() < MIN_CANDIDATES {
        debug!(
            found = unique.len(),
            "too few candidate colors, using fallback palette"
        );
        unique = FALLBACK_CANDIDATES.iter().map(|h| literal(h)).collect();
    }

    unique.sort_by(|a, b| {
        relative_luminance(*a)
            .total_cmp(&relative_luminance(*b))
            .then_with(|| a.to_hex().cmp(&b.to_hex()))
    });
    unique
}

fn pick_background(darkest: Color) -> Color {
    if relative_luminance(darkest) > LIGHT_LUMINANCE_THRESHOLD {
        literal(FALLBACK_BACKGROUND)
    } else {
        darkest
    }
}

fn repair_text(background: Color, lightest: Color) -> Color {
    if contrast_ratio(background, lightest) >= MIN_TEXT_CONTRAST {
        return lightest;
    }
    let replacement = if relative_luminance(background) < LIGHT_LUMINANCE_THRESHOLD {
        literal(TEXT_ON_DARK)
    } else {
        literal(TEXT_ON_LIGHT)
    };
    if contrast_ratio(background, replacement) >= MIN_TEXT_CONTRAST {
        return replacement;
    }
    // Mid-luminance backgrounds defeat both grays; pure black or white always clears 4.5.
    if contrast_ratio(background, Color::WHITE) >= contrast_ratio(background, Color::BLACK) {
        Color::WHITE
    } else {
        Color::BLACK
    }
}

fn ui_role(background: Color, text: Color, candidate: Color) -> Color {
    if contrast_ratio(background, candidate) < MIN_UI_CONTRAST {
        text
    } else {
        candidate
    }
}

fn status_role(background: Color, default: &str, bright: &str) -> Color {
    let color = literal(default);
    if contrast_ratio(background, color) < MIN_UI_CONTRAST {
        literal(bright)
    } else {
        color
    }
}

/// Mid-gray on dark backgrounds, a darkened background otherwise.
pub fn bg_light_for(background: Color, text: Color) -> Color {
    if is_light(background) {
        darken(background, BG_LIGHT_DARKEN_FACTOR)
    } else if is_light(text) {
        literal(BG_LIGHT_ON_LIGHT_TEXT)
    } else {
        literal(BG_LIGHT_ON_DARK_TEXT)
    }
}

/// A near-invisible highlight for the current line.
pub fn cursorline_for(primary: Color, background: Color, text: Color) -> Color {
    if is_light(text) {
        if relative_luminance(primary) < DARK_PRIMARY_LUMINANCE {
            lighten(primary, CURSORLINE_LIGHTEN_FACTOR)
        } else {
            darken(primary, CURSORLINE_DARKEN_FACTOR)
        }
    } else {
        lighten(background, CURSORLINE_LIGHTEN_FACTOR)
    }
}

pub fn button_bg_for(background: Color, text: Color) -> Color {
    if is_light(text) {
        lighten(background, BUTTON_BG_FACTOR)
    } else {
        darken(background, BUTTON_BG_FACTOR)
    }
}

/// Run the full derivation on raw candidate strings.
pub fn derive_colors<S: AsRef<str>>(candidates: &[S]) -> PaletteColors {
    let sorted = prepare_candidates(candidates);
    let last = sorted.len() - 1;
    let at = |i: usize| sorted[i.min(last)];

    let background = pick_background(sorted[0]);
    let text = repair_text(background, sorted[last]);

    let primary = ui_role(background, text, at(PRIMARY_INDEX));
    let secondary = ui_role(background, text, at(SECONDARY_INDEX));
    let accent = ui_role(background, text, at(ACCENT_INDEX));

    let colors = PaletteColors {
        primary,
        secondary,
        accent,
        background,
        text,
        error: status_role(background, DEFAULT_ERROR, BRIGHT_ERROR),
        success: status_role(background, DEFAULT_SUCCESS, BRIGHT_SUCCESS),
        warning: status_role(background, DEFAULT_WARNING, BRIGHT_WARNING),
        bg_light: bg_light_for(background, text),
        bg_dark: darken(background, DEFAULT_DARKEN_FACTOR),
        cursorline: cursorline_for(primary, background, text),
        button_bg: button_bg_for(background, text),
    };
    debug!(
        background = %colors.background,
        text = %colors.text,
        primary = %colors.primary,
        "derived palette"
    );
    colors
}
