//turnover/src/color_utils.rs

// Color helpers for property accents in terminal output.
// Properties may carry a "#RRGGBB" color from the config; when they don't, a
// deterministic color is derived from the property id so it stays the same
// across runs.

use crate::model::UrgencyLevel;
use std::hash::{Hash, Hasher};

/// Generates a deterministic color tuple (r, g, b) in [0.0, 1.0] range based on the input string.
pub fn generate_color(key: &str) -> (f32, f32, f32) {
    let mut hasher = std::collections::hash_map::DefaultHasher::new();
    key.hash(&mut hasher);
    let hash = hasher.finish();

    // Hue: 0-360 degrees
    let h = (hash % 360) as f32;

    let hash_s = hash >> 16;
    let hash_l = hash >> 32;

    // Saturation: 45% - 85%
    let s = 0.45 + ((hash_s % 41) as f32 / 100.0);

    // Lightness: 45% - 65%, readable on both dark and light terminals
    let l = 0.45 + ((hash_l % 21) as f32 / 100.0);

    hsl_to_rgb(h, s, l)
}

fn hsl_to_rgb(h: f32, s: f32, l: f32) -> (f32, f32, f32) {
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = l - c / 2.0;

    let (r1, g1, b1) = if (0.0..60.0).contains(&h) {
        (c, x, 0.0)
    } else if (60.0..120.0).contains(&h) {
        (x, c, 0.0)
    } else if (120.0..180.0).contains(&h) {
        (0.0, c, x)
    } else if (180.0..240.0).contains(&h) {
        (0.0, x, c)
    } else if (240.0..300.0).contains(&h) {
        (x, 0.0, c)
    } else {
        (c, 0.0, x)
    };

    (r1 + m, g1 + m, b1 + m)
}

/// Determines if text on top of this color should be black or white.
pub fn is_dark(r: u8, g: u8, b: u8) -> bool {
    let brightness = 0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32;
    brightness < 128.0
}

/// Parse a hex color string like "#RRGGBB" or "RRGGBB" into u8 tuple.
pub fn parse_hex_to_u8(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.trim_start_matches('#');
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(hex.get(0..2)?, 16).ok()?;
    let g = u8::from_str_radix(hex.get(2..4)?, 16).ok()?;
    let b = u8::from_str_radix(hex.get(4..6)?, 16).ok()?;
    Some((r, g, b))
}

pub fn floats_to_hex(r: f32, g: f32, b: f32) -> String {
    let to_u8 = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    format!("#{:02x}{:02x}{:02x}", to_u8(r), to_u8(g), to_u8(b))
}

pub fn urgency_rgb(level: UrgencyLevel) -> (u8, u8, u8) {
    match level {
        UrgencyLevel::Urgent => (239, 68, 68),
        UrgencyLevel::Warning => (245, 158, 11),
        UrgencyLevel::Normal => (34, 197, 94),
    }
}

/// Wraps `text` in a 24-bit ANSI foreground color.
pub fn ansi_fg((r, g, b): (u8, u8, u8), text: &str) -> String {
    format!("\x1b[38;2;{};{};{}m{}\x1b[0m", r, g, b, text)
}

/// Wraps `text` in a 24-bit ANSI background color with a contrasting foreground.
pub fn ansi_bg((r, g, b): (u8, u8, u8), text: &str) -> String {
    let fg = if is_dark(r, g, b) { 97 } else { 30 };
    format!("\x1b[48;2;{};{};{}m\x1b[{}m{}\x1b[0m", r, g, b, fg, text)
}
