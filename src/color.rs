//! Color parsing and conversion helpers.
//!
//! Colors are [`egui::Color32`] everywhere so that the same values feed the
//! raster renderer and the interactive viewer.

use egui::Color32;
use once_cell::sync::Lazy;
use std::collections::HashMap;

use crate::error::{HeatmapError, Result};

static NAMED_COLORS: Lazy<HashMap<&'static str, Color32>> = Lazy::new(|| {
    let table: &[(&str, [u8; 3])] = &[
        // single-letter base colors
        ("b", [0, 0, 255]),
        ("g", [0, 128, 0]),
        ("r", [255, 0, 0]),
        ("c", [0, 191, 191]),
        ("m", [191, 0, 191]),
        ("y", [191, 191, 0]),
        ("k", [0, 0, 0]),
        ("w", [255, 255, 255]),
        // tableau
        ("tab:blue", [31, 119, 180]),
        ("tab:orange", [255, 127, 14]),
        ("tab:green", [44, 160, 44]),
        ("tab:red", [214, 39, 40]),
        ("tab:purple", [148, 103, 189]),
        ("tab:brown", [140, 86, 75]),
        ("tab:pink", [227, 119, 194]),
        ("tab:gray", [127, 127, 127]),
        ("tab:grey", [127, 127, 127]),
        ("tab:olive", [188, 189, 34]),
        ("tab:cyan", [23, 190, 207]),
        // css
        ("black", [0, 0, 0]),
        ("white", [255, 255, 255]),
        ("red", [255, 0, 0]),
        ("green", [0, 128, 0]),
        ("lime", [0, 255, 0]),
        ("blue", [0, 0, 255]),
        ("yellow", [255, 255, 0]),
        ("cyan", [0, 255, 255]),
        ("magenta", [255, 0, 255]),
        ("orange", [255, 165, 0]),
        ("purple", [128, 0, 128]),
        ("pink", [255, 192, 203]),
        ("brown", [165, 42, 42]),
        ("gray", [128, 128, 128]),
        ("grey", [128, 128, 128]),
        ("lightgray", [211, 211, 211]),
        ("lightgrey", [211, 211, 211]),
        ("darkgray", [169, 169, 169]),
        ("darkgrey", [169, 169, 169]),
        ("navy", [0, 0, 128]),
        ("teal", [0, 128, 128]),
        ("olive", [128, 128, 0]),
        ("maroon", [128, 0, 0]),
        ("silver", [192, 192, 192]),
        ("gold", [255, 215, 0]),
        ("salmon", [250, 128, 114]),
        ("coral", [255, 127, 80]),
        ("tomato", [255, 99, 71]),
        ("crimson", [220, 20, 60]),
        ("indigo", [75, 0, 130]),
        ("violet", [238, 130, 238]),
        ("turquoise", [64, 224, 208]),
        ("steelblue", [70, 130, 180]),
        ("skyblue", [135, 206, 235]),
        ("forestgreen", [34, 139, 34]),
        ("seagreen", [46, 139, 87]),
        ("khaki", [240, 230, 140]),
        ("beige", [245, 245, 220]),
        ("tan", [210, 180, 140]),
        ("chocolate", [210, 105, 30]),
    ];
    table
        .iter()
        .map(|(name, [r, g, b])| (*name, Color32::from_rgb(*r, *g, *b)))
        .collect()
});

/// Parse a color string.
///
/// Accepts `#rgb`, `#rrggbb`, `#rrggbbaa`, `rgb(r, g, b)` and named colors
/// (`red`, `steelblue`, `tab:blue`, `k`, ...). Names are case-insensitive.
pub fn parse_color(s: &str) -> Result<Color32> {
    let trimmed = s.trim();
    let lower = trimmed.to_ascii_lowercase();
    if let Some(hex) = lower.strip_prefix('#') {
        return parse_hex(hex).ok_or_else(|| HeatmapError::InvalidColor(s.to_string()));
    }
    if let Some(inner) = lower
        .strip_prefix("rgb(")
        .and_then(|rest| rest.strip_suffix(')'))
    {
        let parts: Vec<_> = inner.split(',').map(|p| p.trim().parse::<u8>()).collect();
        if let [Ok(r), Ok(g), Ok(b)] = parts.as_slice() {
            return Ok(Color32::from_rgb(*r, *g, *b));
        }
        return Err(HeatmapError::InvalidColor(s.to_string()));
    }
    NAMED_COLORS
        .get(lower.as_str())
        .copied()
        .ok_or_else(|| HeatmapError::InvalidColor(s.to_string()))
}

fn parse_hex(hex: &str) -> Option<Color32> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    match hex.len() {
        3 => {
            let nib = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);
            Some(Color32::from_rgb(nib(0)?, nib(1)?, nib(2)?))
        }
        6 => Some(Color32::from_rgb(byte(0)?, byte(2)?, byte(4)?)),
        8 => Some(Color32::from_rgba_unmultiplied(
            byte(0)?,
            byte(2)?,
            byte(4)?,
            byte(6)?,
        )),
        _ => None,
    }
}

/// Format as `#rrggbb`, or `#rrggbbaa` when not fully opaque.
pub fn to_hex(color: Color32) -> String {
    let [r, g, b, a] = color.to_srgba_unmultiplied();
    if a == 255 {
        format!("#{r:02x}{g:02x}{b:02x}")
    } else {
        format!("#{r:02x}{g:02x}{b:02x}{a:02x}")
    }
}

/// `#rrggbb`, ignoring alpha; pair with [`opacity`] for SVG attributes.
pub(crate) fn rgb_hex(color: Color32) -> String {
    let [r, g, b, _] = color.to_srgba_unmultiplied();
    format!("#{r:02x}{g:02x}{b:02x}")
}

/// Opacity in `[0, 1]` for SVG `fill-opacity`.
pub(crate) fn opacity(color: Color32) -> f32 {
    color.to_srgba_unmultiplied()[3] as f32 / 255.0
}

/// HLS -> RGB, all components in `[0, 1]`.
pub fn hls_to_rgb(h: f64, l: f64, s: f64) -> (f64, f64, f64) {
    if s == 0.0 {
        return (l, l, l);
    }
    let m2 = if l <= 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let m1 = 2.0 * l - m2;
    (
        hue_channel(m1, m2, h + 1.0 / 3.0),
        hue_channel(m1, m2, h),
        hue_channel(m1, m2, h - 1.0 / 3.0),
    )
}

fn hue_channel(m1: f64, m2: f64, hue: f64) -> f64 {
    let hue = hue.rem_euclid(1.0);
    if hue < 1.0 / 6.0 {
        m1 + (m2 - m1) * hue * 6.0
    } else if hue < 0.5 {
        m2
    } else if hue < 2.0 / 3.0 {
        m1 + (m2 - m1) * (2.0 / 3.0 - hue) * 6.0
    } else {
        m1
    }
}

/// Convert float RGB in `[0, 1]` to an opaque [`Color32`].
pub fn from_unit_rgb(r: f64, g: f64, b: f64) -> Color32 {
    let q = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    Color32::from_rgb(q(r), q(g), q(b))
}

/// Black or white, whichever reads better on `background`.
pub(crate) fn contrasting_text(background: Color32) -> Color32 {
    let luma = 0.299 * background.r() as f32
        + 0.587 * background.g() as f32
        + 0.114 * background.b() as f32;
    if luma > 140.0 {
        Color32::BLACK
    } else {
        Color32::WHITE
    }
}
