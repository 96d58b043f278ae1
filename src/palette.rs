//! Palettes: turning "a palette" into exactly `n` colors.
//!
//! A palette is either a named palette, a continuous [`Colormap`] that is
//! sampled at evenly spaced points, or an explicit color list. Colormaps
//! looked up by name skip the two endpoints; a [`Colormap`] passed in
//! directly includes them.

use egui::Color32;
use once_cell::sync::Lazy;
use std::collections::BTreeMap;

use crate::color::{from_unit_rgb, hls_to_rgb, parse_color};
use crate::error::{HeatmapError, Result};

/// Palette used when none is given.
pub const DEFAULT_PALETTE: &str = "hls";

/// Source of colors for categories without a user-assigned color.
#[derive(Clone, Debug, PartialEq)]
pub enum Palette {
    /// A qualitative palette (`hls`, `deep`, `tab10`, ...) or a colormap name
    /// (`viridis`, ...). Named colormaps are sampled strictly inside `(0, 1)`.
    Named(String),
    /// A continuous colormap, sampled evenly over `[0, 1]` including both ends.
    Colormap(Colormap),
    /// An explicit list; must hold at least as many colors as requested.
    Colors(Vec<Color32>),
}

impl Default for Palette {
    fn default() -> Self {
        Palette::Named(DEFAULT_PALETTE.to_string())
    }
}

impl From<&str> for Palette {
    fn from(name: &str) -> Self {
        Palette::Named(name.to_string())
    }
}

impl From<Colormap> for Palette {
    fn from(cmap: Colormap) -> Self {
        Palette::Colormap(cmap)
    }
}

impl From<Vec<Color32>> for Palette {
    fn from(colors: Vec<Color32>) -> Self {
        Palette::Colors(colors)
    }
}

impl Palette {
    /// Generate exactly `n` colors.
    pub fn generate(&self, n: usize) -> Result<Vec<Color32>> {
        if n == 0 {
            return Ok(Vec::new());
        }
        match self {
            Palette::Named(name) => named_colors(name, n),
            Palette::Colormap(cmap) => Ok(cmap.sample_n(n)),
            Palette::Colors(colors) => {
                if colors.len() < n {
                    return Err(HeatmapError::NotEnoughColors {
                        needed: n,
                        provided: colors.len(),
                    });
                }
                Ok(colors[..n].to_vec())
            }
        }
    }

    /// Short description for logs and the CLI.
    pub fn describe(&self) -> String {
        match self {
            Palette::Named(name) => name.clone(),
            Palette::Colormap(cmap) => format!("colormap ({} stops)", cmap.stops().len()),
            Palette::Colors(colors) => format!("{} colors", colors.len()),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Qualitative palettes
// ─────────────────────────────────────────────────────────────────────────────

static QUALITATIVE: Lazy<BTreeMap<&'static str, Vec<Color32>>> = Lazy::new(|| {
    let table: &[(&str, &[&str])] = &[
        (
            "deep",
            &[
                "#4C72B0", "#DD8452", "#55A868", "#C44E52", "#8172B3", "#937860", "#DA8BC3",
                "#8C8C8C", "#CCB974", "#64B5CD",
            ],
        ),
        (
            "muted",
            &[
                "#4878D0", "#EE854A", "#6ACC64", "#D65F5F", "#956CB4", "#8C613C", "#DC7EC0",
                "#797979", "#D5BB67", "#82C6E2",
            ],
        ),
        (
            "pastel",
            &[
                "#A1C9F4", "#FFB482", "#8DE5A1", "#FF9F9B", "#D0BBFF", "#DEBB9B", "#FAB0E4",
                "#CFCFCF", "#FFFEA3", "#B9F2F0",
            ],
        ),
        (
            "bright",
            &[
                "#023EFF", "#FF7C00", "#1AC938", "#E8000B", "#8B2BE2", "#9F4800", "#F14CC1",
                "#A3A3A3", "#FFC400", "#00D7FF",
            ],
        ),
        (
            "dark",
            &[
                "#001C7F", "#B1400D", "#12711C", "#8C0800", "#591E71", "#592F0D", "#A23582",
                "#3C3C3C", "#B8850A", "#006374",
            ],
        ),
        (
            "colorblind",
            &[
                "#0173B2", "#DE8F05", "#029E73", "#D55E00", "#CC78BC", "#CA9161", "#FBAFE4",
                "#949494", "#ECE133", "#56B4E9",
            ],
        ),
        (
            "tab10",
            &[
                "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2",
                "#7f7f7f", "#bcbd22", "#17becf",
            ],
        ),
        (
            "set1",
            &[
                "#e41a1c", "#377eb8", "#4daf4a", "#984ea3", "#ff7f00", "#ffff33", "#a65628",
                "#f781bf", "#999999",
            ],
        ),
        (
            "set2",
            &[
                "#66c2a5", "#fc8d62", "#8da0cb", "#e78ac3", "#a6d854", "#ffd92f", "#e5c494",
                "#b3b3b3",
            ],
        ),
        (
            "set3",
            &[
                "#8dd3c7", "#ffffb3", "#bebada", "#fb8072", "#80b1d3", "#fdb462", "#b3de69",
                "#fccde5", "#d9d9d9", "#bc80bd", "#ccebc5", "#ffed6f",
            ],
        ),
        (
            "paired",
            &[
                "#a6cee3", "#1f78b4", "#b2df8a", "#33a02c", "#fb9a99", "#e31a1c", "#fdbf6f",
                "#ff7f00", "#cab2d6", "#6a3d9a", "#ffff99", "#b15928",
            ],
        ),
        (
            "accent",
            &[
                "#7fc97f", "#beaed4", "#fdc086", "#ffff99", "#386cb0", "#f0027f", "#bf5b17",
                "#666666",
            ],
        ),
    ];
    table
        .iter()
        .map(|(name, hexes)| (*name, hexes.iter().filter_map(|h| parse_color(h).ok()).collect()))
        .collect()
});

/// `n` evenly spaced hues in HLS space (lightness 0.6, saturation 0.65),
/// starting at hue 0.01.
pub fn hls_palette(n: usize) -> Vec<Color32> {
    hls_palette_with(n, 0.01, 0.6, 0.65)
}

pub fn hls_palette_with(n: usize, h: f64, l: f64, s: f64) -> Vec<Color32> {
    (0..n)
        .map(|i| {
            let hue = (i as f64 / n as f64 + h).rem_euclid(1.0);
            let (r, g, b) = hls_to_rgb(hue, l, s);
            from_unit_rgb(r, g, b)
        })
        .collect()
}

fn named_colors(name: &str, n: usize) -> Result<Vec<Color32>> {
    let key = name.trim().to_ascii_lowercase();
    if key == "hls" {
        return Ok(hls_palette(n));
    }
    if let Some(base) = QUALITATIVE.get(key.as_str()) {
        return Ok(base.iter().copied().cycle().take(n).collect());
    }
    if let Some(cmap) = COLORMAPS.get(key.as_str()) {
        return Ok(cmap.sample_interior(n));
    }
    Err(HeatmapError::UnknownPalette {
        name: name.to_string(),
        supported: supported_palettes().join(", "),
    })
}

/// Every name accepted by [`Palette::Named`].
pub fn supported_palettes() -> Vec<&'static str> {
    std::iter::once("hls")
        .chain(QUALITATIVE.keys().copied())
        .chain(COLORMAPS.keys().copied())
        .collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// Continuous colormaps
// ─────────────────────────────────────────────────────────────────────────────

/// Piecewise-linear colormap over `[0, 1]`.
#[derive(Clone, Debug, PartialEq)]
pub struct Colormap {
    stops: Vec<(f32, Color32)>,
}

impl Colormap {
    /// Evenly spaced stops from a color list.
    pub fn from_list(colors: &[Color32]) -> Result<Self> {
        match colors.len() {
            0 => Err(HeatmapError::EmptyColormap),
            1 => Ok(Self {
                stops: vec![(0.0, colors[0]), (1.0, colors[0])],
            }),
            n => Ok(Self {
                stops: colors
                    .iter()
                    .enumerate()
                    .map(|(i, c)| (i as f32 / (n - 1) as f32, *c))
                    .collect(),
            }),
        }
    }

    /// Explicit `(position, color)` stops; positions are clamped to `[0, 1]` and sorted.
    pub fn from_stops(stops: &[(f32, Color32)]) -> Result<Self> {
        if stops.is_empty() {
            return Err(HeatmapError::EmptyColormap);
        }
        let mut stops: Vec<_> = stops.iter().map(|(t, c)| (t.clamp(0.0, 1.0), *c)).collect();
        stops.sort_by(|a, b| a.0.total_cmp(&b.0));
        Ok(Self { stops })
    }

    pub fn stops(&self) -> &[(f32, Color32)] {
        &self.stops
    }

    /// Color at `t` (clamped to `[0, 1]`), interpolated in sRGB.
    pub fn sample(&self, t: f32) -> Color32 {
        let t = t.clamp(0.0, 1.0);
        let first = self.stops[0];
        if t <= first.0 {
            return first.1;
        }
        for pair in self.stops.windows(2) {
            let (t0, c0) = pair[0];
            let (t1, c1) = pair[1];
            if t <= t1 {
                let f = if t1 > t0 { (t - t0) / (t1 - t0) } else { 0.0 };
                return lerp_color(c0, c1, f);
            }
        }
        self.stops[self.stops.len() - 1].1
    }

    /// `n` samples at evenly spaced positions; a single sample is taken at `0`.
    pub fn sample_n(&self, n: usize) -> Vec<Color32> {
        match n {
            0 => Vec::new(),
            1 => vec![self.sample(0.0)],
            _ => (0..n)
                .map(|i| self.sample(i as f32 / (n - 1) as f32))
                .collect(),
        }
    }

    /// `n` samples at `i / (n + 1)` for `i` in `1..=n`, leaving out both ends.
    /// A single sample lands on the middle of the map.
    pub fn sample_interior(&self, n: usize) -> Vec<Color32> {
        (1..=n)
            .map(|i| self.sample(i as f32 / (n + 1) as f32))
            .collect()
    }

    /// Look up a built-in colormap by name.
    pub fn builtin(name: &str) -> Option<Colormap> {
        COLORMAPS.get(name.trim().to_ascii_lowercase().as_str()).cloned()
    }
}

fn lerp_color(a: Color32, b: Color32, f: f32) -> Color32 {
    let [ar, ag, ab, aa] = a.to_srgba_unmultiplied();
    let [br, bg, bb, ba] = b.to_srgba_unmultiplied();
    let mix = |x: u8, y: u8| (x as f32 + (y as f32 - x as f32) * f).round() as u8;
    Color32::from_rgba_unmultiplied(mix(ar, br), mix(ag, bg), mix(ab, bb), mix(aa, ba))
}

static COLORMAPS: Lazy<BTreeMap<&'static str, Colormap>> = Lazy::new(|| {
    let table: &[(&str, &[&str])] = &[
        (
            "viridis",
            &[
                "#440154", "#472d7b", "#3b528b", "#2c728e", "#21918c", "#28ae80", "#5ec962",
                "#addc30", "#fde725",
            ],
        ),
        (
            "magma",
            &[
                "#000004", "#1c1044", "#4f127b", "#812581", "#b5367a", "#e55964", "#fb8761",
                "#fec287", "#fcfdbf",
            ],
        ),
        (
            "plasma",
            &[
                "#0d0887", "#4c02a1", "#7e03a8", "#a92395", "#cc4778", "#e56b5d", "#f89441",
                "#fdc328", "#f0f921",
            ],
        ),
        (
            "inferno",
            &[
                "#000004", "#1f0c48", "#550f6d", "#88226a", "#ba3655", "#e35933", "#f98e09",
                "#f9cb35", "#fcffa4",
            ],
        ),
        (
            "cividis",
            &[
                "#00224e", "#123570", "#3b496c", "#575d6d", "#707173", "#8a8678", "#a59c74",
                "#c3b369", "#e1cc55", "#fee838",
            ],
        ),
        ("greys", &["#ffffff", "#000000"]),
        (
            "blues",
            &[
                "#f7fbff", "#deebf7", "#c6dbef", "#9ecae1", "#6baed6", "#4292c6", "#2171b5",
                "#08519c", "#08306b",
            ],
        ),
        (
            "greens",
            &[
                "#f7fcf5", "#e5f5e0", "#c7e9c0", "#a1d99b", "#74c476", "#41ab5d", "#238b45",
                "#006d2c", "#00441b",
            ],
        ),
        (
            "reds",
            &[
                "#fff5f0", "#fee0d2", "#fcbba1", "#fc9272", "#fb6a4a", "#ef3b2c", "#cb181d",
                "#a50f15", "#67000d",
            ],
        ),
        (
            "coolwarm",
            &[
                "#3b4cc0", "#6f92f3", "#aac7fd", "#dddddd", "#f7b89c", "#e7745b", "#b40426",
            ],
        ),
    ];
    let mut maps: BTreeMap<&'static str, Colormap> = table
        .iter()
        .filter_map(|(name, hexes)| {
            let colors: Vec<Color32> = hexes.iter().filter_map(|h| parse_color(h).ok()).collect();
            Colormap::from_list(&colors).ok().map(|c| (*name, c))
        })
        .collect();

    // rainbow: r = |2x - 0.5|, g = sin(pi x), b = cos(pi x / 2)
    let rainbow: Vec<Color32> = (0..=16)
        .map(|i| {
            let x = i as f64 / 16.0;
            from_unit_rgb(
                (2.0 * x - 0.5).abs(),
                (std::f64::consts::PI * x).sin(),
                (std::f64::consts::FRAC_PI_2 * x).cos(),
            )
        })
        .collect();
    if let Ok(cmap) = Colormap::from_list(&rainbow) {
        maps.insert("rainbow", cmap);
    }

    let jet = [
        (0.0, Color32::from_rgb(0, 0, 127)),
        (0.125, Color32::from_rgb(0, 0, 255)),
        (0.375, Color32::from_rgb(0, 255, 255)),
        (0.625, Color32::from_rgb(255, 255, 0)),
        (0.875, Color32::from_rgb(255, 0, 0)),
        (1.0, Color32::from_rgb(127, 0, 0)),
    ];
    if let Ok(cmap) = Colormap::from_stops(&jet) {
        maps.insert("jet", cmap);
    }
    maps
});
