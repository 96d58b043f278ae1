//! Serializable heatmap style, loaded from / saved to YAML or JSON.
//!
//! [`HeatmapOptions`] holds `egui` colors and a [`Palette`] that can carry a
//! colormap; this module provides a plain-string mirror that derives serde
//! and converts into options on demand.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::color::{parse_color, to_hex};
use crate::error::{HeatmapError, Result};
use crate::heatmap::{CategoryColors, HeatmapOptions, LegendOptions, Style};
use crate::palette::{Colormap, Palette, DEFAULT_PALETTE};

/// Palette as written in a config file: a name, a list of color strings, or
/// colormap stops.
///
/// ```yaml
/// palette:
///   colormap:
///     - [0.0, "#000080"]
///     - [0.3, white]
///     - [1.0, "#800000"]
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PaletteSerde {
    Name(String),
    Colors(Vec<String>),
    /// `(position, color)` stops of an interpolated colormap.
    Colormap { colormap: Vec<(f32, String)> },
}

impl Default for PaletteSerde {
    fn default() -> Self {
        PaletteSerde::Name(DEFAULT_PALETTE.to_string())
    }
}

impl PaletteSerde {
    pub fn into_palette(self) -> Result<Palette> {
        Ok(match self {
            PaletteSerde::Name(name) => Palette::Named(name),
            PaletteSerde::Colors(colors) => Palette::Colors(
                colors
                    .iter()
                    .map(|c| parse_color(c))
                    .collect::<Result<Vec<_>>>()?,
            ),
            PaletteSerde::Colormap { colormap } => {
                let stops = colormap
                    .iter()
                    .map(|(t, c)| Ok((*t, parse_color(c)?)))
                    .collect::<Result<Vec<_>>>()?;
                Palette::Colormap(Colormap::from_stops(&stops)?)
            }
        })
    }
}

/// Serializable version of [`Style`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleSerde {
    pub cell_size: f32,
    pub line_width: f32,
    pub line_color: String,
    pub annotate: bool,
    pub x_tick_labels: bool,
    pub y_tick_labels: bool,
    pub title: Option<String>,
    pub background: String,
    pub text_color: String,
    pub font_size: f32,
}

impl Default for StyleSerde {
    fn default() -> Self {
        Self::from(&Style::default())
    }
}

impl From<&Style> for StyleSerde {
    fn from(s: &Style) -> Self {
        Self {
            cell_size: s.cell_size,
            line_width: s.line_width,
            line_color: to_hex(s.line_color),
            annotate: s.annotate,
            x_tick_labels: s.x_tick_labels,
            y_tick_labels: s.y_tick_labels,
            title: s.title.clone(),
            background: to_hex(s.background),
            text_color: to_hex(s.text_color),
            font_size: s.font_size,
        }
    }
}

impl StyleSerde {
    pub fn into_style(self) -> Result<Style> {
        Ok(Style {
            cell_size: self.cell_size,
            line_width: self.line_width,
            line_color: parse_color(&self.line_color)?,
            annotate: self.annotate,
            x_tick_labels: self.x_tick_labels,
            y_tick_labels: self.y_tick_labels,
            title: self.title,
            background: parse_color(&self.background)?,
            text_color: parse_color(&self.text_color)?,
            font_size: self.font_size,
        })
    }
}

/// Complete heatmap style as stored on disk.
///
/// ```yaml
/// palette: tab10
/// colors:
///   ambiguous: "#cccccc"
/// legend:
///   position: top
///   font_size: 9
/// style:
///   cell_size: 16
///   annotate: true
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeatmapConfig {
    pub palette: PaletteSerde,
    /// Label -> color string.
    pub colors: BTreeMap<String, String>,
    /// `None` disables the legend.
    pub legend: Option<LegendOptions>,
    pub style: StyleSerde,
}

impl Default for HeatmapConfig {
    fn default() -> Self {
        Self {
            palette: PaletteSerde::default(),
            colors: BTreeMap::new(),
            legend: Some(LegendOptions::default()),
            style: StyleSerde::default(),
        }
    }
}

impl HeatmapConfig {
    /// Resolve color strings and build [`HeatmapOptions`].
    pub fn into_options(self) -> Result<HeatmapOptions> {
        let colors: CategoryColors = self
            .colors
            .iter()
            .map(|(label, c)| Ok((label.clone(), parse_color(c)?)))
            .collect::<Result<_>>()?;
        Ok(HeatmapOptions {
            colors,
            palette: self.palette.into_palette()?,
            legend: self.legend,
            style: self.style.into_style()?,
        })
    }

    /// Capture `options` for saving. A colormap palette keeps its stop positions.
    pub fn from_options(options: &HeatmapOptions) -> Self {
        let palette = match &options.palette {
            Palette::Named(name) => PaletteSerde::Name(name.clone()),
            Palette::Colors(colors) => {
                PaletteSerde::Colors(colors.iter().map(|c| to_hex(*c)).collect())
            }
            Palette::Colormap(cmap) => PaletteSerde::Colormap {
                colormap: cmap.stops().iter().map(|(t, c)| (*t, to_hex(*c))).collect(),
            },
        };
        Self {
            palette,
            colors: options
                .colors
                .iter()
                .map(|(label, c)| (label.clone(), to_hex(*c)))
                .collect(),
            legend: options.legend.clone(),
            style: StyleSerde::from(&options.style),
        }
    }

    /// Parse YAML (JSON is valid YAML too).
    pub fn from_yaml_str(s: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(s)?)
    }

    pub fn to_yaml_string(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load from a file; `.json` is parsed as JSON, everything else as YAML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let s = fs::read_to_string(path)
            .map_err(|e| HeatmapError::config(format!("failed to read {:?}: {}", path, e)))?;
        let cfg: Self = if is_json(path) {
            serde_json::from_str(&s)?
        } else {
            serde_yaml::from_str(&s)?
        };
        log::debug!("loaded heatmap config from {:?}", path);
        Ok(cfg)
    }

    /// Save to a file; `.json` writes JSON, everything else YAML.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)
                .map_err(|e| HeatmapError::config(format!("failed to create dir {:?}: {}", dir, e)))?;
        }
        let s = if is_json(path) {
            self.to_json_string()?
        } else {
            self.to_yaml_string()?
        };
        fs::write(path, s)
            .map_err(|e| HeatmapError::config(format!("failed to write {:?}: {}", path, e)))?;
        Ok(())
    }

    /// `~/.catheat/style.yaml`.
    pub fn default_path() -> Result<PathBuf> {
        let home = std::env::var("HOME")
            .map_err(|e| HeatmapError::config(format!("HOME env var not set: {}", e)))?;
        Ok(PathBuf::from(home).join(".catheat").join("style.yaml"))
    }

    /// Load `~/.catheat/style.yaml` if present.
    pub fn load_from_default_path() -> Result<Option<Self>> {
        let path = Self::default_path()?;
        if !path.exists() {
            return Ok(None);
        }
        Self::load(&path).map(Some)
    }

    pub fn save_to_default_path(&self) -> Result<()> {
        self.save(Self::default_path()?)
    }
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"))
}
