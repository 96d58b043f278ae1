//! The categorical heatmap itself: options, color resolution and the plot handle.

use egui::Color32;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{HeatmapError, Result};
use crate::grid::{CategoryGrid, IndexGrid};
use crate::legend::LegendLayout;
use crate::palette::Palette;
use crate::render::{self, FigureLayout};

/// Category label -> color. Iterates in sorted label order.
pub type CategoryColors = BTreeMap<String, Color32>;

// ─────────────────────────────────────────────────────────────────────────────
// Options
// ─────────────────────────────────────────────────────────────────────────────

/// Where the legend goes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LegendPosition {
    /// One column to the right of the cells.
    #[default]
    Right,
    /// One row of entries above the cells.
    Top,
    /// Not part of the figure; fetch it with [`Heatmap::legend_svg`].
    Detached,
}

/// Legend appearance.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LegendOptions {
    pub position: LegendPosition,
    /// Label font size in px.
    pub font_size: f32,
    /// Number of entry columns. `None` picks 1 for right/detached and one per category for top.
    pub columns: Option<usize>,
    pub title: Option<String>,
    /// Draw a border around the legend.
    pub frame: bool,
    /// Widen a top legend to span the cell area. Other positions ignore it.
    pub expand: bool,
}

impl Default for LegendOptions {
    fn default() -> Self {
        Self {
            position: LegendPosition::Right,
            font_size: 8.0,
            columns: None,
            title: None,
            frame: false,
            expand: true,
        }
    }
}

impl LegendOptions {
    pub fn at(position: LegendPosition) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    /// Effective column count for `n` entries.
    pub fn columns_for(&self, n: usize) -> usize {
        let cols = self.columns.unwrap_or(match self.position {
            LegendPosition::Top => n,
            LegendPosition::Right | LegendPosition::Detached => 1,
        });
        cols.clamp(1, n.max(1))
    }
}

/// Options for [`heatmap`].
///
/// | Field          | Purpose |
/// |----------------|---------|
/// | `colors`       | Colors fixed by the caller; may leave labels out |
/// | `palette`      | Fills in every label `colors` does not cover |
/// | `legend`       | `None` hides the legend |
/// | `style`        | Cell size, grid lines, ticks, annotations |
#[derive(Clone, Debug, PartialEq)]
pub struct HeatmapOptions {
    pub colors: CategoryColors,
    pub palette: Palette,
    pub legend: Option<LegendOptions>,
    pub style: Style,
}

impl Default for HeatmapOptions {
    fn default() -> Self {
        Self {
            colors: CategoryColors::new(),
            palette: Palette::default(),
            legend: Some(LegendOptions::default()),
            style: Style::default(),
        }
    }
}

impl HeatmapOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn palette(mut self, palette: impl Into<Palette>) -> Self {
        self.palette = palette.into();
        self
    }

    pub fn color(mut self, label: impl Into<String>, color: Color32) -> Self {
        self.colors.insert(label.into(), color);
        self
    }

    pub fn legend(mut self, legend: Option<LegendOptions>) -> Self {
        self.legend = legend;
        self
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }
}

/// Figure styling.
#[derive(Clone, Debug, PartialEq)]
pub struct Style {
    /// Edge length of one cell in px.
    pub cell_size: f32,
    /// Width of the lines drawn between cells; `0` draws none.
    pub line_width: f32,
    pub line_color: Color32,
    /// Write each cell's label inside the cell.
    pub annotate: bool,
    pub x_tick_labels: bool,
    pub y_tick_labels: bool,
    pub title: Option<String>,
    pub background: Color32,
    pub text_color: Color32,
    /// Font size for ticks, annotations and title, in px.
    pub font_size: f32,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            cell_size: 24.0,
            line_width: 0.0,
            line_color: Color32::WHITE,
            annotate: false,
            x_tick_labels: true,
            y_tick_labels: true,
            title: None,
            background: Color32::WHITE,
            text_color: Color32::BLACK,
            font_size: 10.0,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Color resolution
// ─────────────────────────────────────────────────────────────────────────────

/// Complete `user` so that every category has a color.
///
/// With an empty `user` map every category is colored from `palette` in
/// sorted order. Otherwise only the categories missing from `user` are drawn
/// from the palette, in their sorted order; entries of `user` for labels that
/// do not occur in the data are kept.
///
/// Returns the completed map and the colors in category order.
pub fn resolve_colors(
    categories: &[String],
    user: &CategoryColors,
    palette: &Palette,
) -> Result<(CategoryColors, Vec<Color32>)> {
    let mut map = user.clone();
    let missing: Vec<&String> = categories.iter().filter(|c| !user.contains_key(*c)).collect();
    if !missing.is_empty() {
        let generated = palette.generate(missing.len())?;
        log::debug!(
            "assigning {} of {} categories from palette {}",
            missing.len(),
            categories.len(),
            palette.describe()
        );
        for (label, color) in missing.into_iter().zip(generated) {
            map.insert(label.clone(), color);
        }
    }
    let ordered = categories
        .iter()
        .map(|c| {
            map.get(c)
                .copied()
                .ok_or_else(|| HeatmapError::UnknownLabel(c.clone()))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok((map, ordered))
}

// ─────────────────────────────────────────────────────────────────────────────
// Heatmap
// ─────────────────────────────────────────────────────────────────────────────

/// A categorical heatmap ready to be rendered, saved or shown.
#[derive(Clone, Debug)]
pub struct Heatmap {
    grid: CategoryGrid,
    categories: Vec<String>,
    colors: CategoryColors,
    category_colors: Vec<Color32>,
    indices: IndexGrid,
    options: HeatmapOptions,
}

/// Build a categorical heatmap of `grid`.
///
/// Discovers the distinct labels, assigns each a color, converts the labels
/// into an index grid and lays out the figure. The returned handle carries
/// the final label -> color map ([`Heatmap::colors`]).
pub fn heatmap(grid: &CategoryGrid, options: &HeatmapOptions) -> Result<Heatmap> {
    Heatmap::new(grid.clone(), options.clone())
}

impl Heatmap {
    pub fn new(grid: CategoryGrid, options: HeatmapOptions) -> Result<Self> {
        let categories = grid.unique_labels();
        if grid.is_categorical().iter().all(|c| !c) {
            log::warn!("all columns look numeric; drawing them as categories anyway");
        }
        let (colors, category_colors) =
            resolve_colors(&categories, &options.colors, &options.palette)?;
        let indices = grid.to_indices(&categories)?;
        log::debug!(
            "heatmap {}x{} with {} categories",
            grid.rows(),
            grid.cols(),
            categories.len()
        );
        Ok(Self {
            grid,
            categories,
            colors,
            category_colors,
            indices,
            options,
        })
    }

    pub fn grid(&self) -> &CategoryGrid {
        &self.grid
    }

    /// Distinct labels in sorted order.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Final label -> color map, including caller entries for absent labels.
    pub fn colors(&self) -> &CategoryColors {
        &self.colors
    }

    /// Colors in [`Self::categories`] order: the discrete colormap used for drawing.
    pub fn category_colors(&self) -> &[Color32] {
        &self.category_colors
    }

    pub fn indices(&self) -> &IndexGrid {
        &self.indices
    }

    pub fn options(&self) -> &HeatmapOptions {
        &self.options
    }

    pub fn color_at(&self, row: usize, col: usize) -> Option<Color32> {
        self.indices
            .get(row, col)
            .and_then(|i| self.category_colors.get(i).copied())
    }

    pub fn label_at(&self, row: usize, col: usize) -> Option<&str> {
        self.indices
            .get(row, col)
            .and_then(|i| self.categories.get(i))
            .map(String::as_str)
    }

    /// Legend entries as laid out for this heatmap.
    pub fn legend_layout(&self) -> Option<LegendLayout> {
        self.options
            .legend
            .as_ref()
            .map(|opts| LegendLayout::compute(&self.categories, &self.category_colors, opts))
    }

    /// Geometry of the full figure.
    pub fn layout(&self) -> FigureLayout {
        FigureLayout::compute(self)
    }

    /// The full figure as an SVG document.
    pub fn to_svg(&self) -> String {
        render::figure_svg(self)
    }

    /// The legend alone as an SVG document, `None` when the legend is disabled.
    pub fn legend_svg(&self) -> Option<String> {
        let layout = self.legend_layout()?;
        Some(render::legend_svg(&layout, &self.options.style))
    }

    /// Rasterise the figure at 1 px per unit.
    pub fn render(&self) -> Result<image::RgbaImage> {
        self.render_scaled(1.0)
    }

    pub fn render_scaled(&self, scale: f32) -> Result<image::RgbaImage> {
        render::rasterize(&self.to_svg(), scale)
    }

    /// Write the figure; `.svg` writes vector output, other extensions go through `image`.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        render::save(&self.to_svg(), path.as_ref())
    }
}
