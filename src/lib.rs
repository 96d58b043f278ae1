//! catheat crate root: re-exports and module wiring.
//!
//! Categorical heatmaps: a grid of discrete labels drawn as colored cells
//! with a legend mapping each label to its color.
//!
//! - `grid`: label grids, category discovery and the index grid
//! - `palette`: named palettes, colormaps and explicit color lists
//! - `heatmap`: options, color resolution and the [`Heatmap`] handle
//! - `legend` / `render`: layout, SVG scene and raster output
//! - `config`: YAML/JSON style files
//! - `viewer`: interactive egui window (feature `viewer`)
//!
//! ```no_run
//! use catheat::{heatmap, CategoryGrid, HeatmapOptions};
//!
//! let grid = CategoryGrid::from_rows(vec![
//!     vec!["a", "b", "a"],
//!     vec!["c", "a", "b"],
//! ])?;
//! let hm = heatmap(&grid, &HeatmapOptions::new().palette("tab10"))?;
//! hm.save("out.png")?;
//! # Ok::<(), catheat::HeatmapError>(())
//! ```

pub mod color;
pub mod config;
pub mod error;
pub mod grid;
pub mod heatmap;
pub mod legend;
pub mod palette;
pub mod render;
#[cfg(feature = "viewer")]
pub mod viewer;

// Public re-exports for a compact external API
pub use color::{parse_color, to_hex};
pub use config::HeatmapConfig;
pub use egui::Color32;
pub use error::{HeatmapError, Result};
pub use grid::{CategoryGrid, IndexGrid};
pub use heatmap::{
    heatmap, resolve_colors, CategoryColors, Heatmap, HeatmapOptions, LegendOptions,
    LegendPosition, Style,
};
pub use legend::{LegendEntry, LegendLayout};
pub use palette::{Colormap, Palette};
pub use render::FigureLayout;
#[cfg(feature = "viewer")]
pub use viewer::{show, ViewerOptions};
