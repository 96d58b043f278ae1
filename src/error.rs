//! Crate-wide error type.

use std::path::PathBuf;

/// Errors produced while building, rendering or saving a categorical heatmap.
#[derive(thiserror::Error, Debug)]
pub enum HeatmapError {
    #[error("dataset is empty")]
    EmptyData,

    #[error("row {row} has {found} values, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("{axis} labels: got {found}, expected {expected}")]
    LabelCount {
        axis: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("label {0:?} has no assigned color")]
    UnknownLabel(String),

    #[error("must provide at least as many colors as there are categories: needed {needed}, got {provided}")]
    NotEnoughColors { needed: usize, provided: usize },

    #[error("unknown palette '{name}'. Supported: {supported}")]
    UnknownPalette { name: String, supported: String },

    #[error("invalid color '{0}'")]
    InvalidColor(String),

    #[error("colormap needs at least one stop")]
    EmptyColormap,

    #[error("unsupported output format for {0:?}")]
    UnsupportedFormat(PathBuf),

    #[error("render error: {0}")]
    Render(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

impl HeatmapError {
    pub fn render<T: ToString>(msg: T) -> Self {
        HeatmapError::Render(msg.to_string())
    }

    pub fn config<T: ToString>(msg: T) -> Self {
        HeatmapError::Config(msg.to_string())
    }
}

impl From<usvg::Error> for HeatmapError {
    fn from(e: usvg::Error) -> Self {
        HeatmapError::Render(e.to_string())
    }
}

impl From<serde_yaml::Error> for HeatmapError {
    fn from(e: serde_yaml::Error) -> Self {
        HeatmapError::Config(e.to_string())
    }
}

impl From<serde_json::Error> for HeatmapError {
    fn from(e: serde_json::Error) -> Self {
        HeatmapError::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, HeatmapError>;
