//! Legend layout: one swatch + label per category.

use egui::Color32;
use std::fmt::Write;

use crate::color::{opacity, rgb_hex};
use crate::heatmap::LegendOptions;
use crate::render::{escape, text_width};

const PAD: f32 = 4.0;

/// One legend row, positioned relative to the legend's top-left corner.
#[derive(Clone, Debug, PartialEq)]
pub struct LegendEntry {
    pub label: String,
    pub color: Color32,
    /// Top-left corner of the swatch.
    pub x: f32,
    pub y: f32,
}

/// Computed legend geometry.
#[derive(Clone, Debug, PartialEq)]
pub struct LegendLayout {
    labels: Vec<(String, Color32)>,
    columns: usize,
    rows: usize,
    entry_width: f32,
    entry_height: f32,
    swatch: f32,
    title: Option<String>,
    title_height: f32,
    font_size: f32,
    frame: bool,
}

impl LegendLayout {
    /// Lay out `categories` (sorted) with their `colors` (same order).
    pub fn compute(categories: &[String], colors: &[Color32], opts: &LegendOptions) -> Self {
        let n = categories.len();
        let font_size = opts.font_size.max(1.0);
        let swatch = font_size * 1.2;
        let label_w = categories
            .iter()
            .map(|c| text_width(c, font_size))
            .fold(0.0f32, f32::max);
        let columns = opts.columns_for(n);
        let rows = n.div_ceil(columns).max(1);
        let title_height = if opts.title.is_some() {
            font_size * 1.8
        } else {
            0.0
        };
        let mut layout = Self {
            labels: categories
                .iter()
                .cloned()
                .zip(colors.iter().copied())
                .collect(),
            columns,
            rows,
            entry_width: swatch + font_size * 0.6 + label_w + PAD * 2.0,
            entry_height: font_size * 1.8,
            swatch,
            title: opts.title.clone(),
            title_height,
            font_size,
            frame: opts.frame,
        };
        if let Some(title) = &opts.title {
            let min_w = text_width(title, font_size) + PAD * 2.0;
            if layout.width() < min_w {
                layout.entry_width = (min_w - PAD * 2.0) / columns as f32;
            }
        }
        layout
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn width(&self) -> f32 {
        self.columns as f32 * self.entry_width + PAD * 2.0
    }

    pub fn height(&self) -> f32 {
        self.title_height + self.rows as f32 * self.entry_height + PAD * 2.0
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    /// Widen the columns so the legend spans `width`. Never shrinks.
    pub fn expand_to_width(&mut self, width: f32) {
        let per_col = (width - PAD * 2.0) / self.columns as f32;
        if per_col > self.entry_width {
            self.entry_width = per_col;
        }
    }

    /// Entries, filled column by column.
    pub fn entries(&self) -> Vec<LegendEntry> {
        self.labels
            .iter()
            .enumerate()
            .map(|(i, (label, color))| {
                let col = i / self.rows;
                let row = i % self.rows;
                LegendEntry {
                    label: label.clone(),
                    color: *color,
                    x: PAD + col as f32 * self.entry_width + PAD,
                    y: PAD
                        + self.title_height
                        + row as f32 * self.entry_height
                        + (self.entry_height - self.swatch) / 2.0,
                }
            })
            .collect()
    }

    /// Append the legend as an SVG group translated to `(x, y)`.
    pub fn write_svg(&self, out: &mut String, x: f32, y: f32, text_color: Color32) {
        let _ = writeln!(out, r#"<g class="legend" transform="translate({x:.2},{y:.2})">"#);
        if self.frame {
            let _ = writeln!(
                out,
                r##"<rect x="0.5" y="0.5" width="{:.2}" height="{:.2}" fill="none" stroke="#000000" stroke-width="1"/>"##,
                self.width() - 1.0,
                self.height() - 1.0
            );
        }
        if let Some(title) = &self.title {
            let _ = writeln!(
                out,
                r#"<text x="{:.2}" y="{:.2}" font-size="{:.1}" font-weight="bold" fill="{}">{}</text>"#,
                PAD * 2.0,
                PAD + self.title_height * 0.7,
                self.font_size,
                rgb_hex(text_color),
                escape(title)
            );
        }
        for entry in self.entries() {
            let _ = writeln!(
                out,
                r##"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="{}" fill-opacity="{:.3}" stroke="#000000" stroke-width="0.8"/>"##,
                entry.x,
                entry.y,
                self.swatch,
                self.swatch,
                rgb_hex(entry.color),
                opacity(entry.color)
            );
            let _ = writeln!(
                out,
                r#"<text x="{:.2}" y="{:.2}" font-size="{:.1}" fill="{}">{}</text>"#,
                entry.x + self.swatch + self.font_size * 0.6,
                entry.y + self.swatch / 2.0 + self.font_size * 0.35,
                self.font_size,
                rgb_hex(text_color),
                escape(&entry.label)
            );
        }
        out.push_str("</g>\n");
    }
}
