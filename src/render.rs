//! Figure layout, SVG scene construction and rasterisation.
//!
//! The figure is built as an SVG document and rasterised with usvg + resvg
//! into a tiny-skia pixmap, then handed to `image` for encoding.

use image::{ImageFormat, Rgba, RgbaImage};
use once_cell::sync::Lazy;
use std::fmt::Write;
use std::path::Path;
use std::sync::Arc;

use crate::color::{contrasting_text, opacity, rgb_hex};
use crate::error::{HeatmapError, Result};
use crate::heatmap::{Heatmap, LegendPosition, Style};
use crate::legend::LegendLayout;

const MARGIN: f32 = 8.0;
const TICK_GAP: f32 = 4.0;
const LEGEND_GAP: f32 = 8.0;

static FONTS: Lazy<Arc<usvg::fontdb::Database>> = Lazy::new(|| {
    let mut db = usvg::fontdb::Database::new();
    db.load_system_fonts();
    log::debug!("loaded {} font faces", db.len());
    Arc::new(db)
});

/// Rough advance width of `text` at `font_size` px.
pub(crate) fn text_width(text: &str, font_size: f32) -> f32 {
    text.chars().count() as f32 * font_size * 0.6
}

pub(crate) fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

// ─────────────────────────────────────────────────────────────────────────────
// Layout
// ─────────────────────────────────────────────────────────────────────────────

/// Geometry of a rendered figure, in px.
#[derive(Clone, Debug, PartialEq)]
pub struct FigureLayout {
    pub width: f32,
    pub height: f32,
    /// Top-left corner of the cell area.
    pub cells_x: f32,
    pub cells_y: f32,
    pub cell_size: f32,
    pub rows: usize,
    pub cols: usize,
    /// Column tick labels are drawn vertically when they do not fit a cell.
    pub rotate_x_labels: bool,
    /// Legend and the position of its top-left corner.
    pub legend: Option<(LegendLayout, f32, f32)>,
}

impl FigureLayout {
    pub fn compute(heatmap: &Heatmap) -> Self {
        let style = &heatmap.options().style;
        let grid = heatmap.grid();
        let cs = style.cell_size.max(1.0);
        let font = style.font_size;
        let (rows, cols) = (grid.rows(), grid.cols());
        let cells_w = cols as f32 * cs;
        let cells_h = rows as f32 * cs;

        let y_tick_w = if style.y_tick_labels {
            max_width(&grid.row_labels(), font) + TICK_GAP
        } else {
            0.0
        };
        let x_label_w = max_width(&grid.column_labels(), font);
        let rotate_x_labels = x_label_w > cs - 2.0;
        let x_tick_h = match (style.x_tick_labels, rotate_x_labels) {
            (false, _) => 0.0,
            (true, true) => x_label_w + TICK_GAP,
            (true, false) => font * 1.6,
        };
        let title_h = if style.title.is_some() { font * 2.0 } else { 0.0 };

        let mut legend = heatmap.legend_layout();
        let position = heatmap.options().legend.as_ref().map(|l| l.position);
        let expand = heatmap.options().legend.as_ref().is_some_and(|l| l.expand);
        if position == Some(LegendPosition::Detached) {
            legend = None;
        }
        if let (Some(l), Some(LegendPosition::Top), true) = (legend.as_mut(), position, expand) {
            l.expand_to_width(cells_w);
        }

        let legend_top_h = match (&legend, position) {
            (Some(l), Some(LegendPosition::Top)) => l.height() + LEGEND_GAP,
            _ => 0.0,
        };
        let legend_right_w = match (&legend, position) {
            (Some(l), Some(LegendPosition::Right)) => l.width() + LEGEND_GAP,
            _ => 0.0,
        };

        let cells_x = MARGIN + y_tick_w;
        let cells_y = MARGIN + title_h + legend_top_h;
        let width = (cells_x + cells_w + legend_right_w + MARGIN)
            .max(cells_x + legend.as_ref().map_or(0.0, |l| l.width()) + MARGIN);
        let mut bottom = cells_y + cells_h + x_tick_h;

        let legend = legend.map(|l| match position {
            Some(LegendPosition::Top) => (l, cells_x, MARGIN + title_h),
            _ => {
                let y = cells_y + ((cells_h - l.height()) / 2.0).max(0.0);
                bottom = bottom.max(y + l.height());
                (l, cells_x + cells_w + LEGEND_GAP, y)
            }
        });

        Self {
            width: width.ceil(),
            height: (bottom + MARGIN).ceil(),
            cells_x,
            cells_y,
            cell_size: cs,
            rows,
            cols,
            rotate_x_labels,
            legend,
        }
    }

    /// `(x, y, w, h)` of one cell.
    pub fn cell_rect(&self, row: usize, col: usize) -> (f32, f32, f32, f32) {
        (
            self.cells_x + col as f32 * self.cell_size,
            self.cells_y + row as f32 * self.cell_size,
            self.cell_size,
            self.cell_size,
        )
    }

    pub fn cell_center(&self, row: usize, col: usize) -> (f32, f32) {
        let (x, y, w, h) = self.cell_rect(row, col);
        (x + w / 2.0, y + h / 2.0)
    }
}

fn max_width(labels: &[String], font: f32) -> f32 {
    labels
        .iter()
        .map(|l| text_width(l, font))
        .fold(0.0f32, f32::max)
}

// ─────────────────────────────────────────────────────────────────────────────
// SVG
// ─────────────────────────────────────────────────────────────────────────────

fn open_svg(out: &mut String, width: f32, height: f32, background: egui::Color32) {
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}" font-family="sans-serif">"#
    );
    let _ = writeln!(
        out,
        r#"<rect x="0" y="0" width="{width}" height="{height}" fill="{}" fill-opacity="{:.3}"/>"#,
        rgb_hex(background),
        opacity(background)
    );
}

pub(crate) fn figure_svg(heatmap: &Heatmap) -> String {
    let layout = heatmap.layout();
    let style = &heatmap.options().style;
    let grid = heatmap.grid();
    let font = style.font_size;
    let text = rgb_hex(style.text_color);
    let mut out = String::new();
    open_svg(&mut out, layout.width, layout.height, style.background);

    if let Some(title) = &style.title {
        let _ = writeln!(
            out,
            r#"<text x="{:.2}" y="{:.2}" font-size="{:.1}" text-anchor="middle" fill="{text}">{}</text>"#,
            layout.cells_x + layout.cols as f32 * layout.cell_size / 2.0,
            MARGIN + font * 1.2,
            font * 1.2,
            escape(title)
        );
    }

    out.push_str("<g class=\"cells\" shape-rendering=\"crispEdges\">\n");
    for row in 0..layout.rows {
        for col in 0..layout.cols {
            let Some(color) = heatmap.color_at(row, col) else {
                continue;
            };
            let (x, y, w, h) = layout.cell_rect(row, col);
            let _ = writeln!(
                out,
                r#"<rect x="{x:.2}" y="{y:.2}" width="{w:.2}" height="{h:.2}" fill="{}" fill-opacity="{:.3}"/>"#,
                rgb_hex(color),
                opacity(color)
            );
        }
    }
    out.push_str("</g>\n");

    if style.line_width > 0.0 {
        write_grid_lines(&mut out, &layout, style);
    }

    if style.annotate {
        for row in 0..layout.rows {
            for col in 0..layout.cols {
                let (Some(label), Some(color)) =
                    (heatmap.label_at(row, col), heatmap.color_at(row, col))
                else {
                    continue;
                };
                let (cx, cy) = layout.cell_center(row, col);
                let _ = writeln!(
                    out,
                    r#"<text x="{cx:.2}" y="{:.2}" font-size="{:.1}" text-anchor="middle" fill="{}">{}</text>"#,
                    cy + font * 0.35,
                    font,
                    rgb_hex(contrasting_text(color)),
                    escape(label)
                );
            }
        }
    }

    if style.y_tick_labels {
        for (row, label) in grid.row_labels().iter().enumerate() {
            let (_, cy) = layout.cell_center(row, 0);
            let _ = writeln!(
                out,
                r#"<text x="{:.2}" y="{:.2}" font-size="{font:.1}" text-anchor="end" fill="{text}">{}</text>"#,
                layout.cells_x - TICK_GAP,
                cy + font * 0.35,
                escape(label)
            );
        }
    }

    if style.x_tick_labels {
        let base = layout.cells_y + layout.rows as f32 * layout.cell_size + TICK_GAP;
        for (col, label) in grid.column_labels().iter().enumerate() {
            let (cx, _) = layout.cell_center(0, col);
            if layout.rotate_x_labels {
                let _ = writeln!(
                    out,
                    r#"<text x="{cx:.2}" y="{base:.2}" font-size="{font:.1}" text-anchor="end" transform="rotate(-90 {cx:.2} {base:.2}) translate(0 {:.2})" fill="{text}">{}</text>"#,
                    font * 0.35,
                    escape(label)
                );
            } else {
                let _ = writeln!(
                    out,
                    r#"<text x="{cx:.2}" y="{:.2}" font-size="{font:.1}" text-anchor="middle" fill="{text}">{}</text>"#,
                    base + font,
                    escape(label)
                );
            }
        }
    }

    if let Some((legend, x, y)) = &layout.legend {
        legend.write_svg(&mut out, *x, *y, style.text_color);
    }

    out.push_str("</svg>\n");
    out
}

fn write_grid_lines(out: &mut String, layout: &FigureLayout, style: &Style) {
    let x0 = layout.cells_x;
    let y0 = layout.cells_y;
    let x1 = x0 + layout.cols as f32 * layout.cell_size;
    let y1 = y0 + layout.rows as f32 * layout.cell_size;
    let _ = writeln!(
        out,
        r#"<g class="grid" stroke="{}" stroke-opacity="{:.3}" stroke-width="{:.2}">"#,
        rgb_hex(style.line_color),
        opacity(style.line_color),
        style.line_width
    );
    for col in 1..layout.cols {
        let x = x0 + col as f32 * layout.cell_size;
        let _ = writeln!(out, r#"<line x1="{x:.2}" y1="{y0:.2}" x2="{x:.2}" y2="{y1:.2}"/>"#);
    }
    for row in 1..layout.rows {
        let y = y0 + row as f32 * layout.cell_size;
        let _ = writeln!(out, r#"<line x1="{x0:.2}" y1="{y:.2}" x2="{x1:.2}" y2="{y:.2}"/>"#);
    }
    out.push_str("</g>\n");
}

/// Standalone legend document.
pub(crate) fn legend_svg(legend: &LegendLayout, style: &Style) -> String {
    let mut out = String::new();
    let (w, h) = (legend.width().ceil(), legend.height().ceil());
    open_svg(&mut out, w, h, style.background);
    legend.write_svg(&mut out, 0.0, 0.0, style.text_color);
    out.push_str("</svg>\n");
    out
}

// ─────────────────────────────────────────────────────────────────────────────
// Raster output
// ─────────────────────────────────────────────────────────────────────────────

/// Rasterise an SVG document; `scale` multiplies the document size.
pub fn rasterize(svg: &str, scale: f32) -> Result<RgbaImage> {
    if !(scale.is_finite() && scale > 0.0) {
        return Err(HeatmapError::render(format!("invalid scale {scale}")));
    }
    let mut opt = usvg::Options::default();
    opt.fontdb = Arc::clone(&FONTS);
    let tree = usvg::Tree::from_str(svg, &opt)?;
    let size = tree.size();
    let width = (size.width() * scale).ceil() as u32;
    let height = (size.height() * scale).ceil() as u32;
    let mut pixmap = tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| HeatmapError::render(format!("cannot allocate {width}x{height} pixmap")))?;
    resvg::render(
        &tree,
        tiny_skia::Transform::from_scale(scale, scale),
        &mut pixmap.as_mut(),
    );

    let mut img = RgbaImage::new(width, height);
    for (i, px) in pixmap.pixels().iter().enumerate() {
        let c = px.demultiply();
        let i = i as u32;
        img.put_pixel(
            i % width,
            i / width,
            Rgba([c.red(), c.green(), c.blue(), c.alpha()]),
        );
    }
    Ok(img)
}

/// Write `svg` to `path`; the extension selects vector or raster output.
pub fn save(svg: &str, path: &Path) -> Result<()> {
    let is_svg = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("svg"));
    if is_svg {
        std::fs::write(path, svg)?;
    } else {
        let format = ImageFormat::from_path(path)
            .map_err(|_| HeatmapError::UnsupportedFormat(path.to_path_buf()))?;
        let img = rasterize(svg, 1.0)?;
        match format {
            ImageFormat::Jpeg => image::DynamicImage::ImageRgba8(img)
                .to_rgb8()
                .save_with_format(path, format)?,
            _ => img.save_with_format(path, format)?,
        }
    }
    log::info!("saved heatmap to {:?}", path);
    Ok(())
}
