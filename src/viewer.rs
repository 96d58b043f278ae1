//! Interactive heatmap window.
//!
//! [`show`] opens a native window that draws the heatmap with `egui_plot`:
//! one filled polygon per cell, grouped in the plot legend by category.
//! The top bar saves the figure as PNG or SVG.

use eframe::egui;
use egui::{RichText, Stroke};
use egui_plot::{Legend, Plot, PlotPoint, Polygon, Text};

use crate::color::contrasting_text;
use crate::heatmap::Heatmap;

/// Window options for [`show`].
#[derive(Clone, Debug)]
pub struct ViewerOptions {
    /// Native window title.
    pub title: String,
    /// Initial inner size of the window.
    pub size: [f32; 2],
    /// Show the category legend inside the plot.
    pub legend: bool,
}

impl Default for ViewerOptions {
    fn default() -> Self {
        Self {
            title: "catheat".to_string(),
            size: [900.0, 700.0],
            legend: true,
        }
    }
}

/// Launch a native window showing `heatmap`. Blocks until the window is closed.
pub fn show(heatmap: Heatmap, options: ViewerOptions) -> eframe::Result<()> {
    let opts = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(egui::vec2(options.size[0], options.size[1])),
        ..Default::default()
    };
    let title = options.title.clone();
    let app = HeatmapApp::new(heatmap, options);
    eframe::run_native(&title, opts, Box::new(|_cc| Ok(Box::new(app))))
}

/// Cell under the pointer, as (row, col, label).
type Hovered = Option<(usize, usize, String)>;

struct HeatmapApp {
    heatmap: Heatmap,
    options: ViewerOptions,
    row_labels: Vec<String>,
    col_labels: Vec<String>,
    hovered: Hovered,
    status: Option<String>,
}

impl HeatmapApp {
    fn new(heatmap: Heatmap, options: ViewerOptions) -> Self {
        let row_labels = heatmap.grid().row_labels();
        let col_labels = heatmap.grid().column_labels();
        Self {
            heatmap,
            options,
            row_labels,
            col_labels,
            hovered: None,
            status: None,
        }
    }

    fn save_dialog(&mut self, ext: &str) {
        let default_name = format!(
            "heatmap_{:.0}.{ext}",
            chrono::Local::now().timestamp_millis()
        );
        let Some(path) = rfd::FileDialog::new()
            .set_file_name(&default_name)
            .add_filter(ext.to_ascii_uppercase(), &[ext])
            .save_file()
        else {
            return;
        };
        match self.heatmap.save(&path) {
            Ok(()) => self.status = Some(format!("Saved {}", path.display())),
            Err(e) => {
                log::error!("Failed to save heatmap: {e}");
                self.status = Some(format!("Save failed: {e}"));
            }
        }
    }

    fn render_top_bar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if ui.button("Save PNG").clicked() {
                self.save_dialog("png");
            }
            if ui.button("Save SVG").clicked() {
                self.save_dialog("svg");
            }
            ui.separator();
            ui.label(format!(
                "{} x {}, {} categories",
                self.heatmap.grid().rows(),
                self.heatmap.grid().cols(),
                self.heatmap.categories().len()
            ));
            if let Some((row, col, label)) = &self.hovered {
                ui.separator();
                ui.label(format!(
                    "{} / {}: {}",
                    self.row_labels[*row], self.col_labels[*col], label
                ));
            }
            if let Some(status) = &self.status {
                ui.separator();
                ui.label(status);
            }
        });
    }

    fn render_plot(&mut self, ui: &mut egui::Ui) {
        let rows = self.heatmap.grid().rows();
        let cols = self.heatmap.grid().cols();
        let style = self.heatmap.options().style.clone();
        let col_labels = &self.col_labels;
        let row_labels = &self.row_labels;

        // Cell (r, c) is centred on (c, -r) so integer grid marks hit cell centres.
        let mut plot = Plot::new("catheat_plot")
            .data_aspect(1.0)
            .show_grid(false)
            .allow_scroll(false)
            .x_axis_formatter(move |mark, _range| tick_label(col_labels, mark.value))
            .y_axis_formatter(move |mark, _range| tick_label(row_labels, -mark.value));
        if self.options.legend {
            plot = plot.legend(Legend::default());
        }

        let heatmap = &self.heatmap;
        let plot_resp = plot.show(ui, |plot_ui| {
            for row in 0..rows {
                for col in 0..cols {
                    let (Some(label), Some(color)) =
                        (heatmap.label_at(row, col), heatmap.color_at(row, col))
                    else {
                        continue;
                    };
                    let (x, y) = (col as f64, -(row as f64));
                    let corners = vec![
                        [x - 0.5, y - 0.5],
                        [x + 0.5, y - 0.5],
                        [x + 0.5, y + 0.5],
                        [x - 0.5, y + 0.5],
                    ];
                    let stroke = if style.line_width > 0.0 {
                        Stroke::new(style.line_width, style.line_color)
                    } else {
                        Stroke::NONE
                    };
                    plot_ui.polygon(
                        Polygon::new(label.to_string(), corners)
                            .fill_color(color)
                            .stroke(stroke),
                    );
                    if style.annotate {
                        plot_ui.text(Text::new(
                            "",
                            PlotPoint::new(x, y),
                            RichText::new(label).color(contrasting_text(color)),
                        ));
                    }
                }
            }
        });

        self.hovered = plot_resp
            .response
            .hover_pos()
            .map(|pos| plot_resp.transform.value_from_position(pos))
            .and_then(|p| {
                let col = p.x.round();
                let row = (-p.y).round();
                if col < 0.0 || row < 0.0 {
                    return None;
                }
                let (row, col) = (row as usize, col as usize);
                self.heatmap
                    .label_at(row, col)
                    .map(|label| (row, col, label.to_string()))
            });
    }
}

/// Label for an integer grid mark, empty between cells or out of range.
fn tick_label(labels: &[String], value: f64) -> String {
    let idx = value.round();
    if (value - idx).abs() > 1e-6 || idx < 0.0 {
        return String::new();
    }
    labels.get(idx as usize).cloned().unwrap_or_default()
}

impl eframe::App for HeatmapApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("catheat_top").show(ctx, |ui| {
            self.render_top_bar(ui);
        });
        egui::CentralPanel::default().show(ctx, |ui| {
            self.render_plot(ui);
        });
    }
}
