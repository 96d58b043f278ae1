//! Example: interactive window
//!
//! What it demonstrates
//! - Opening a heatmap in the egui viewer; hover shows the cell label,
//!   the top bar saves PNG/SVG.
//!
//! How to run
//! ```bash
//! cargo run --example viewer
//! ```

use catheat::{heatmap, show, CategoryGrid, HeatmapOptions, ViewerOptions};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let labels = ["alpha", "beta", "gamma", "delta", "epsilon"];
    let rows: Vec<Vec<&str>> = (0..12)
        .map(|r| (0..16).map(|c| labels[(r * 7 + c * 3 + r * c) % labels.len()]).collect())
        .collect();
    let grid = CategoryGrid::from_rows(rows)?;

    let hm = heatmap(&grid, &HeatmapOptions::new().palette("viridis"))?;
    show(
        hm,
        ViewerOptions {
            title: "catheat viewer example".to_string(),
            ..Default::default()
        },
    )?;
    Ok(())
}
