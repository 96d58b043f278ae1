//! Example: user colors, palette fill-in and a top legend
//!
//! What it demonstrates
//! - Fixing colors for some labels and letting a named palette fill the rest.
//! - A legend above the cells, grid lines and in-cell annotations.
//! - Writing the legend on its own.
//!
//! How to run
//! ```bash
//! cargo run --example custom_colors
//! ```

use catheat::{
    heatmap, parse_color, CategoryGrid, HeatmapOptions, LegendOptions, LegendPosition, Style,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let calls = "\
sample,chr1,chr2,chr3,chr4
p1,gain,loss,neutral,neutral
p2,neutral,gain,gain,loss
p3,loss,neutral,amp,neutral
";
    let grid = CategoryGrid::from_delimited(calls, ',', true, true)?;

    let options = HeatmapOptions::new()
        .palette("pastel")
        .color("neutral", parse_color("lightgrey")?)
        .color("amp", parse_color("#8b0000")?)
        .legend(Some(LegendOptions {
            title: Some("Copy number".to_string()),
            frame: true,
            ..LegendOptions::at(LegendPosition::Top)
        }))
        .style(Style {
            cell_size: 40.0,
            line_width: 1.5,
            annotate: true,
            title: Some("Copy number calls".to_string()),
            ..Style::default()
        });

    let hm = heatmap(&grid, &options)?;
    hm.save("custom_colors.png")?;
    if let Some(svg) = hm.legend_svg() {
        std::fs::write("custom_colors_legend.svg", svg)?;
    }
    Ok(())
}
