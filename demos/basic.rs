//! Example: basic categorical heatmap
//!
//! What it demonstrates
//! - Building a [`CategoryGrid`] with row/column labels.
//! - Rendering with the default `hls` palette and a right-hand legend.
//! - Reading back the label -> color map.
//!
//! How to run
//! ```bash
//! cargo run --example basic            # writes basic.png
//! cargo run --example basic -- out.svg # any supported extension
//! ```

use catheat::{heatmap, to_hex, CategoryGrid, HeatmapOptions};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let out = std::env::args().nth(1).unwrap_or_else(|| "basic.png".to_string());

    let grid = CategoryGrid::from_rows(vec![
        vec!["A", "A", "B", "C", "A"],
        vec!["B", "C", "C", "A", "B"],
        vec!["C", "B", "A", "A", "C"],
        vec!["A", "C", "B", "B", "A"],
    ])?
    .with_row_labels(["s1", "s2", "s3", "s4"])?
    .with_column_labels(["g1", "g2", "g3", "g4", "g5"])?;

    let hm = heatmap(&grid, &HeatmapOptions::new())?;
    for (label, color) in hm.colors() {
        println!("{label}: {}", to_hex(*color));
    }
    hm.save(&out)?;
    println!("wrote {out}");
    Ok(())
}
