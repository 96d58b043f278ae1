use catheat::{
    heatmap, parse_color, CategoryGrid, Color32, Colormap, HeatmapOptions, LegendLayout,
    LegendOptions, LegendPosition, Palette, Style,
};

fn sample_grid() -> CategoryGrid {
    CategoryGrid::from_rows(vec![
        vec!["b", "a", "c"],
        vec!["a", "a", "b"],
    ])
    .unwrap()
}

fn rgb_options() -> HeatmapOptions {
    HeatmapOptions::new()
        .color("a", Color32::RED)
        .color("b", Color32::from_rgb(0, 255, 0))
        .color("c", Color32::BLUE)
}

#[test]
fn builds_categories_colors_and_indices() {
    let hm = heatmap(&sample_grid(), &HeatmapOptions::new()).unwrap();
    assert_eq!(hm.categories(), &["a", "b", "c"]);
    assert_eq!(hm.colors().len(), 3);
    assert_eq!(hm.category_colors().len(), 3);
    assert_eq!(hm.indices().row(0), &[1, 0, 2]);
    assert_eq!(hm.label_at(1, 2), Some("b"));
    assert_eq!(hm.color_at(0, 1), Some(hm.colors()["a"]));
    assert_eq!(hm.color_at(5, 5), None);
}

#[test]
fn every_present_label_gets_a_color() {
    let opts = HeatmapOptions::new()
        .palette(Palette::Colors(vec![Color32::GRAY, Color32::GOLD]))
        .color("b", Color32::BLACK)
        .color("zzz", Color32::WHITE);
    let hm = heatmap(&sample_grid(), &opts).unwrap();
    for label in hm.categories() {
        assert!(hm.colors().contains_key(label));
    }
    assert_eq!(hm.colors()["a"], Color32::GRAY);
    assert_eq!(hm.colors()["b"], Color32::BLACK);
    assert_eq!(hm.colors()["c"], Color32::GOLD);
    assert_eq!(hm.colors()["zzz"], Color32::WHITE);
}

#[test]
fn single_category() {
    let grid = CategoryGrid::from_rows(vec![vec!["x", "x"], vec!["x", "x"]]).unwrap();
    let hm = heatmap(&grid, &HeatmapOptions::new().palette("viridis")).unwrap();
    assert_eq!(hm.categories(), &["x"]);
    assert!(hm.indices().as_slice().iter().all(|&i| i == 0));
    // a named colormap gives its middle color
    assert_eq!(hm.colors()["x"], parse_color("#21918c").unwrap());
    assert_eq!(hm.color_at(1, 1), Some(parse_color("#21918c").unwrap()));

    let cmap = Colormap::from_list(&[Color32::GOLD, Color32::BLUE]).unwrap();
    let hm = heatmap(&grid, &HeatmapOptions::new().palette(cmap)).unwrap();
    assert_eq!(hm.category_colors(), &[Color32::GOLD]);
}

#[test]
fn right_legend_is_vertically_centred() {
    let rows: Vec<Vec<&str>> = (0..10).map(|r| vec![if r % 2 == 0 { "a" } else { "b" }; 2]).collect();
    let hm = heatmap(&CategoryGrid::from_rows(rows).unwrap(), &HeatmapOptions::new()).unwrap();
    let layout = hm.layout();
    let (legend, _, y) = layout.legend.as_ref().unwrap();
    let cells_h = layout.rows as f32 * layout.cell_size;
    assert!(legend.height() < cells_h);
    let legend_mid = y + legend.height() / 2.0;
    let cells_mid = layout.cells_y + cells_h / 2.0;
    assert!((legend_mid - cells_mid).abs() < 1e-3, "{legend_mid} vs {cells_mid}");
}

#[test]
fn tall_right_legend_starts_at_the_cells() {
    let labels: Vec<String> = (0..12).map(|i| format!("c{i:02}")).collect();
    let grid = CategoryGrid::from_rows(vec![labels]).unwrap();
    let hm = heatmap(&grid, &HeatmapOptions::new()).unwrap();
    let layout = hm.layout();
    let (legend, _, y) = layout.legend.as_ref().unwrap();
    assert_eq!(*y, layout.cells_y);
    assert!(layout.height >= y + legend.height());
}

#[test]
fn svg_contains_cells_and_legend() {
    let hm = heatmap(&sample_grid(), &rgb_options()).unwrap();
    let svg = hm.to_svg();
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains(r##"fill="#ff0000""##));
    assert!(svg.contains(r##"fill="#00ff00""##));
    assert!(svg.contains(r##"fill="#0000ff""##));
    assert!(svg.contains(r#"class="legend""#));
    assert!(svg.trim_end().ends_with("</svg>"));
}

#[test]
fn labels_are_escaped() {
    let grid = CategoryGrid::from_rows(vec![vec!["a<b", "c&d"]]).unwrap();
    let opts = HeatmapOptions::new().style(Style {
        annotate: true,
        ..Style::default()
    });
    let svg = heatmap(&grid, &opts).unwrap().to_svg();
    assert!(svg.contains("a&lt;b"));
    assert!(svg.contains("c&amp;d"));
    assert!(!svg.contains("a<b"));
}

#[test]
fn no_legend_when_disabled() {
    let hm = heatmap(&sample_grid(), &rgb_options().legend(None)).unwrap();
    assert!(hm.legend_svg().is_none());
    assert!(hm.layout().legend.is_none());
    assert!(!hm.to_svg().contains(r#"class="legend""#));
}

#[test]
fn right_legend_sits_beside_cells() {
    let hm = heatmap(&sample_grid(), &rgb_options()).unwrap();
    let layout = hm.layout();
    let (legend, x, _) = layout.legend.as_ref().unwrap();
    assert!(*x >= layout.cells_x + layout.cols as f32 * layout.cell_size);
    assert_eq!(legend.columns(), 1);
    assert!(layout.width >= *x + legend.width());
}

#[test]
fn top_legend_sits_above_cells_in_one_row() {
    let opts = rgb_options().legend(Some(LegendOptions::at(LegendPosition::Top)));
    let hm = heatmap(&sample_grid(), &opts).unwrap();
    let layout = hm.layout();
    let (legend, _, y) = layout.legend.as_ref().unwrap();
    assert_eq!(legend.columns(), 3);
    assert_eq!(legend.rows(), 1);
    assert!(*y + legend.height() <= layout.cells_y);
}

#[test]
fn top_legend_expands_to_cell_width() {
    let grid = CategoryGrid::from_rows(vec![["a", "b"].repeat(20)]).unwrap();
    let opts = HeatmapOptions::new().legend(Some(LegendOptions::at(LegendPosition::Top)));
    let hm = heatmap(&grid, &opts).unwrap();
    let layout = hm.layout();
    let (legend, _, _) = layout.legend.as_ref().unwrap();
    assert!(legend.width() >= layout.cols as f32 * layout.cell_size - 0.01);
}

#[test]
fn expand_only_widens_top_legends() {
    let grid = CategoryGrid::from_rows(vec![["a", "b"].repeat(20)]).unwrap();
    let legend_width = |position, expand| {
        let opts = HeatmapOptions::new().legend(Some(LegendOptions {
            expand,
            ..LegendOptions::at(position)
        }));
        let layout = heatmap(&grid, &opts).unwrap().layout();
        layout.legend.map(|(l, _, _)| l.width()).unwrap()
    };
    assert!(legend_width(LegendPosition::Top, true) > legend_width(LegendPosition::Top, false));
    assert_eq!(
        legend_width(LegendPosition::Right, true),
        legend_width(LegendPosition::Right, false)
    );
}

#[test]
fn detached_legend_is_rendered_separately() {
    let opts = rgb_options().legend(Some(LegendOptions::at(LegendPosition::Detached)));
    let hm = heatmap(&sample_grid(), &opts).unwrap();
    assert!(hm.layout().legend.is_none());
    assert!(!hm.to_svg().contains(r#"class="legend""#));
    let legend = hm.legend_svg().unwrap();
    assert!(legend.contains(r#"class="legend""#));
    for label in ["a", "b", "c"] {
        assert!(legend.contains(&format!(">{label}</text>")));
    }
}

#[test]
fn legend_fills_columns_first() {
    let cats: Vec<String> = ["a", "b", "c"].iter().map(|s| s.to_string()).collect();
    let colors = vec![Color32::RED, Color32::GREEN, Color32::BLUE];
    let opts = LegendOptions {
        columns: Some(2),
        ..LegendOptions::default()
    };
    let layout = LegendLayout::compute(&cats, &colors, &opts);
    assert_eq!((layout.columns(), layout.rows()), (2, 2));
    let entries = layout.entries();
    assert_eq!(entries[1].label, "b");
    assert_eq!(entries[1].x, entries[0].x);
    assert!(entries[1].y > entries[0].y);
    assert!(entries[2].x > entries[0].x);
    assert_eq!(entries[2].y, entries[0].y);
}

#[test]
fn column_count_is_clamped() {
    let opts = LegendOptions {
        columns: Some(10),
        ..LegendOptions::default()
    };
    assert_eq!(opts.columns_for(3), 3);
    let opts = LegendOptions {
        columns: Some(0),
        ..LegendOptions::default()
    };
    assert_eq!(opts.columns_for(3), 1);
    assert_eq!(LegendOptions::at(LegendPosition::Top).columns_for(4), 4);
}

#[test]
fn legend_title_and_frame_are_drawn() {
    let opts = rgb_options().legend(Some(LegendOptions {
        title: Some("Kinds".to_string()),
        frame: true,
        ..LegendOptions::default()
    }));
    let svg = heatmap(&sample_grid(), &opts).unwrap().to_svg();
    assert!(svg.contains(">Kinds</text>"));
    assert!(svg.contains(r##"fill="none" stroke="#000000""##));
}

#[test]
fn long_column_labels_rotate() {
    let grid = sample_grid()
        .with_column_labels(["a very long label", "x", "y"])
        .unwrap();
    let hm = heatmap(&grid, &HeatmapOptions::new()).unwrap();
    assert!(hm.layout().rotate_x_labels);
    assert!(hm.to_svg().contains("rotate(-90"));

    let hm = heatmap(&sample_grid(), &HeatmapOptions::new()).unwrap();
    assert!(!hm.layout().rotate_x_labels);
}

#[test]
fn grid_lines_only_when_requested() {
    let hm = heatmap(&sample_grid(), &rgb_options()).unwrap();
    assert!(!hm.to_svg().contains(r#"class="grid""#));
    let opts = rgb_options().style(Style {
        line_width: 1.0,
        ..Style::default()
    });
    let svg = heatmap(&sample_grid(), &opts).unwrap().to_svg();
    assert!(svg.contains(r#"class="grid""#));
    // 2 inner vertical + 1 inner horizontal line for a 2x3 grid
    assert_eq!(svg.matches("<line ").count(), 3);
}
