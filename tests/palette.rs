use catheat::{parse_color, Color32, Colormap, HeatmapError, Palette};

fn close(a: Color32, b: Color32) -> bool {
    let d = |x: u8, y: u8| (x as i16 - y as i16).abs() <= 1;
    d(a.r(), b.r()) && d(a.g(), b.g()) && d(a.b(), b.b())
}

#[test]
fn default_palette_is_hls() {
    assert_eq!(Palette::default(), Palette::Named("hls".to_string()));
}

#[test]
fn hls_first_color_matches_reference() {
    let colors = Palette::default().generate(1).unwrap();
    assert!(close(colors[0], Color32::from_rgb(219, 95, 87)), "{:?}", colors[0]);
}

#[test]
fn hls_colors_are_distinct() {
    let colors = Palette::default().generate(6).unwrap();
    assert_eq!(colors.len(), 6);
    for i in 0..colors.len() {
        for j in (i + 1)..colors.len() {
            assert_ne!(colors[i], colors[j]);
        }
    }
}

#[test]
fn zero_colors_is_empty() {
    assert!(Palette::from("tab10").generate(0).unwrap().is_empty());
    assert!(Palette::Colors(vec![]).generate(0).unwrap().is_empty());
}

#[test]
fn qualitative_palettes_cycle() {
    let colors = Palette::from("tab10").generate(12).unwrap();
    assert_eq!(colors.len(), 12);
    assert_eq!(colors[10], colors[0]);
    assert_eq!(colors[0], parse_color("#1f77b4").unwrap());
}

#[test]
fn names_are_case_insensitive() {
    let a = Palette::from("Viridis").generate(3).unwrap();
    let b = Palette::from("viridis").generate(3).unwrap();
    assert_eq!(a, b);
}

#[test]
fn colormap_names_skip_endpoints() {
    let one = Palette::from("viridis").generate(1).unwrap();
    assert_eq!(one, vec![parse_color("#21918c").unwrap()]);

    let three = Palette::from("viridis").generate(3).unwrap();
    assert_eq!(
        three,
        vec![
            parse_color("#3b528b").unwrap(),
            parse_color("#21918c").unwrap(),
            parse_color("#5ec962").unwrap(),
        ]
    );
    assert!(!three.contains(&parse_color("#440154").unwrap()));
    assert!(!three.contains(&parse_color("#fde725").unwrap()));
}

#[test]
fn interior_samples_split_the_map_evenly() {
    let cmap = Colormap::from_list(&[Color32::from_rgb(0, 0, 0), Color32::from_rgb(240, 120, 60)])
        .unwrap();
    assert!(cmap.sample_interior(0).is_empty());
    assert_eq!(
        cmap.sample_interior(2),
        vec![Color32::from_rgb(80, 40, 20), Color32::from_rgb(160, 80, 40)]
    );
}

#[test]
fn explicit_colormaps_keep_endpoints() {
    let cmap = Colormap::builtin("viridis").unwrap();
    let colors = Palette::Colormap(cmap).generate(2).unwrap();
    assert_eq!(colors[0], parse_color("#440154").unwrap());
    assert_eq!(colors[1], parse_color("#fde725").unwrap());
}

#[test]
fn single_sample_takes_colormap_start() {
    let cmap = Colormap::from_list(&[Color32::RED, Color32::BLUE]).unwrap();
    assert_eq!(cmap.sample_n(1), vec![Color32::RED]);
}

#[test]
fn colormap_interpolates_linearly() {
    let cmap = Colormap::from_list(&[Color32::from_rgb(0, 0, 0), Color32::from_rgb(200, 100, 50)])
        .unwrap();
    assert_eq!(cmap.sample(0.5), Color32::from_rgb(100, 50, 25));
    assert_eq!(cmap.sample(-1.0), Color32::from_rgb(0, 0, 0));
    assert_eq!(cmap.sample(2.0), Color32::from_rgb(200, 100, 50));
    let colors = Palette::Colormap(cmap).generate(3).unwrap();
    assert_eq!(colors[1], Color32::from_rgb(100, 50, 25));
}

#[test]
fn colormap_needs_a_stop() {
    assert!(matches!(
        Colormap::from_list(&[]),
        Err(HeatmapError::EmptyColormap)
    ));
    assert!(Colormap::builtin("magma").is_some());
    assert!(Colormap::builtin("nope").is_none());
}

#[test]
fn color_lists_must_be_long_enough() {
    let err = Palette::Colors(vec![Color32::RED]).generate(2).unwrap_err();
    assert!(matches!(
        err,
        HeatmapError::NotEnoughColors {
            needed: 2,
            provided: 1
        }
    ));
}

#[test]
fn long_color_lists_are_truncated() {
    let list = vec![Color32::RED, Color32::GREEN, Color32::BLUE];
    let colors = Palette::Colors(list).generate(2).unwrap();
    assert_eq!(colors, vec![Color32::RED, Color32::GREEN]);
}

#[test]
fn unknown_palette_lists_supported_names() {
    let err = Palette::from("nonsense").generate(3).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("nonsense"));
    assert!(msg.contains("tab10"));
    assert!(msg.contains("viridis"));
}
