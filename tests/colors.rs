use catheat::{parse_color, resolve_colors, to_hex, CategoryColors, Color32, HeatmapError, Palette};

fn cats(labels: &[&str]) -> Vec<String> {
    labels.iter().map(|s| s.to_string()).collect()
}

#[test]
fn parses_hex_forms() {
    assert_eq!(parse_color("#ff0000").unwrap(), Color32::RED);
    assert_eq!(parse_color("#F00").unwrap(), Color32::RED);
    assert_eq!(parse_color(" #00ff00 ").unwrap(), Color32::from_rgb(0, 255, 0));
    let [r, g, _, a] = parse_color("#0000ff80").unwrap().to_srgba_unmultiplied();
    assert_eq!((r, g, a), (0, 0, 128));
}

#[test]
fn parses_rgb_and_names() {
    assert_eq!(parse_color("rgb(1, 2, 3)").unwrap(), Color32::from_rgb(1, 2, 3));
    assert_eq!(parse_color("SteelBlue").unwrap(), Color32::from_rgb(70, 130, 180));
    assert_eq!(parse_color("tab:orange").unwrap(), Color32::from_rgb(255, 127, 14));
    assert_eq!(parse_color("k").unwrap(), Color32::BLACK);
}

#[test]
fn rejects_bad_colors() {
    for bad in ["", "#12", "#gggggg", "rgb(1,2)", "rgb(300,0,0)", "notacolor"] {
        assert!(
            matches!(parse_color(bad), Err(HeatmapError::InvalidColor(_))),
            "{bad:?} should fail"
        );
    }
}

#[test]
fn hex_round_trip() {
    assert_eq!(to_hex(Color32::from_rgb(18, 52, 86)), "#123456");
    let translucent = to_hex(parse_color("#12345678").unwrap());
    assert_eq!(translucent.len(), 9);
    assert!(translucent.ends_with("78"));
}

#[test]
fn empty_user_map_uses_palette_in_sorted_order() {
    let palette = Palette::Colors(vec![Color32::RED, Color32::GREEN, Color32::BLUE]);
    let (map, ordered) =
        resolve_colors(&cats(&["a", "b", "c"]), &CategoryColors::new(), &palette).unwrap();
    assert_eq!(ordered, vec![Color32::RED, Color32::GREEN, Color32::BLUE]);
    assert_eq!(map["b"], Color32::GREEN);
}

#[test]
fn missing_labels_are_filled_from_palette() {
    let mut user = CategoryColors::new();
    user.insert("b".to_string(), Color32::BLACK);
    let palette = Palette::Colors(vec![Color32::RED, Color32::GREEN]);
    let (map, ordered) = resolve_colors(&cats(&["a", "b", "c"]), &user, &palette).unwrap();
    assert_eq!(ordered, vec![Color32::RED, Color32::BLACK, Color32::GREEN]);
    assert_eq!(map.len(), 3);
}

#[test]
fn user_entries_for_absent_labels_are_kept() {
    let mut user = CategoryColors::new();
    user.insert("unused".to_string(), Color32::YELLOW);
    let (map, ordered) =
        resolve_colors(&cats(&["a"]), &user, &Palette::Colors(vec![Color32::RED])).unwrap();
    assert_eq!(ordered, vec![Color32::RED]);
    assert_eq!(map["unused"], Color32::YELLOW);
    assert_eq!(map.len(), 2);
}

#[test]
fn complete_user_map_never_consults_palette() {
    let mut user = CategoryColors::new();
    user.insert("a".to_string(), Color32::RED);
    user.insert("b".to_string(), Color32::BLUE);
    let (_, ordered) = resolve_colors(&cats(&["a", "b"]), &user, &Palette::Colors(vec![])).unwrap();
    assert_eq!(ordered, vec![Color32::RED, Color32::BLUE]);
}

#[test]
fn short_palette_for_missing_labels_fails() {
    let mut user = CategoryColors::new();
    user.insert("a".to_string(), Color32::RED);
    let err = resolve_colors(
        &cats(&["a", "b", "c"]),
        &user,
        &Palette::Colors(vec![Color32::BLUE]),
    )
    .unwrap_err();
    assert!(matches!(
        err,
        HeatmapError::NotEnoughColors {
            needed: 2,
            provided: 1
        }
    ));
}
