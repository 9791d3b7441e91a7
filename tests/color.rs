use std::collections::HashMap;

use todoist_miro_sync::utils::color::{color_name_to_hex, generate_hex_color, ColorAssigner, TagColor};

#[test]
fn test_generated_colors_are_stable() {
    assert_eq!(generate_hex_color("Anna Schmidt"), generate_hex_color("Anna Schmidt"));
    assert_ne!(generate_hex_color("Anna Schmidt"), generate_hex_color("Anna Schmid"));

    let color = generate_hex_color("Jonas Weber");
    assert_eq!(color.len(), 7);
    assert!(color.starts_with('#'));
    assert!(color[1..].chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
}

#[test]
fn test_board_color_names_map_to_hex() {
    assert_eq!(color_name_to_hex("red"), "#f24726");
    assert_eq!(color_name_to_hex("Dark_Blue"), TagColor::DarkBlue.hex());
    assert_eq!(color_name_to_hex("#123456"), "#123456");
}

#[test]
fn test_override_wins_over_generated_color() {
    let colors = ColorAssigner::new(HashMap::from([
        ("c1".to_string(), "violet".to_string()),
        ("c2".to_string(), "#00ff00".to_string()),
    ]));

    assert_eq!(colors.color_for("Anna Schmidt", Some("c1")), "#652cb3");
    assert_eq!(colors.color_for("Jonas Weber", Some("c2")), "#00ff00");
    assert_eq!(colors.color_for("Anna Schmidt", Some("c3")), "#a07f5b");
    assert_eq!(colors.color_for("Anna Schmidt", None), "#a07f5b");

    assert_eq!(colors.override_tag_color("c1"), Some(TagColor::Violet));
    assert_eq!(colors.override_tag_color("c2"), None);

    assert_eq!(colors.pinned_hex("c1"), None);
    assert_eq!(colors.pinned_hex("c2").as_deref(), Some("#00ff00"));
    assert_eq!(colors.pinned_hex("c3"), None);
}

#[test]
fn test_overrides_load_from_toml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("colors.toml");
    std::fs::write(&path, "[overrides]\n\"42\" = \"green\"\n").unwrap();

    let colors = ColorAssigner::from_file(&path).unwrap();
    assert_eq!(colors.overrides().len(), 1);
    assert_eq!(colors.color_for("Anyone", Some("42")), TagColor::Green.hex());

    std::fs::write(&path, "overrides = 3").unwrap();
    assert!(ColorAssigner::from_file(&path).is_err());
}
