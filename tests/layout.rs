use todoist_miro_sync::backend::{Geometry, Position};
use todoist_miro_sync::config::LayoutConfig;
use todoist_miro_sync::storage::BoardSnapshot;
use todoist_miro_sync::sync::cards::card_patch;
use todoist_miro_sync::sync::layout::GridLayout;

fn board(title: &str, due: Option<&str>, theme: &str) -> BoardSnapshot {
    BoardSnapshot {
        title: Some(title.to_string()),
        description: Some("notes".to_string()),
        due_date: due.map(str::to_string),
        theme: Some(theme.to_string()),
    }
}

#[test]
fn test_default_grid_wraps_after_seventeen_rows() {
    let grid = GridLayout::new(&LayoutConfig::default(), Position::default());

    assert_eq!(grid.slot(0), (0, 0));
    assert_eq!(grid.slot(16), (0, 16));
    assert_eq!(grid.slot(17), (1, 0));
    assert_eq!(grid.position(1), Position { x: 0.0, y: 101.0 });
    assert_eq!(grid.position(17), Position { x: 310.0, y: 0.0 });
    assert_eq!(grid.position(35), Position { x: 620.0, y: 101.0 });
    assert_eq!(grid.geometry(), Geometry { width: 300.0, height: 100.0 });
}

#[test]
fn test_grid_is_offset_by_origin() {
    let config = LayoutConfig {
        card_width: 200,
        card_height: 50,
        horizontal_spacing: 20,
        vertical_spacing: 5,
        cards_per_column: 3,
        ..Default::default()
    };
    let grid = GridLayout::new(&config, Position { x: -100.0, y: 40.0 });

    assert_eq!(grid.position(0), Position { x: -100.0, y: 40.0 });
    assert_eq!(grid.position(4), Position { x: 120.0, y: 95.0 });
}

#[test]
fn test_unchanged_card_needs_no_patch() {
    let synced = board("Write report", Some("2024-05-03T00:00:00Z"), "#f24726");
    let (patch, after) = card_patch(&synced, &synced.clone());

    assert!(patch.is_empty());
    assert_eq!(after, synced);
}

#[test]
fn test_patch_carries_only_changed_sections() {
    let synced = board("Write report", None, "#f24726");
    let desired = board("Write report", None, "#8fd14f");
    let (patch, after) = card_patch(&synced, &desired);

    assert_eq!(
        serde_json::to_value(&patch).unwrap(),
        serde_json::json!({"style": {"cardTheme": "#8fd14f"}})
    );
    assert_eq!(after, desired);
}

#[test]
fn test_removed_due_date_keeps_the_card_value() {
    let synced = board("Write report", Some("2024-05-03T00:00:00Z"), "#f24726");
    let desired = board("Write report", None, "#f24726");
    let (patch, after) = card_patch(&synced, &desired);

    assert!(patch.is_empty());
    assert_eq!(after.due_date.as_deref(), Some("2024-05-03T00:00:00Z"));
}

#[test]
fn test_removed_description_is_blanked() {
    let synced = board("Write report", None, "#f24726");
    let desired = BoardSnapshot {
        description: None,
        ..synced.clone()
    };
    let (patch, _) = card_patch(&synced, &desired);

    assert_eq!(
        serde_json::to_value(&patch).unwrap(),
        serde_json::json!({"data": {"description": ""}})
    );
}
