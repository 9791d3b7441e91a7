use todoist_miro_sync::config::{Config, Credentials};

#[test]
fn test_default_config() {
    let config = Config::default();
    assert_eq!(config.layout.card_width, 300);
    assert_eq!(config.layout.card_height, 100);
    assert_eq!(config.layout.cards_per_column, 17);
    assert_eq!(config.layout.inbox_frame, "Eingang");
    assert_eq!(config.layout.done_frame, "Done");
    assert_eq!(config.todoist.project_id_env, "TEAM_PROJECT_ID");
    assert_eq!(config.storage.database_path.to_str(), Some("todoist_tasks.db"));
    assert!(config.colors.overrides_file.is_none());
    assert!(!config.logging.enabled);
}

#[test]
fn test_config_validation() {
    let mut config = Config::default();

    // Valid config should pass
    assert!(config.validate().is_ok());

    config.layout.cards_per_column = 0;
    assert!(config.validate().is_err());

    config.layout.cards_per_column = 17;
    config.layout.done_frame = "  ".to_string();
    assert!(config.validate().is_err());

    config.layout.done_frame = "Done".to_string();
    config.miro.base_url = "ftp://example.com".to_string();
    assert!(config.validate().is_err());

    config.miro.base_url = "http://localhost:8080/v2/".to_string();
    config.logging.level = "loud".to_string();
    assert!(config.validate().is_err());

    config.logging.level = "debug".to_string();
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_serialization() {
    let config = Config::default();
    let toml_str = toml::to_string_pretty(&config).unwrap();
    assert!(toml_str.contains("inbox_frame = \"Eingang\""));
    assert!(toml_str.contains("cards_per_column = 17"));
    assert!(toml_str.contains("api_token_env = \"TODOIST_API_TOKEN\""));
}

#[test]
fn test_partial_config_deserialization() {
    let partial_toml = r#"
[layout]
cards_per_column = 10
inbox_frame = "Inbox"

[logging]
enabled = true
"#;

    let config: Config = toml::from_str(partial_toml).unwrap();

    assert_eq!(config.layout.cards_per_column, 10);
    assert_eq!(config.layout.inbox_frame, "Inbox");
    assert!(config.logging.enabled);

    assert_eq!(config.layout.card_width, 300); // default value
    assert_eq!(config.layout.done_frame, "Done"); // default value
    assert_eq!(config.logging.level, "info"); // default value
    assert_eq!(config.miro.board_id_env, "MIRO_BOARD_ID"); // default value
}

#[test]
fn test_empty_config_deserialization() {
    let config: Config = toml::from_str("").unwrap();
    let default_config = Config::default();

    assert_eq!(config.layout, default_config.layout);
    assert_eq!(config.storage.database_path, default_config.storage.database_path);
    assert_eq!(config.todoist.base_url, default_config.todoist.base_url);
    assert_eq!(config.logging.enabled, default_config.logging.enabled);
}

#[test]
fn test_generate_config_creates_directory() {
    let temp_dir = tempfile::tempdir().unwrap();
    let config_path = temp_dir.path().join("nested").join("config.toml");

    Config::generate_default_config(&config_path).unwrap();
    assert!(config_path.exists());

    let content = std::fs::read_to_string(&config_path).unwrap();
    assert!(content.starts_with("# todoist-miro-sync configuration"));
    assert!(content.contains("done_frame = \"Done\""));

    // The generated file must load back as a valid config
    let loaded = Config::load_from_file(&config_path).unwrap();
    assert_eq!(loaded.layout, Config::default().layout);
}

#[test]
fn test_load_rejects_invalid_file() {
    let temp_dir = tempfile::tempdir().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, "[layout]\ncard_width = 0\n").unwrap();

    assert!(Config::load_from_file(&config_path).is_err());
}

#[test]
fn test_credentials_come_from_named_variables() {
    let mut config = Config::default();
    config.todoist.api_token_env = "TMS_TEST_TODOIST_TOKEN".to_string();
    config.todoist.project_id_env = "TMS_TEST_PROJECT".to_string();
    config.miro.access_token_env = "TMS_TEST_MIRO_TOKEN".to_string();
    config.miro.board_id_env = "TMS_TEST_BOARD".to_string();

    std::env::set_var("TMS_TEST_TODOIST_TOKEN", "todoist-secret");
    std::env::set_var("TMS_TEST_PROJECT", " 2203306141 ");
    std::env::set_var("TMS_TEST_MIRO_TOKEN", "miro-secret");
    std::env::remove_var("TMS_TEST_BOARD");

    let err = Credentials::from_env(&config).unwrap_err();
    assert!(err.to_string().contains("TMS_TEST_BOARD"));

    std::env::set_var("TMS_TEST_BOARD", "uXjVOabc=");
    let credentials = Credentials::from_env(&config).unwrap();
    assert_eq!(credentials.todoist_project_id, "2203306141");
    assert_eq!(credentials.miro_board_id, "uXjVOabc=");

    // Tokens never show up in debug output
    let debug = format!("{credentials:?}");
    assert!(!debug.contains("todoist-secret"));
    assert!(!debug.contains("miro-secret"));

    let settings = config.sync_settings(&credentials);
    assert_eq!(settings.board_id, "uXjVOabc=");
    assert_eq!(settings.project_id, "2203306141");
}
