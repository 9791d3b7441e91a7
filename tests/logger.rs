use log::LevelFilter;
use todoist_miro_sync::config::LoggingConfig;
use todoist_miro_sync::logger;

#[test]
fn test_log_file_lives_in_app_data_dir() {
    let path = logger::get_log_file_path().unwrap();
    assert!(path.ends_with("todoist-miro-sync/sync.log"));
}

#[test]
fn test_verbose_raises_level_to_debug() {
    let config = LoggingConfig::default();
    assert_eq!(logger::effective_level(&config, false).unwrap(), LevelFilter::Info);
    assert_eq!(logger::effective_level(&config, true).unwrap(), LevelFilter::Debug);

    let trace = LoggingConfig {
        level: "trace".to_string(),
        ..Default::default()
    };
    assert_eq!(logger::effective_level(&trace, true).unwrap(), LevelFilter::Trace);
}

#[test]
fn test_invalid_level_is_rejected() {
    let config = LoggingConfig {
        level: "chatty".to_string(),
        ..Default::default()
    };
    assert!(logger::build_dispatch(&config, false).is_err());
}

#[test]
fn test_dispatch_without_file_builds() {
    let config = LoggingConfig::default();
    assert!(logger::build_dispatch(&config, false).is_ok());
}
