//! Configuration file tests

use lazy_algebra::config::DemoConfig;
use lazy_algebra::demo;
use lazy_algebra::error::ConfigError;
use tempfile::TempDir;

#[test]
fn save_then_load_preserves_settings() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("demo.json");

    let config = DemoConfig {
        scenarios: vec!["parse-two-digits".to_string()],
        parser_input: "07!".to_string(),
        log_filter: "lazy_algebra=trace".to_string(),
    };
    config.save(&path).unwrap();

    assert_eq!(DemoConfig::load(&path).unwrap(), config);
}

#[test]
fn missing_fields_fall_back_to_defaults() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("partial.json");
    std::fs::write(&path, r#"{ "parser_input": "99" }"#).unwrap();

    let config = DemoConfig::load(&path).unwrap();
    assert_eq!(config.parser_input, "99");
    assert!(config.scenarios.is_empty());
    assert_eq!(config.log_filter, "info");
}

#[test]
fn missing_file_is_an_io_error() {
    let temp = TempDir::new().unwrap();
    let err = DemoConfig::load(&temp.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
}

#[test]
fn malformed_file_is_a_json_error() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("broken.json");
    std::fs::write(&path, "{ scenarios: ").unwrap();

    let err = DemoConfig::load(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Json(_)));
    assert!(err.to_string().starts_with("invalid configuration:"));
}

#[test]
fn loaded_input_drives_parser_scenarios() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("demo.json");
    std::fs::write(
        &path,
        r#"{ "scenarios": ["parse-two-digits", "map-pure"], "parser_input": "7" }"#,
    )
    .unwrap();

    let reports = demo::run(&DemoConfig::load(&path).unwrap());
    assert_eq!(reports.len(), 2);
    assert_eq!(reports[0].name, "map-pure");
    assert_eq!(reports[1].rendered, "[]");
    assert!(reports.iter().all(|report| report.passed));
}
