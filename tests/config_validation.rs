// tests/config_validation.rs

use std::fs;

use tempfile::tempdir;

use watchrun::config::{load_and_validate, ActiveSelection, WatchRegistry};
use watchrun::errors::WatchrunError;
use watchrun_test_utils::builders::{ConfigBuilder, WatchSpecBuilder};
use watchrun_test_utils::init_tracing;

fn load_str(json: &str) -> watchrun::errors::Result<watchrun::config::Config> {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join("watchrun.json");
    fs::write(&path, json).unwrap();
    load_and_validate(&path)
}

#[test]
fn full_config_parses_with_camel_case_keys() {
    init_tracing();

    let cfg = load_str(
        r#"{
            "quietPeriodMs": 250,
            "watch": {
                "backend": {
                    "sourceDir": "/proj/backend",
                    "exclude": ["/proj/backend/target"],
                    "pipelines": [["cargo", "build"], ["rsync", "{{EventName}}", "{{dest}}"]],
                    "parameters": {"dest": "/srv/deploy"}
                }
            }
        }"#,
    )
    .unwrap();

    assert_eq!(cfg.quiet_period_ms, 250);
    let spec = &cfg.watch["backend"];
    assert_eq!(spec.source_dir.to_str(), Some("/proj/backend"));
    assert_eq!(spec.exclude.len(), 1);
    assert_eq!(spec.pipelines.len(), 2);
    assert_eq!(spec.parameter("dest").as_deref(), Some("/srv/deploy"));
    assert_eq!(spec.parameter("sourceDir").as_deref(), Some("/proj/backend"));
    assert_eq!(spec.parameter("missing"), None);
}

#[test]
fn quiet_period_defaults_when_omitted() {
    init_tracing();

    let cfg = load_str(
        r#"{"watch": {"app": {"sourceDir": "/p", "pipelines": [["make"]]}}}"#,
    )
    .unwrap();
    assert_eq!(cfg.quiet_period_ms, 500);
}

#[test]
fn config_without_watches_is_rejected() {
    init_tracing();

    let err = load_str(r#"{"quietPeriodMs": 100}"#).unwrap_err();
    assert!(matches!(err, WatchrunError::ConfigError(_)));
}

#[test]
fn relative_source_dir_is_rejected() {
    init_tracing();

    let err = load_str(
        r#"{"watch": {"app": {"sourceDir": "relative/path", "pipelines": [["make"]]}}}"#,
    )
    .unwrap_err();
    assert!(matches!(err, WatchrunError::ConfigError(_)));
}

#[test]
fn watch_without_pipelines_is_rejected() {
    init_tracing();

    let err =
        load_str(r#"{"watch": {"app": {"sourceDir": "/p", "pipelines": []}}}"#).unwrap_err();
    assert!(matches!(err, WatchrunError::ConfigError(_)));
}

#[test]
fn empty_pipeline_is_rejected() {
    init_tracing();

    let err =
        load_str(r#"{"watch": {"app": {"sourceDir": "/p", "pipelines": [[]]}}}"#).unwrap_err();
    assert!(matches!(err, WatchrunError::ConfigError(_)));
}

#[test]
fn zero_quiet_period_is_rejected() {
    init_tracing();

    let err = load_str(
        r#"{"quietPeriodMs": 0, "watch": {"app": {"sourceDir": "/p", "pipelines": [["make"]]}}}"#,
    )
    .unwrap_err();
    assert!(matches!(err, WatchrunError::ConfigError(_)));
}

#[test]
fn malformed_json_is_rejected() {
    init_tracing();

    let err = load_str("{not json").unwrap_err();
    assert!(matches!(err, WatchrunError::JsonError(_)));
}

#[test]
fn selection_parsing() {
    init_tracing();

    assert_eq!(ActiveSelection::parse("*"), ActiveSelection::All);
    assert_eq!(ActiveSelection::parse(""), ActiveSelection::All);
    assert_eq!(
        ActiveSelection::parse("a, b"),
        ActiveSelection::Named(vec!["a".to_string(), "b".to_string()])
    );
}

#[test]
fn registry_rejects_unknown_watch_names() {
    init_tracing();

    let cfg = ConfigBuilder::new()
        .with_watch("app", WatchSpecBuilder::new("/p").pipeline(&["make"]).build())
        .build();

    let err = WatchRegistry::from_config(
        cfg,
        &ActiveSelection::Named(vec!["nope".to_string()]),
    )
    .unwrap_err();
    assert!(matches!(err, WatchrunError::UnknownWatch(name) if name == "nope"));
}

#[test]
fn registry_selects_named_subset() {
    init_tracing();

    let cfg = ConfigBuilder::new()
        .with_watch("a", WatchSpecBuilder::new("/p").pipeline(&["make"]).build())
        .with_watch("b", WatchSpecBuilder::new("/q").pipeline(&["make"]).build())
        .build();

    let registry =
        WatchRegistry::from_config(cfg, &ActiveSelection::Named(vec!["b".to_string()])).unwrap();

    let active: Vec<&str> = registry.active().map(|(name, _)| name).collect();
    assert_eq!(active, vec!["b"]);
    assert!(registry.spec("a").is_some());
}
