use std::collections::HashMap;

use autogate_core::config::*;
use autogate_core::errors::ConfigError;

#[test]
fn config_loads_from_empty_toml_with_all_defaults() {
    let config = AutogateConfig::from_toml("").unwrap();

    assert_eq!(config.threshold.strategy, StrategyKind::Adaptive);
    assert_eq!(config.threshold.window, 1000);
    assert_eq!(config.threshold.confidence, 0.985);
    assert_eq!(config.threshold.deviation, 0.001);
    assert_eq!(config.threshold.max_prob, 0.99);
    assert_eq!(config.threshold.constant_confidence, 0.95);
    assert!(config.threshold.models.is_empty());

    assert!(config.replay.models.is_empty());
    assert_eq!(config.replay.timestamp_col, "timestamp");
    assert_eq!(config.replay.delay_secs, 3600);
}

#[test]
fn config_loads_partial_toml_with_overrides() {
    let toml = r#"
[threshold]
strategy = "constant"
window = 500

[threshold.models.application01]
confidence = 0.99

[replay]
models = ["application01", "application02"]
delay_secs = 60
"#;
    let config = AutogateConfig::from_toml(toml).unwrap();
    assert_eq!(config.threshold.strategy, StrategyKind::Constant);
    assert_eq!(config.threshold.window, 500);
    // Non-overridden fields keep defaults
    assert_eq!(config.threshold.confidence, 0.985);
    let app = &config.threshold.models["application01"];
    assert_eq!(app.confidence, Some(0.99));
    assert_eq!(app.window, None);
    assert_eq!(config.replay.models, vec!["application01", "application02"]);
    assert_eq!(config.replay.delay_secs, 60);
    assert_eq!(config.replay.timestamp_col, "timestamp");
    config.validate().unwrap();
}

#[test]
fn malformed_toml_is_a_parse_error() {
    let err = AutogateConfig::from_toml("[threshold\nwindow = ").unwrap_err();
    assert!(matches!(err, ConfigError::ParseError { .. }));
}

#[test]
fn validation_rejects_out_of_range_values() {
    let mut config = AutogateConfig::default();
    config.threshold.max_prob = 1.0;
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("threshold.max_prob"));

    let mut config = AutogateConfig::default();
    config.threshold.window = 1;
    assert!(config.validate().is_err());

    let mut config = AutogateConfig::default();
    config.replay.timestamp_col = String::new();
    assert!(config.validate().is_err());
}

#[test]
fn validation_rejects_duplicate_replay_models() {
    let config = AutogateConfig::from_toml(
        r#"
        [replay]
        models = ["app", "other", "app"]
        "#,
    )
    .unwrap();
    match config.validate().unwrap_err() {
        ConfigError::ValidationFailed { field, message } => {
            assert_eq!(field, "replay.models");
            assert!(message.contains("app"));
        }
        other => panic!("unexpected error: {other}"),
    }

    let mut config = AutogateConfig::default();
    config.replay.models = vec!["app".to_string(), "other".to_string()];
    assert!(config.validate().is_ok());
}

#[test]
fn env_overrides_take_priority() {
    let vars: HashMap<&str, &str> = [
        ("AUTOGATE_WINDOW", "250"),
        ("AUTOGATE_CONFIDENCE", "0.97"),
        ("AUTOGATE_STRATEGY", "constant"),
        ("AUTOGATE_DELAY_SECS", "10"),
    ]
    .into_iter()
    .collect();

    let mut config = AutogateConfig::from_toml("[threshold]\nwindow = 500\n").unwrap();
    config
        .apply_overrides_from(|k| vars.get(k).map(|v| v.to_string()))
        .unwrap();

    assert_eq!(config.threshold.window, 250);
    assert_eq!(config.threshold.confidence, 0.97);
    assert_eq!(config.threshold.strategy, StrategyKind::Constant);
    assert_eq!(config.replay.delay_secs, 10);
    assert_eq!(config.threshold.deviation, 0.001);
}

#[test]
fn unparsable_env_override_is_rejected() {
    let mut config = AutogateConfig::default();
    let err = config
        .apply_overrides_from(|k| (k == "AUTOGATE_MAX_PROB").then(|| "high".to_string()))
        .unwrap_err();
    assert!(err.to_string().contains("AUTOGATE_MAX_PROB"));
}

#[test]
fn missing_config_file_is_reported() {
    let err = AutogateConfig::from_file(std::path::Path::new("/nonexistent/autogate.toml"))
        .unwrap_err();
    assert!(matches!(err, ConfigError::FileNotFound { .. }));
}

#[test]
fn config_round_trips_through_toml() {
    let mut config = AutogateConfig::default();
    config.replay.models = vec!["m1".to_string()];
    config.threshold.models.insert(
        "m1".to_string(),
        ModelOverride {
            window: Some(50),
            ..Default::default()
        },
    );
    let rendered = config.to_toml().unwrap();
    assert_eq!(AutogateConfig::from_toml(&rendered).unwrap(), config);
}
