//! Config Validation Tests
//!
//! Typo detection and range validation for the engine TOML, exercised
//! through the public config API independently from the engine.

use std::io::Write;

use trafo_dga::config::validation::{
    known_config_keys, suggest_correction, validate_unknown_keys, validate_value_ranges,
};
use trafo_dga::config::{ConfigError, EngineConfig};
use trafo_dga::{BreakdownResult, TransformerClass};

// ============================================================================
// Typo Detection
// ============================================================================

#[test]
fn typo_in_class_table_warns_with_suggestion() {
    let toml_str = r#"
[breakdown.classes.B]
good_kv = 50.0
fiar_kv = 40.0
"#;
    let warnings = validate_unknown_keys(toml_str);
    assert_eq!(warnings.len(), 1, "Expected exactly 1 warning");
    assert!(warnings[0].field.contains("fiar_kv"));
    assert_eq!(
        warnings[0].suggestion.as_deref(),
        Some("breakdown.classes.B.fair_kv")
    );
}

#[test]
fn typo_in_history_section_warns() {
    let toml_str = r#"
[history]
recnt_limit = 10
"#;
    let warnings = validate_unknown_keys(toml_str);
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].suggestion.as_deref(), Some("history.recent_limit"));
}

#[test]
fn valid_config_produces_zero_warnings() {
    let toml_str = r#"
[breakdown.classes.O]
good_kv = 62.0
fair_kv = 52.0

[breakdown.classes.C]
good_kv = 40.0
fair_kv = 30.0

[co]
medium_ppm = 450.0
high_ppm = 650.0

[history]
path = "/var/lib/trafo-dga/history"
recent_limit = 50
"#;
    let warnings = validate_unknown_keys(toml_str);
    assert!(warnings.is_empty(), "Unexpected warnings: {warnings:?}");
}

#[test]
fn unrelated_key_has_no_suggestion() {
    let warnings = validate_unknown_keys("completely_unrelated = 1\n");
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].suggestion.is_none());
}

#[test]
fn suggestion_picks_closest_key() {
    let known = known_config_keys();
    assert_eq!(
        suggest_correction("co.hihg_ppm", &known).as_deref(),
        Some("co.high_ppm")
    );
    assert!(suggest_correction("zzzzzzzz", &known).is_none());
}

#[test]
fn unknown_keys_do_not_fail_load() {
    let (config, provenance) = EngineConfig::from_toml_str(
        r#"
[co]
medium_ppm = 480.0
mystery = true
"#,
    )
    .expect("unknown keys only warn");
    assert_eq!(config.co.medium_ppm, 480.0);
    assert!(provenance.is_user_set("co.medium_ppm"));
    assert!(!provenance.is_user_set("co.high_ppm"));
}

// ============================================================================
// Range Validation
// ============================================================================

#[test]
fn inverted_class_thresholds_rejected() {
    let err = EngineConfig::from_toml_str(
        r#"
[breakdown.classes.A]
good_kv = 40.0
fair_kv = 50.0
"#,
    )
    .unwrap_err();

    match err {
        ConfigError::Validation(errors) => {
            assert!(
                errors.iter().any(|e| e.contains("breakdown.classes.A")),
                "errors: {errors:?}"
            );
        }
        other => panic!("expected validation error, got {other}"),
    }
}

#[test]
fn inverted_co_limits_rejected() {
    let result = EngineConfig::from_toml_str(
        r#"
[co]
medium_ppm = 700.0
high_ppm = 600.0
"#,
    );
    assert!(matches!(result, Err(ConfigError::Validation(_))));
}

#[test]
fn zero_history_limit_rejected() {
    let result = EngineConfig::from_toml_str("[history]\nrecent_limit = 0\n");
    assert!(matches!(result, Err(ConfigError::Validation(_))));
}

#[test]
fn suspicious_values_only_warn() {
    let mut config = EngineConfig::default();
    config.breakdown.classes.o.good_kv = 150.0;
    config.co.high_ppm = 9000.0;

    let (errors, warnings) = validate_value_ranges(&config);
    assert!(errors.is_empty());
    assert!(warnings.iter().any(|w| w.field == "breakdown.classes.O.good_kv"));
    assert!(warnings.iter().any(|w| w.field == "co.high_ppm"));
    assert!(config.validate().is_ok(), "warnings never fail validation");
}

// ============================================================================
// Loading
// ============================================================================

#[test]
fn file_thresholds_change_classification() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
[breakdown.classes.B]
good_kv = 55.0
fair_kv = 45.0
"#
    )
    .unwrap();

    let config = EngineConfig::load_from_file(file.path()).unwrap();
    let b = config.breakdown.classes.for_class(TransformerClass::B);
    assert_eq!(b.classify(52.0), BreakdownResult::Fair);
    assert_eq!(b.classify(44.0), BreakdownResult::Poor);
    // Other classes keep their defaults
    let a = config.breakdown.classes.for_class(TransformerClass::A);
    assert_eq!(a.good_kv, 60.0);
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = EngineConfig::load_from_file(&dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io(..)));
}

#[test]
fn malformed_file_is_parse_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[co\nmedium_ppm = ").unwrap();
    let err = EngineConfig::load_from_file(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(..)));
}

#[test]
fn saved_config_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("trafo_dga.toml");

    let mut config = EngineConfig::default();
    config.co.medium_ppm = 450.0;
    config.save_to_file(&path).unwrap();

    let reloaded = EngineConfig::load_from_file(&path).unwrap();
    assert_eq!(reloaded, config);
}
