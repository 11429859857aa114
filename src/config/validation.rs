//! Config validation: unknown-key detection with Levenshtein suggestions
//! and value range checks.
//!
//! Two-pass parse approach: first deserialize raw TOML into `toml::Value`,
//! walk the key tree, compare against known field names, and emit warnings
//! with "did you mean?" suggestions. Then proceed with normal serde
//! deserialization. Warnings never break existing configs.

use std::collections::HashSet;

use super::defaults;
use crate::breakdown::ClassThresholds;
use crate::types::TransformerClass;

/// A non-fatal config warning (typo, suspicious value).
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    pub field: String,
    pub message: String,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(ref s) = self.suggestion {
            write!(f, ", did you mean '{s}'?")?;
        }
        Ok(())
    }
}

// ============================================================================
// Known Config Keys
// ============================================================================

/// Returns the complete set of valid dotted key paths for EngineConfig.
///
/// Maintained by hand to match the struct hierarchy in engine_config.rs.
pub fn known_config_keys() -> HashSet<&'static str> {
    let keys: &[&str] = &[
        // [breakdown]
        "breakdown",
        "breakdown.classes",
        "breakdown.classes.O",
        "breakdown.classes.O.good_kv",
        "breakdown.classes.O.fair_kv",
        "breakdown.classes.A",
        "breakdown.classes.A.good_kv",
        "breakdown.classes.A.fair_kv",
        "breakdown.classes.B",
        "breakdown.classes.B.good_kv",
        "breakdown.classes.B.fair_kv",
        "breakdown.classes.C",
        "breakdown.classes.C.good_kv",
        "breakdown.classes.C.fair_kv",
        // [co]
        "co",
        "co.medium_ppm",
        "co.high_ppm",
        // [history]
        "history",
        "history.path",
        "history.recent_limit",
        "history.memory_capacity",
    ];
    keys.iter().copied().collect()
}

// ============================================================================
// TOML Key Walking
// ============================================================================

/// Recursively walks a `toml::Value` tree and collects all dotted key paths.
///
/// For example, a table `{ a = { b = 1, c = 2 } }` yields:
/// `["a", "a.b", "a.c"]`
pub fn walk_toml_keys(value: &toml::Value, prefix: &str) -> Vec<String> {
    let mut keys = Vec::new();
    if let Some(table) = value.as_table() {
        for (k, v) in table {
            let path = if prefix.is_empty() {
                k.clone()
            } else {
                format!("{prefix}.{k}")
            };
            keys.push(path.clone());
            if v.is_table() {
                keys.extend(walk_toml_keys(v, &path));
            }
        }
    }
    keys
}

// ============================================================================
// Levenshtein Distance
// ============================================================================

fn levenshtein(a: &str, b: &str) -> usize {
    let b_chars: Vec<char> = b.chars().collect();
    let b_len = b_chars.len();
    if a.is_empty() {
        return b_len;
    }
    if b_len == 0 {
        return a.chars().count();
    }

    let mut prev: Vec<usize> = (0..=b_len).collect();
    let mut curr = vec![0; b_len + 1];

    for (i, ca) in a.chars().enumerate() {
        curr[0] = i + 1;
        for (j, &cb) in b_chars.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b_len]
}

/// Suggest the closest known key for an unknown key, if within edit distance 3.
///
/// Ties go to the lexicographically smaller key so output is stable.
pub fn suggest_correction(unknown: &str, known: &HashSet<&str>) -> Option<String> {
    known
        .iter()
        .map(|&k| (levenshtein(unknown, k), k))
        .filter(|(dist, _)| *dist <= 3)
        .min()
        .map(|(_, k)| k.to_string())
}

// ============================================================================
// Unknown Key Validation (entry point)
// ============================================================================

/// Parse a raw TOML string and return warnings for any unknown config keys.
///
/// Never fails on unknown keys; parse errors are reported by serde later.
pub fn validate_unknown_keys(raw_toml: &str) -> Vec<ValidationWarning> {
    let Ok(value) = raw_toml.parse::<toml::Value>() else {
        return Vec::new();
    };

    let known = known_config_keys();
    walk_toml_keys(&value, "")
        .into_iter()
        .filter(|key| !known.contains(key.as_str()))
        .map(|key| ValidationWarning {
            suggestion: suggest_correction(&key, &known),
            message: format!("Unknown config key '{key}'"),
            field: key,
        })
        .collect()
}

// ============================================================================
// Value Range Validation
// ============================================================================

/// Range checks on a parsed EngineConfig.
///
/// Returns (errors, warnings): errors are impossible values, warnings are
/// suspicious but allowed.
///
/// Errors:
/// - Every value must be finite and non-negative
/// - Per class, fair_kv < good_kv
/// - CO medium_ppm <= high_ppm
/// - history.recent_limit and history.memory_capacity > 0
pub fn validate_value_ranges(config: &super::EngineConfig) -> (Vec<String>, Vec<ValidationWarning>) {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    for class in TransformerClass::ALL {
        let t = config.breakdown.classes.for_class(class);
        check_class(class, t, &mut errors);
        if t.good_kv > defaults::BREAKDOWN_SUSPICIOUS_KV {
            warnings.push(ValidationWarning {
                field: format!("breakdown.classes.{class}.good_kv"),
                message: format!(
                    "breakdown.classes.{class}.good_kv = {:.1} is above typical test-cell range (<= {:.0} kV)",
                    t.good_kv,
                    defaults::BREAKDOWN_SUSPICIOUS_KV
                ),
                suggestion: None,
            });
        }
    }

    // Lower voltage classes should not demand more than higher ones
    let c = &config.breakdown.classes;
    if c.c.good_kv > c.b.good_kv || c.b.good_kv > c.a.good_kv {
        warnings.push(ValidationWarning {
            field: "breakdown.classes".to_string(),
            message: "breakdown good_kv should not decrease from class C to class A".to_string(),
            suggestion: None,
        });
    }

    let co = &config.co;
    if !co.medium_ppm.is_finite() || !co.high_ppm.is_finite() {
        errors.push(format!(
            "co: values must be finite (got medium_ppm={}, high_ppm={})",
            co.medium_ppm, co.high_ppm
        ));
    } else {
        if co.medium_ppm < 0.0 {
            errors.push(format!("co.medium_ppm ({:.1}) cannot be negative", co.medium_ppm));
        }
        if co.high_ppm < co.medium_ppm {
            errors.push(format!(
                "co.high_ppm ({:.1}) must be >= medium_ppm ({:.1})",
                co.high_ppm, co.medium_ppm
            ));
        }
    }

    if config.history.recent_limit == 0 {
        errors.push("history.recent_limit must be > 0".to_string());
    }
    if config.history.memory_capacity == 0 {
        errors.push("history.memory_capacity must be > 0".to_string());
    }

    if config.co.high_ppm > defaults::CO_SUSPICIOUS_PPM {
        warnings.push(ValidationWarning {
            field: "co.high_ppm".to_string(),
            message: format!(
                "co.high_ppm = {:.0} is above typical range (<= {:.0} ppm)",
                config.co.high_ppm,
                defaults::CO_SUSPICIOUS_PPM
            ),
            suggestion: None,
        });
    }

    (errors, warnings)
}

fn check_class(class: TransformerClass, t: &ClassThresholds, errors: &mut Vec<String>) {
    let name = format!("breakdown.classes.{class}");
    // NaN comparisons silently pass
    if !t.good_kv.is_finite() || !t.fair_kv.is_finite() {
        errors.push(format!(
            "{name}: values must be finite (got good_kv={}, fair_kv={})",
            t.good_kv, t.fair_kv
        ));
        return;
    }
    if t.fair_kv < 0.0 {
        errors.push(format!("{name}.fair_kv ({:.1}) cannot be negative", t.fair_kv));
    }
    if t.fair_kv >= t.good_kv {
        errors.push(format!(
            "{name}: fair_kv ({:.1}) must be less than good_kv ({:.1})",
            t.fair_kv, t.good_kv
        ));
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;

    #[test]
    fn test_levenshtein_identical() {
        assert_eq!(levenshtein("medium_ppm", "medium_ppm"), 0);
    }

    #[test]
    fn test_levenshtein_one_edit() {
        assert_eq!(levenshtein("medum_ppm", "medium_ppm"), 1);
    }

    #[test]
    fn test_levenshtein_empty() {
        assert_eq!(levenshtein("", "abc"), 3);
        assert_eq!(levenshtein("abc", ""), 3);
    }

    #[test]
    fn test_walk_toml_keys_nested() {
        let toml: toml::Value = r#"
            [breakdown.classes.B]
            good_kv = 50.0
        "#
        .parse()
        .unwrap();
        let keys = walk_toml_keys(&toml, "");
        assert!(keys.contains(&"breakdown".to_string()));
        assert!(keys.contains(&"breakdown.classes".to_string()));
        assert!(keys.contains(&"breakdown.classes.B.good_kv".to_string()));
    }

    #[test]
    fn test_typo_key_produces_warning_with_suggestion() {
        let toml_str = r#"
[co]
medum_ppm = 450.0
"#;
        let warnings = validate_unknown_keys(toml_str);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].field.contains("medum_ppm"));
        assert_eq!(warnings[0].suggestion.as_deref(), Some("co.medium_ppm"));
    }

    #[test]
    fn test_lowercase_class_suggests_uppercase() {
        let warnings = validate_unknown_keys("[breakdown.classes.b]\ngood_kv = 50.0\nfair_kv = 40.0\n");
        assert!(warnings
            .iter()
            .any(|w| w.suggestion.as_deref() == Some("breakdown.classes.B")));
    }

    #[test]
    fn test_all_valid_keys_produce_zero_warnings() {
        let toml_str = r#"
[breakdown.classes.O]
good_kv = 60.0
fair_kv = 50.0

[co]
medium_ppm = 500.0
high_ppm = 600.0

[history]
path = "/var/lib/trafo-dga"
recent_limit = 10
"#;
        let warnings = validate_unknown_keys(toml_str);
        assert!(warnings.is_empty(), "Expected 0 warnings, got: {warnings:?}");
    }

    #[test]
    fn test_suggest_correction_no_match_for_garbage() {
        let known = known_config_keys();
        assert!(suggest_correction("completely_unrelated_garbage_key_xyz", &known).is_none());
    }

    #[test]
    fn test_ranges_defaults_clean() {
        let (errors, warnings) = validate_value_ranges(&EngineConfig::default());
        assert!(errors.is_empty(), "Defaults should produce no errors: {errors:?}");
        assert!(warnings.is_empty(), "Defaults should produce no warnings: {warnings:?}");
    }

    #[test]
    fn test_ranges_suspicious_breakdown() {
        let mut config = EngineConfig::default();
        config.breakdown.classes.o.good_kv = 150.0;
        let (_, warnings) = validate_value_ranges(&config);
        assert!(warnings.iter().any(|w| w.field == "breakdown.classes.O.good_kv"));
    }

    #[test]
    fn test_ranges_inverted_class_is_error() {
        let mut config = EngineConfig::default();
        config.breakdown.classes.c.fair_kv = 45.0;
        let (errors, _) = validate_value_ranges(&config);
        assert_eq!(errors.len(), 1, "errors: {errors:?}");
        assert!(errors[0].starts_with("breakdown.classes.C"));
    }

    #[test]
    fn test_ranges_non_finite_and_zero_limits_are_errors() {
        let mut config = EngineConfig::default();
        config.co.medium_ppm = f64::NAN;
        config.history.recent_limit = 0;
        let (errors, _) = validate_value_ranges(&config);
        assert!(errors.iter().any(|e| e.starts_with("co:")));
        assert!(errors.iter().any(|e| e.contains("history.recent_limit")));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_ranges_suspicious_co() {
        let mut config = EngineConfig::default();
        config.co.high_ppm = 9_000.0;
        let (_, warnings) = validate_value_ranges(&config);
        assert!(warnings.iter().any(|w| w.field == "co.high_ppm"));
    }
}
