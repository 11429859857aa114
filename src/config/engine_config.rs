//! Engine Configuration - operator-tunable limits as TOML values
//!
//! Breakdown-voltage class thresholds, CO screening bands and local history
//! settings. Each struct implements `Default` with the IEC 60422 values and
//! the CO bands used by the screening module, so a missing config file
//! changes nothing.
//!
//! Zone thresholds of the Duval triangles are not configurable.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

use super::defaults;
use crate::breakdown::BreakdownThresholds;
use crate::co_analysis::CoLimits;

// ============================================================================
// Config Provenance
// ============================================================================

/// Tracks which configuration keys were explicitly present in the user's TOML file.
///
/// After deserialization every `#[serde(default)]` field has a value; this
/// keeps the distinction between user-set and built-in values for
/// `trafo-dga config` output.
#[derive(Debug, Clone, Default)]
pub struct ConfigProvenance {
    /// Dotted key paths explicitly present in the user's TOML file
    pub explicit_keys: HashSet<String>,
    /// File the config came from, if any
    pub source: Option<PathBuf>,
}

impl ConfigProvenance {
    /// Example: `provenance.is_user_set("breakdown.classes.B.good_kv")`
    pub fn is_user_set(&self, dotted_key: &str) -> bool {
        self.explicit_keys.contains(dotted_key)
    }
}

// ============================================================================
// Top-Level Config
// ============================================================================

/// Root engine configuration.
///
/// Load with `EngineConfig::load_with_provenance()` which searches:
/// 1. `$TRAFO_DGA_CONFIG` env var
/// 2. `./trafo_dga.toml`
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct EngineConfig {
    #[serde(default)]
    pub breakdown: BreakdownConfig,

    #[serde(default)]
    pub co: CoLimits,

    #[serde(default)]
    pub history: HistoryConfig,
}

impl EngineConfig {
    /// Load from a specific TOML file path.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let (config, _provenance) = Self::load_from_file_with_provenance(path)?;
        Ok(config)
    }

    /// Load from a specific TOML file path, also returning provenance.
    pub fn load_from_file_with_provenance(
        path: &Path,
    ) -> Result<(Self, ConfigProvenance), ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        let (config, mut provenance) = Self::from_toml_str(&contents)
            .map_err(|e| match e {
                ConfigError::Parse(_, inner) => ConfigError::Parse(path.to_path_buf(), inner),
                other => other,
            })?;
        provenance.source = Some(path.to_path_buf());
        Ok((config, provenance))
    }

    /// Parse and validate a TOML document.
    ///
    /// Unknown keys are logged as warnings and never fail the load.
    pub fn from_toml_str(contents: &str) -> Result<(Self, ConfigProvenance), ConfigError> {
        for w in &super::validation::validate_unknown_keys(contents) {
            warn!("{}", w);
        }

        let raw: toml::Value = toml::from_str(contents)
            .map_err(|e| ConfigError::Parse(PathBuf::new(), e))?;
        let provenance = ConfigProvenance {
            explicit_keys: super::validation::walk_toml_keys(&raw, "")
                .into_iter()
                .collect(),
            source: None,
        };

        let config: Self = toml::from_str(contents)
            .map_err(|e| ConfigError::Parse(PathBuf::new(), e))?;
        config.validate()?;
        Ok((config, provenance))
    }

    /// Load configuration using the standard search order, returning provenance.
    ///
    /// A file that fails to load is logged and skipped.
    pub fn load_with_provenance() -> (Self, ConfigProvenance) {
        // 1. Check env var
        if let Ok(path) = std::env::var(defaults::CONFIG_ENV_VAR) {
            let p = PathBuf::from(&path);
            if p.exists() {
                match Self::load_from_file_with_provenance(&p) {
                    Ok(loaded) => {
                        info!(path = %p.display(), "Loaded engine config from {}", defaults::CONFIG_ENV_VAR);
                        return loaded;
                    }
                    Err(e) => {
                        warn!(path = %p.display(), error = %e, "Failed to load config from {}, falling back", defaults::CONFIG_ENV_VAR);
                    }
                }
            } else {
                warn!(path = %path, "{} points to non-existent file, falling back", defaults::CONFIG_ENV_VAR);
            }
        }

        // 2. Check ./trafo_dga.toml
        let local = PathBuf::from(defaults::LOCAL_CONFIG_FILE);
        if local.exists() {
            match Self::load_from_file_with_provenance(&local) {
                Ok(loaded) => {
                    info!("Loaded engine config from ./{}", defaults::LOCAL_CONFIG_FILE);
                    return loaded;
                }
                Err(e) => {
                    warn!(error = %e, "Failed to load ./{}, using defaults", defaults::LOCAL_CONFIG_FILE);
                }
            }
        }

        // 3. Defaults, nothing is user-set
        info!("No config file found, using built-in defaults");
        (Self::default(), ConfigProvenance::default())
    }

    /// Serialize the current config to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::Serialize)
    }

    pub fn save_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let contents = self.to_toml()?;
        std::fs::write(path, contents).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        info!(path = %path.display(), "Engine config saved");
        Ok(())
    }

    /// Validate all limits for internal consistency.
    ///
    /// Range errors fail; suspicious values are only logged.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (errors, warnings) = super::validation::validate_value_ranges(self);
        for w in &warnings {
            warn!("{}", w);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config I/O error ({0:?}): {1}")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Config parse error ({0:?}): {1}")]
    Parse(PathBuf, #[source] toml::de::Error),

    #[error("Config serialization error: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Config validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),
}

// ============================================================================
// Breakdown Voltage
// ============================================================================

/// `[breakdown.classes.<O|A|B|C>]` tables.
///
/// A class table that is present must set both `good_kv` and `fair_kv`;
/// absent classes keep their defaults.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct BreakdownConfig {
    #[serde(default)]
    pub classes: BreakdownThresholds,
}

// ============================================================================
// History
// ============================================================================

/// `[history]` - local result store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoryConfig {
    /// Sled database directory
    #[serde(default = "default_history_path")]
    pub path: PathBuf,

    /// Records listed by `trafo-dga history` when no limit is given
    #[serde(default = "default_recent_limit")]
    pub recent_limit: usize,

    /// Capacity of the in-memory store used when no database is opened
    #[serde(default = "default_memory_capacity")]
    pub memory_capacity: usize,
}

fn default_history_path() -> PathBuf {
    PathBuf::from(defaults::HISTORY_DIR)
}
fn default_recent_limit() -> usize { defaults::HISTORY_RECENT_LIMIT }
fn default_memory_capacity() -> usize { defaults::HISTORY_MEMORY_CAPACITY }

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            path: default_history_path(),
            recent_limit: default_recent_limit(),
            memory_capacity: default_memory_capacity(),
        }
    }
}
