//! Engine Configuration Module
//!
//! Operator-tunable limits loaded from TOML files.
//!
//! ## Loading Order
//!
//! 1. `TRAFO_DGA_CONFIG` environment variable (path to TOML file)
//! 2. `trafo_dga.toml` in the current working directory
//! 3. Built-in defaults
//!
//! ## Usage
//!
//! Load once at startup and pass the relevant section to engine calls:
//!
//! ```ignore
//! let (config, _provenance) = EngineConfig::load_with_provenance();
//! let reading = breakdown::analyze_breakdown("TR-01", class, &kv, &config.breakdown.classes)?;
//! ```

mod engine_config;
pub mod defaults;
pub mod validation;

pub use engine_config::*;
