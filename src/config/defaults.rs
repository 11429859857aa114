//! System-wide default constants.
//!
//! Grouped by subsystem for easy discovery.

// ============================================================================
// Config Loading
// ============================================================================

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "TRAFO_DGA_CONFIG";

/// Config file looked up in the current working directory.
pub const LOCAL_CONFIG_FILE: &str = "trafo_dga.toml";

// ============================================================================
// History
// ============================================================================

/// Default sled database directory for saved results.
pub const HISTORY_DIR: &str = "trafo_dga_history";

/// Default number of records returned by `history`.
pub const HISTORY_RECENT_LIMIT: usize = 20;

/// In-memory history capacity (records); oldest are dropped first.
pub const HISTORY_MEMORY_CAPACITY: usize = 500;

// ============================================================================
// Range Checks
// ============================================================================

/// Breakdown thresholds above this are flagged as suspicious (kV).
///
/// Standard test cells with a 2.5 mm gap rarely exceed 100 kV.
pub const BREAKDOWN_SUSPICIOUS_KV: f64 = 100.0;

/// CO limits above this are flagged as suspicious (ppm).
pub const CO_SUSPICIOUS_PPM: f64 = 5_000.0;
