//! Evaluation configuration

use serde::{Deserialize, Serialize};

/// Largest array length a function may produce.
pub const MAX_ARRAY_LENGTH: usize = i32::MAX as usize - 15;

/// What to do when a map constructor sees the same key twice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MapKeyDedupPolicy {
    /// Keep the key at its first position with the value of its last occurrence
    #[default]
    LastWin,
    /// Fail the row with a duplicate key error
    Exception,
}

impl std::str::FromStr for MapKeyDedupPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "last_win" => Ok(Self::LastWin),
            "exception" => Ok(Self::Exception),
            other => Err(format!(
                "unknown map key dedup policy '{}', expected last_win or exception",
                other
            )),
        }
    }
}

/// Configuration captured by a call at resolution time.
///
/// It is `Copy` so every bound call owns its settings; changing the
/// configuration requires re-resolving the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FunctionConfig {
    /// Strict mode: out-of-range lookups fail instead of returning null
    pub ansi_enabled: bool,
    /// `size(null)` returns -1 instead of null (ignored in ANSI mode)
    pub legacy_size_of_null: bool,
    /// Duplicate key handling for map constructors
    pub map_key_dedup_policy: MapKeyDedupPolicy,
    /// Upper bound on generated array lengths
    pub max_array_length: usize,
}

impl Default for FunctionConfig {
    fn default() -> Self {
        Self {
            ansi_enabled: false,
            legacy_size_of_null: true,
            map_key_dedup_policy: MapKeyDedupPolicy::LastWin,
            max_array_length: MAX_ARRAY_LENGTH,
        }
    }
}

impl FunctionConfig {
    /// Create the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable ANSI mode
    pub fn with_ansi(mut self, enabled: bool) -> Self {
        self.ansi_enabled = enabled;
        self
    }

    /// Set the legacy `size(null)` behaviour
    pub fn with_legacy_size_of_null(mut self, enabled: bool) -> Self {
        self.legacy_size_of_null = enabled;
        self
    }

    /// Set the duplicate map key policy
    pub fn with_map_key_dedup_policy(mut self, policy: MapKeyDedupPolicy) -> Self {
        self.map_key_dedup_policy = policy;
        self
    }

    /// Set the maximum generated array length
    pub fn with_max_array_length(mut self, limit: usize) -> Self {
        self.max_array_length = limit;
        self
    }
}
