//! Matching worker configuration.

use serde::{Deserialize, Serialize};

/// Saved-search matching worker configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerConfig {
    /// Whether the matching worker is enabled.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Interval in minutes between matching cycles.
    #[serde(default = "default_interval")]
    pub match_interval_minutes: u64,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            match_interval_minutes: default_interval(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_interval() -> u64 {
    5
}
