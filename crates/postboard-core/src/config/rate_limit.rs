//! Per-client rate limiting configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Token-bucket parameters shared by every client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Whether admission control is applied at all.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Bucket refill rate.
    #[serde(default = "default_rps")]
    pub requests_per_second: f64,
    /// Bucket capacity.
    #[serde(default = "default_burst")]
    pub burst: u32,
    /// How often stale buckets are swept, in seconds.
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_seconds: u64,
    /// A bucket unseen for this long is dropped by the sweep, in seconds.
    #[serde(default = "default_stale_after")]
    pub stale_after_seconds: u64,
}

impl RateLimitConfig {
    /// Sweep period as a [`Duration`].
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_seconds)
    }

    /// Staleness window as a [`Duration`].
    pub fn stale_after(&self) -> Duration {
        Duration::from_secs(self.stale_after_seconds)
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            requests_per_second: default_rps(),
            burst: default_burst(),
            sweep_interval_seconds: default_sweep_interval(),
            stale_after_seconds: default_stale_after(),
        }
    }
}

fn default_enabled() -> bool {
    true
}

fn default_rps() -> f64 {
    2.0
}

fn default_burst() -> u32 {
    4
}

fn default_sweep_interval() -> u64 {
    60
}

fn default_stale_after() -> u64 {
    180
}
