//! Backend performance counters (`GET /api/performance`)

use serde::{Deserialize, Serialize};

/// Cache and latency counters reported by the execution backend.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    /// Total upstream model calls
    #[serde(default)]
    pub api_calls: u64,
    /// Responses served from the backend cache
    #[serde(default)]
    pub cache_hits: u64,
    /// Responses that missed the cache
    #[serde(default)]
    pub cache_misses: u64,
    /// Mean upstream latency in seconds
    #[serde(default)]
    pub avg_response_time: f64,
    /// Hit rate as reported by the backend
    #[serde(default)]
    pub cache_hit_rate: f64,
}

impl PerformanceMetrics {
    /// Total cache lookups.
    #[must_use]
    pub const fn cache_lookups(&self) -> u64 {
        self.cache_hits + self.cache_misses
    }
}
