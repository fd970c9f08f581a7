use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Metric name under which the load generator reports the summed achieved
/// producer throughput in MB/s.
pub const MB_PER_SEC_SUM: &str = "mbPerSecSum";

/// Flat record of metrics parsed from the previous test's output. The engine
/// only reads it while deciding the next step; it never retains it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Feedback {
    #[serde(flatten)]
    metrics: BTreeMap<String, f64>,
}

impl Feedback {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_metric(mut self, name: &str, value: f64) -> Self {
        self.metrics.insert(name.to_owned(), value);
        self
    }

    pub fn metric(&self, name: &str) -> Option<f64> {
        self.metrics.get(name).copied()
    }

    /// Achieved aggregate producer rate, defaulting to 0 when the load
    /// generator reported nothing.
    pub fn sent_mb_per_sec(&self) -> f64 {
        self.metric(MB_PER_SEC_SUM).unwrap_or(0.0)
    }
}
