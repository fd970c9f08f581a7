use clap::ValueEnum;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, ValueEnum, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PlanFormat {
    /// Pretty-printed JSON array of all configurations
    Json,
    /// One JSON object per line
    Jsonl,
    /// Only the number of configurations
    Count,
}
