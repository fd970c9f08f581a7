use serde::Deserialize;

use crate::sweep::DepletionConfig;

/// Raw, unvalidated test-specification document. Dimension order inside
/// `parameters` is load-bearing (first key varies fastest), so the map type
/// must preserve insertion order.
#[derive(Debug, Deserialize)]
pub struct SpecFile {
    pub parameters: serde_json::Map<String, serde_json::Value>,
    pub skip_remaining_throughput: Option<serde_json::Value>,
    pub depletion_configuration: Option<DepletionConfig>,
}
