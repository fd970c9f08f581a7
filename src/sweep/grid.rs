use serde::{Deserialize, Serialize};

/// Dimension name that drives skip-ahead and series-id minting.
pub const THROUGHPUT_DIMENSION: &str = "cluster_throughput_mb_per_sec";
pub const NUM_PRODUCERS_DIMENSION: &str = "num_producers";
pub const RECORD_SIZE_DIMENSION: &str = "record_size_byte";
pub const DURATION_DIMENSION: &str = "duration_sec";
pub const CONSUMER_GROUPS_DIMENSION: &str = "consumer_groups";

/// One candidate value of a grid dimension. Dimensions the engine does not
/// interpret (partition counts, client properties, ...) ride along as
/// `Other` and are passed through to the materialized parameters untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Int(i64),
    Float(f64),
    Text(String),
    Groups(ConsumerGroups),
    Other(serde_json::Value),
}

impl ParamValue {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            ParamValue::Int(value) => Some(*value),
            ParamValue::Float(_)
            | ParamValue::Text(_)
            | ParamValue::Groups(_)
            | ParamValue::Other(_) => None,
        }
    }

    pub fn as_groups(&self) -> Option<ConsumerGroups> {
        match self {
            ParamValue::Groups(groups) => Some(*groups),
            ParamValue::Int(_)
            | ParamValue::Float(_)
            | ParamValue::Text(_)
            | ParamValue::Other(_) => None,
        }
    }

    /// Erases the value back into plain JSON for passthrough output.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be represented as JSON (e.g. a
    /// non-finite float).
    pub fn to_json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}

/// Shape of one consumer-group dimension candidate: how many groups to run
/// and how many members each group has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConsumerGroups {
    pub num_groups: i64,
    pub size: i64,
}

/// One sweep dimension: a name and its ordered, non-empty candidate list.
#[derive(Debug, Clone, PartialEq)]
pub struct Dimension {
    pub name: String,
    pub values: Vec<ParamValue>,
}

/// Ordered parameter grid. The first dimension is the least significant
/// (fastest varying); the last is the most significant. The ordering is
/// captured once at validation time so that no mapping iteration order is
/// ever relied upon.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterGrid {
    dimensions: Vec<Dimension>,
    throughput_pos: usize,
}

impl ParameterGrid {
    pub(crate) fn new(dimensions: Vec<Dimension>, throughput_pos: usize) -> Self {
        Self {
            dimensions,
            throughput_pos,
        }
    }

    pub fn dimensions(&self) -> &[Dimension] {
        &self.dimensions
    }

    pub fn len(&self) -> usize {
        self.dimensions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dimensions.is_empty()
    }

    pub fn dimension(&self, position: usize) -> Option<&Dimension> {
        self.dimensions.get(position)
    }

    /// Position of the throughput dimension in significance order.
    pub fn throughput_position(&self) -> usize {
        self.throughput_pos
    }

    /// Exact number of grid combinations, saturating on overflow.
    pub fn combination_count(&self) -> u64 {
        self.dimensions
            .iter()
            .map(|dim| dim.values.len() as u64)
            .fold(1u64, u64::saturating_mul)
    }

    /// Replaces every candidate of one dimension with a single repeated
    /// value, keeping the candidate count (and thus every index) intact.
    pub(crate) fn override_dimension(&mut self, name: &str, value: ParamValue) {
        for dim in &mut self.dimensions {
            if dim.name == name {
                dim.values = vec![value.clone(); dim.values.len()];
            }
        }
    }
}

/// Cursor into the grid: one slot per dimension, in significance order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestIndex {
    slots: Vec<usize>,
}

impl TestIndex {
    /// All-zero index covering every dimension of the grid.
    pub fn zeroed(grid: &ParameterGrid) -> Self {
        Self {
            slots: vec![0; grid.len()],
        }
    }

    pub fn slot(&self, position: usize) -> Option<usize> {
        self.slots.get(position).copied()
    }

    pub(crate) fn set_slot(&mut self, position: usize, value: usize) {
        if let Some(slot) = self.slots.get_mut(position) {
            *slot = value;
        }
    }

    pub fn slots(&self) -> &[usize] {
        &self.slots
    }
}
