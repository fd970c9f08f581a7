//! Deterministic sweep engine: mixed-radix enumeration of a parameter grid
//! with saturation-aware skip-ahead.
mod condition;
mod feedback;
mod grid;
mod materialize;
mod odometer;
mod session;


pub use condition::{CondValue, EvalContext, Metric, SkipCondition};
pub use feedback::{Feedback, MB_PER_SEC_SUM};
pub use grid::{
    CONSUMER_GROUPS_DIMENSION, ConsumerGroups, DURATION_DIMENSION, Dimension,
    NUM_PRODUCERS_DIMENSION, ParamValue, ParameterGrid, RECORD_SIZE_DIMENSION,
    THROUGHPUT_DIMENSION, TestIndex,
};
pub use materialize::MaterializedParameters;
pub use session::{DepletionConfig, StepOutcome, SweepSession, TestSpec};
