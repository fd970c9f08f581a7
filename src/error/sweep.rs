use thiserror::Error;

/// Engine-invariant failures raised while a sweep is in flight. Normal
/// exhaustion of the grid is not an error; it is reported through
/// `StepOutcome::Completed`.
#[derive(Debug, Error)]
pub enum SweepError {
    #[error("Sweep exceeded the step limit of {limit} without terminating.")]
    DidNotTerminate { limit: u64 },
    #[error("Session is already completed; no further steps are valid.")]
    SessionCompleted,
    #[error("No test is in flight; advance the session first.")]
    NoCurrentTest,
    #[error("Test specification has no depletion_configuration section.")]
    DepletionNotConfigured,
    #[error("Grid invariant violated: {detail}")]
    GridInvariant { detail: String },
}
