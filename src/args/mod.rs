//! CLI argument types.
mod cli;
mod types;

pub use cli::{Command, DepletionArgs, PlanArgs, SweepArgs};
pub use types::PlanFormat;
