mod app;
mod spec;
mod sweep;

pub use app::{AppError, AppResult};
pub use spec::SpecError;
pub use sweep::SweepError;
