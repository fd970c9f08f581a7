use thiserror::Error;

use super::{SpecError, SweepError};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
    #[error("CLI error: {source}")]
    Clap {
        #[from]
        source: clap::Error,
    },
    #[error("JSON error: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },
    #[error("TOML error: {source}")]
    Toml {
        #[from]
        source: toml::de::Error,
    },
    #[error("Specification error: {0}")]
    Spec(#[from] SpecError),
    #[error("Sweep error: {0}")]
    Sweep(#[from] SweepError),
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn spec<E>(error: E) -> Self
    where
        E: Into<SpecError>,
    {
        error.into().into()
    }
}
