use std::path::PathBuf;
use thiserror::Error;

/// Configuration-time failures: unreadable or malformed specification files,
/// invalid parameter grids, and skip conditions that cannot be compiled.
/// None of these are recoverable; they abort the run before any test starts.
#[derive(Debug, Error)]
pub enum SpecError {
    #[error("Failed to read test specification '{path}': {source}")]
    ReadSpec {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse TOML specification '{path}': {source}")]
    ParseToml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("Failed to parse JSON specification '{path}': {source}")]
    ParseJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Unsupported specification extension '{ext}'. Use .toml or .json.")]
    UnsupportedExtension { ext: String },
    #[error("Specification file must have .toml or .json extension.")]
    MissingExtension,
    #[error("Parameter '{name}' has no candidate values.")]
    EmptyDimension { name: String },
    #[error("Required parameter '{name}' is missing from the grid.")]
    MissingDimension { name: String },
    #[error("Parameter '{dimension}' has an invalid candidate value: {value}")]
    InvalidDimensionValue { dimension: String, value: String },
    #[error("depletion approximate_timeout_hours must be between 1 and {max}, got {hours}.")]
    InvalidDepletionTimeout { hours: i64, max: i64 },
    #[error("Unable to parse skip condition fragment: {fragment}")]
    MalformedSkipCondition { fragment: String },
    #[error("Skip condition references unknown metric '{name}'.")]
    UnknownMetric { name: String },
}
