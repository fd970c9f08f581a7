use std::path::Path;

use crate::error::{AppError, AppResult, SpecError};
use crate::sweep::TestSpec;

use super::parse::validate_spec;
use super::types::SpecFile;

/// Loads and validates a test specification from a `.toml` or `.json` file.
///
/// # Errors
///
/// Returns an error when the file cannot be read or parsed, or when the
/// grid/skip condition fails validation.
pub fn load_spec(path: &Path) -> AppResult<TestSpec> {
    let file = load_spec_file(path)?;
    Ok(validate_spec(file)?)
}

pub(crate) fn load_spec_file(path: &Path) -> AppResult<SpecFile> {
    let content = std::fs::read_to_string(path).map_err(|err| {
        AppError::spec(SpecError::ReadSpec {
            path: path.to_path_buf(),
            source: err,
        })
    })?;
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("toml") => toml::from_str(&content).map_err(|err| {
            AppError::spec(SpecError::ParseToml {
                path: path.to_path_buf(),
                source: err,
            })
        }),
        Some("json") => serde_json::from_str(&content).map_err(|err| {
            AppError::spec(SpecError::ParseJson {
                path: path.to_path_buf(),
                source: err,
            })
        }),
        Some(ext) => Err(AppError::spec(SpecError::UnsupportedExtension {
            ext: ext.to_owned(),
        })),
        None => Err(AppError::spec(SpecError::MissingExtension)),
    }
}
