//! Test-specification loading and validation.
mod loader;
mod parse;
pub mod types;

#[cfg(test)]
mod tests;

pub use loader::load_spec;

#[cfg(test)]
pub(crate) use loader::load_spec_file;
#[cfg(test)]
pub(crate) use parse::validate_spec;
