//! Core library for the `ksweep` CLI.
//!
//! This crate provides the internal building blocks used by the binary: CLI
//! argument types, test-specification parsing, and the deterministic sweep
//! engine that enumerates performance-test configurations. The primary
//! user-facing interface is the `ksweep` command-line application; library
//! APIs may evolve as the CLI grows.
pub mod args;
pub mod entry;
pub mod error;
pub mod logger;
pub mod spec;
pub mod sweep;
