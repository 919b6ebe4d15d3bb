//! Command-line interface for fabrun.
//!
//! Dispatch targets for each top-level flag. Argument parsing lives in
//! `main.rs`.

/// Individual CLI command implementations.
pub mod commands;
