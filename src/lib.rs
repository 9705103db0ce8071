#![warn(missing_docs)]
//! Library support for the channel preset linter.

/// Message catalog loading.
mod catalog;
/// Command-line interface wiring and dispatch.
mod cli;
/// Command implementations.
mod commands;
/// Configuration loading and validation.
mod config;
/// Styled line output for progress and reports.
mod console;
/// Common diagnostics and warning aggregation.
mod diagnostics;
/// Preset document loading and saving.
mod document;
/// Error handling for the crate.
mod error;
/// Validation notes and per-channel records.
mod issue;
/// Color palette and styling for CLI output.
mod palette;
/// Path expansion and normalization utilities.
mod paths;
/// Yes/no confirmation sources.
mod prompt;
/// Legal field sets and enumerations.
mod schema;
/// Fuzzy fix suggestions.
mod suggest;
/// Preset traversal and summary reporting.
mod traverse;
/// Per-channel validation and repair.
mod validator;

/// Invariant checks over generated presets.
#[cfg(test)]
mod properties;
/// Test fixtures and scripted prompters.
#[cfg(test)]
mod testutil;

pub use crate::error::{Error, Result};

/// Run the CLI, returning a structured error on failure.
pub fn run() -> Result<()> {
    cli::run()
}
