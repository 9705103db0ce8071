//! Error types for the preset linter.

use std::{
    env::{self, VarError},
    io::{self, IsTerminal},
    path::PathBuf,
    process::ExitCode,
    result::Result as StdResult,
};

use thiserror::Error;
use toml::de::Error as TomlError;

use crate::palette::{Tone, paint};

/// Result type for linter operations.
pub type Result<T> = StdResult<T, Error>;

/// Errors that can occur while running the CLI.
#[derive(Debug, Error)]
pub enum Error {
    /// The preset document could not be read.
    #[error("Failed to load preset {path}: {source}")]
    DocumentRead {
        /// Path to the preset document.
        path: PathBuf,
        /// Underlying IO error.
        source: io::Error,
    },
    /// The preset document could not be parsed.
    #[error("Failed to load preset {path}: {message}")]
    DocumentParse {
        /// Path to the preset document.
        path: PathBuf,
        /// Parser error message.
        message: String,
    },
    /// The preset document parsed but does not have the expected layout.
    #[error("Malformed preset {path}: {message}")]
    DocumentShape {
        /// Path to the preset document.
        path: PathBuf,
        /// Description of the structural problem.
        message: String,
    },
    /// The preset document could not be serialized.
    #[error("Failed to serialize preset {path}: {message}")]
    DocumentSerialize {
        /// Path to the preset document.
        path: PathBuf,
        /// Serializer error message.
        message: String,
    },
    /// The preset document could not be written.
    #[error("Failed to write preset {path}: {source}")]
    DocumentWrite {
        /// Path to the preset document.
        path: PathBuf,
        /// Underlying IO error.
        source: io::Error,
    },
    /// The configuration file could not be read.
    #[error("Failed to read config at {path}: {source}")]
    ConfigRead {
        /// Path to the config file.
        path: PathBuf,
        /// Underlying IO error.
        source: io::Error,
    },
    /// The configuration file could not be parsed.
    #[error("Failed to parse config at {path}: {source}")]
    ConfigParse {
        /// Path to the config file.
        path: PathBuf,
        /// Underlying parse error.
        source: TomlError,
    },
    /// The similarity threshold is outside the accepted range.
    #[error("Invalid threshold {value}: expected a value in (0.0, 1.0]")]
    InvalidThreshold {
        /// Rejected threshold value.
        value: f32,
    },
    /// A configured path could not be expanded.
    #[error("Invalid path in config: {path}: {source}")]
    PathExpansion {
        /// Input path that failed to expand.
        path: String,
        /// Underlying expansion error.
        source: shellexpand::LookupError<VarError>,
    },
    /// Writing progress output failed.
    #[error("Failed to write output: {source}")]
    Output {
        /// Underlying IO error.
        source: io::Error,
    },
    /// An interactive prompt was interrupted or canceled.
    #[error("Prompt canceled; no changes were saved.")]
    PromptCanceled,
    /// An interactive prompt failed.
    #[error("Prompt failed: {message}")]
    PromptFailed {
        /// Error message describing the prompt failure.
        message: String,
    },
}

impl Error {
    /// Map errors to exit codes for CLI termination.
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::ConfigRead { .. }
            | Self::ConfigParse { .. }
            | Self::InvalidThreshold { .. }
            | Self::PathExpansion { .. } => ExitCode::from(2),
            Self::PromptCanceled => ExitCode::from(130),
            _ => ExitCode::from(1),
        }
    }

    /// Print the error to stderr, in red when stderr is a terminal.
    pub fn report(&self) {
        let use_color = io::stderr().is_terminal() && env::var_os("NO_COLOR").is_none();
        eprintln!("{}", paint(&format!("❌ {self}"), Tone::Error, use_color));
    }
}

impl From<io::Error> for Error {
    fn from(source: io::Error) -> Self {
        Self::Output { source }
    }
}
