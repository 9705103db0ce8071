//! CLI parsing, logging setup, and command dispatch.

use std::{
    io::{self, IsTerminal},
    path::PathBuf,
};

use clap::{Parser, ValueEnum};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::{commands, config::Overrides, error::Result};

/// Parsed command line arguments.
#[derive(Debug, Parser)]
#[command(
    name = "presetlint",
    version,
    about = "Lint and interactively repair channel presets"
)]
struct Cli {
    /// Preset document to validate (JSON or YAML).
    #[arg(long)]
    preset: Option<PathBuf>,
    /// Message catalog whose top-level keys are the legal message keys.
    #[arg(long)]
    catalog: Option<PathBuf>,
    /// Minimum similarity for a fix suggestion, in (0, 1].
    #[arg(long)]
    threshold: Option<f32>,
    /// Config file to read instead of ./presetlint.toml.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Control colored output.
    #[arg(long, value_enum, default_value = "auto")]
    color: ColorMode,
    /// Enable debug logging on stderr.
    #[arg(long)]
    verbose: bool,
}

/// Supported color output modes.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum ColorMode {
    /// Only colorize when stdout is a TTY.
    Auto,
    /// Always colorize output.
    Always,
    /// Never colorize output.
    Never,
}

impl ColorMode {
    /// Convert a CLI color mode into a color choice.
    fn into_choice(self) -> commands::ColorChoice {
        match self {
            Self::Auto => commands::ColorChoice::Auto,
            Self::Always => commands::ColorChoice::Always,
            Self::Never => commands::ColorChoice::Never,
        }
    }
}

/// Install the stderr log subscriber.
///
/// `--verbose` forces debug output for this crate; otherwise `RUST_LOG` is
/// honored and defaults to warnings only.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("presetlint=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_target(false)
        .try_init();
    if installed.is_err() {
        debug!("log subscriber already installed");
    }
}

/// Run the linter with the parsed arguments.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let overrides = Overrides {
        config: cli.config,
        preset: cli.preset,
        catalog: cli.catalog,
        threshold: cli.threshold,
    };
    commands::lint::run(cli.color.into_choice(), overrides)
}
