//! CLI entry point for the preset linter.

use std::process::ExitCode;

use presetlint::run;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            error.report();
            error.exit_code()
        }
    }
}
