//! Run-level warnings that do not stop validation.

use std::io::{self, Write};

use tracing::debug;

use crate::palette::{Tone, paint};

/// Aggregates warnings for a lint run.
#[derive(Debug, Default)]
pub struct Diagnostics {
    /// Collected warning messages.
    warnings: Vec<String>,
    /// Whether warnings are printed in color.
    use_color: bool,
    /// Suppress printing; warnings are still recorded.
    quiet: bool,
}

impl Diagnostics {
    /// Create a new diagnostics collector.
    pub(crate) fn new(use_color: bool) -> Self {
        Self {
            warnings: Vec::new(),
            use_color,
            quiet: false,
        }
    }

    /// A collector that records without printing.
    #[cfg(test)]
    pub(crate) fn silent() -> Self {
        Self {
            quiet: true,
            ..Self::default()
        }
    }

    /// Record a warning and print it immediately to stderr.
    pub(crate) fn warn(&mut self, message: impl Into<String>) {
        self.warn_to(&mut io::stderr().lock(), message.into());
    }

    /// Record a warning, printing one line to `out` unless quiet.
    fn warn_to<W: Write>(&mut self, out: &mut W, message: String) {
        debug!(%message, "run-level warning");
        if !self.quiet {
            let line = paint(&format!("⚠ {message}"), Tone::Warning, self.use_color);
            if writeln!(out, "{line}").is_err() {
                debug!("stderr closed; warning not printed");
            }
        }
        self.warnings.push(message);
    }

    /// Warnings recorded so far.
    #[cfg(test)]
    pub(crate) fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Print a warning summary when warnings were emitted.
    pub(crate) fn print_warning_summary(&self) {
        if self.warnings.is_empty() || self.quiet {
            return;
        }

        eprintln!(
            "{}",
            paint(
                &format!("Completed with {} warning(s).", self.warnings.len()),
                Tone::Warning,
                self.use_color
            )
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_warning_prints_one_plain_line() {
        let mut diagnostics = Diagnostics::new(false);
        let mut out = Vec::new();

        diagnostics.warn_to(&mut out, "Could not load message catalog m.json".to_string());

        let text = String::from_utf8(out).expect("utf8");
        assert_eq!(text, "⚠ Could not load message catalog m.json\n");
        assert!(!text.contains('\u{1b}'));
        assert_eq!(diagnostics.warnings(), ["Could not load message catalog m.json"]);
    }

    #[test]
    fn silent_collector_records_without_printing() {
        let mut diagnostics = Diagnostics::silent();
        let mut out = Vec::new();

        diagnostics.warn_to(&mut out, "catalog empty".to_string());

        assert!(out.is_empty());
        assert_eq!(diagnostics.warnings().len(), 1);
    }
}
