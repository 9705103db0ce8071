//! Color palette and styling for CLI output.
//!
//! Output is tagged with a [`Tone`] and only turned into ANSI escapes here,
//! so plain-text consumers get clean lines.

use owo_colors::{OwoColorize, Style};

use crate::issue::Severity;

/// Semantic style of a piece of output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// Unstyled text.
    Plain,
    /// Failures and schema violations.
    Error,
    /// Successful checks and applied fixes.
    Success,
    /// Suspicious but non-fatal findings.
    Warning,
    /// Channel breadcrumbs, file paths and other identifiers.
    Identifier,
    /// Section headings.
    Heading,
    /// Warning headings.
    WarningHeading,
}

impl Tone {
    /// The tone used when reporting an issue of the given severity.
    pub fn for_severity(severity: Severity) -> Self {
        match severity {
            Severity::Fixed => Self::Success,
            Severity::Warning => Self::Warning,
            Severity::Error => Self::Error,
        }
    }

    /// The terminal style for this tone.
    fn style(self) -> Style {
        match self {
            Self::Plain => Style::new(),
            Self::Error => Style::new().red(),
            Self::Success => Style::new().green(),
            Self::Warning => Style::new().yellow(),
            Self::Identifier => Style::new().cyan(),
            Self::Heading => Style::new().bold(),
            Self::WarningHeading => Style::new().yellow().bold(),
        }
    }
}

/// Format text in a tone, emitting escapes only when color is enabled.
pub fn paint(text: &str, tone: Tone, use_color: bool) -> String {
    if use_color && tone != Tone::Plain {
        text.style(tone.style()).to_string()
    } else {
        text.to_string()
    }
}
