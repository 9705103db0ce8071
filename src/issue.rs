//! Issue records collected while validating channels.

use std::fmt;

/// Severity of a recorded issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// A repair the operator accepted; the document was changed.
    Fixed,
    /// Something suspicious that does not break the preset.
    Warning,
    /// A schema violation.
    Error,
}

/// One annotated note about a channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    /// How serious the note is.
    pub severity: Severity,
    /// Human-readable text, reported verbatim.
    pub message: String,
}

impl Issue {
    /// A successful repair.
    pub fn fixed(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Fixed,
            message: message.into(),
        }
    }

    /// A non-fatal oddity.
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
        }
    }

    /// A schema violation.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
        }
    }

    /// Whether this note records a change to the document.
    pub fn is_fix(&self) -> bool {
        self.severity == Severity::Fixed
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Issues found for one channel, keyed by its breadcrumb.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueRecord {
    /// Human-readable locator such as `Voice → lounge`.
    pub path: String,
    /// Notes in the order they were recorded.
    pub issues: Vec<Issue>,
}

impl IssueRecord {
    /// Whether any note records a repair.
    pub fn has_fixes(&self) -> bool {
        self.issues.iter().any(Issue::is_fix)
    }

    /// Whether any note is still unresolved.
    pub fn has_problems(&self) -> bool {
        self.issues.iter().any(|issue| !issue.is_fix())
    }

    /// Messages in recorded order.
    #[cfg(test)]
    pub(crate) fn messages(&self) -> impl Iterator<Item = &str> {
        self.issues.iter().map(|issue| issue.message.as_str())
    }
}

/// Build the breadcrumb shown for a channel.
pub fn breadcrumb(section: &str, channel: &str) -> String {
    format!("{section} → {channel}")
}
