//! Diagnostic types for doc comment problems
//!
//! Ranges are relative to the comment text. [`DiagnosticPosition`] turns
//! node positions into file offsets; [`DiagnosticRenderer`] prints them.

mod position;
mod renderer;

pub use position::DiagnosticPosition;
pub use renderer::{DiagnosticRenderer, OutputFormat};

use serde::{Deserialize, Serialize};
use text_size::{TextRange, TextSize};

/// A problem found while parsing a comment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Stable kebab-case identifier, e.g. `unterminated-inline-tag`
    pub code: String,
    pub severity: Severity,
    pub message: String,
    /// Comment-relative range of the offending text
    pub range: Option<TextRange>,
}

/// Severity levels for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational messages
    Info,
    /// Hints for improvements
    Hint,
    /// Warnings that should be addressed
    Warning,
    /// Errors that must be fixed
    Error,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Hint => "hint",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

impl Diagnostic {
    /// Create a new diagnostic
    pub fn new(code: impl Into<String>, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            severity,
            message: message.into(),
            range: None,
        }
    }

    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(code, Severity::Error, message)
    }

    pub fn warning(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(code, Severity::Warning, message)
    }

    /// Attach the comment-relative range this diagnostic points at
    pub fn with_range(mut self, range: TextRange) -> Self {
        self.range = Some(range);
        self
    }

    pub fn start(&self) -> Option<TextSize> {
        self.range.map(|range| range.start())
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_orders_by_importance() {
        assert!(Severity::Error > Severity::Warning);
        assert!(Severity::Hint > Severity::Info);
    }

    #[test]
    fn diagnostic_serializes_with_lowercase_severity() {
        let diag = Diagnostic::error("bad-entity", "unknown entity")
            .with_range(TextRange::new(2.into(), 7.into()));
        let json = serde_json::to_value(&diag).unwrap();
        assert_eq!(json["severity"], "error");
        assert_eq!(json["code"], "bad-entity");
        assert_eq!(diag.start(), Some(TextSize::from(2)));
    }
}
