//! Diagnostic collection for builders
//!
//! Nothing in this crate aborts on bad input. Builders skip what they cannot place and record a
//! `Diagnostic` for the offending line instead; the caller decides whether a list of diagnostics
//! should fail a larger workflow.
//!
//! ## Codes
//!
//! 1. **structure**: a token in a position the grammar forbids
//! 2. **duplicate-concept**: two concepts share a signature
//! 3. **malformed-table**: a row's cell count differs from its header's
//! 4. **step-syntax**: an argument delimiter was never closed
//! 5. **unresolved-parameter**: a dynamic argument names no table column / concept parameter

use serde::Serialize;
use std::fmt;

pub const CODE_STRUCTURE: &str = "structure";
pub const CODE_DUPLICATE_CONCEPT: &str = "duplicate-concept";
pub const CODE_MALFORMED_TABLE: &str = "malformed-table";
pub const CODE_STEP_SYNTAX: &str = "step-syntax";
pub const CODE_UNRESOLVED_PARAMETER: &str = "unresolved-parameter";

/// Diagnostic severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum DiagnosticSeverity {
    Error,
    Warning,
}

impl fmt::Display for DiagnosticSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticSeverity::Error => write!(f, "error"),
            DiagnosticSeverity::Warning => write!(f, "warning"),
        }
    }
}

/// A problem tied to one source line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub line_number: usize,
    pub severity: DiagnosticSeverity,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl Diagnostic {
    pub fn new(line_number: usize, severity: DiagnosticSeverity, message: String) -> Self {
        Self {
            line_number,
            severity,
            message,
            code: None,
        }
    }

    pub fn error(line_number: usize, message: impl Into<String>) -> Self {
        Self::new(line_number, DiagnosticSeverity::Error, message.into())
    }

    pub fn warning(line_number: usize, message: impl Into<String>) -> Self {
        Self::new(line_number, DiagnosticSeverity::Warning, message.into())
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == DiagnosticSeverity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [line {}]: {}",
            self.severity, self.line_number, self.message
        )?;
        if let Some(code) = &self.code {
            write!(f, " ({})", code)?;
        }
        Ok(())
    }
}

/// True when any diagnostic in the slice is an error
pub fn has_errors(diagnostics: &[Diagnostic]) -> bool {
    diagnostics.iter().any(Diagnostic::is_error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_with_code() {
        let diag = Diagnostic::error(3, "Step found before the specification heading")
            .with_code(CODE_STRUCTURE);
        assert_eq!(
            diag.to_string(),
            "error [line 3]: Step found before the specification heading (structure)"
        );
    }

    #[test]
    fn test_has_errors_ignores_warnings() {
        let warnings = vec![Diagnostic::warning(1, "unused")];
        assert!(!has_errors(&warnings));

        let mixed = vec![Diagnostic::warning(1, "unused"), Diagnostic::error(2, "bad")];
        assert!(has_errors(&mixed));
    }
}
