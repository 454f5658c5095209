//! The error type returned when a style file fails to parse.

use std::fmt;

use crate::error::{Diagnostic, ErrorKind};

/// Result of a single parsing step that stops at its first problem.
pub type Result<T> = std::result::Result<T, Diagnostic>;

/// Every diagnostic reported for one style file.
///
/// Holds at least one error; warnings found in the same pass ride along.
#[derive(Debug)]
pub struct ParseError {
    diagnostics: Vec<Diagnostic>,
}

impl ParseError {
    pub fn new(diagnostics: Vec<Diagnostic>) -> Self {
        Self { diagnostics }
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Iterate over the diagnostics with error severity.
    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|diagnostic| diagnostic.severity().is_error())
    }

    /// Category of the first error.
    pub fn kind(&self) -> Option<ErrorKind> {
        self.errors().find_map(Diagnostic::kind)
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(first) = self.errors().next().or(self.diagnostics.first()) {
            write!(f, "{}", first)?;
            if self.diagnostics.len() > 1 {
                write!(f, " (+{} more)", self.diagnostics.len() - 1)?;
            }
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {}

impl From<Diagnostic> for ParseError {
    fn from(diagnostic: Diagnostic) -> Self {
        Self {
            diagnostics: vec![diagnostic],
        }
    }
}

impl From<Vec<Diagnostic>> for ParseError {
    fn from(diagnostics: Vec<Diagnostic>) -> Self {
        Self { diagnostics }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_parse_error_from_diagnostic() {
        let err: ParseError = Diagnostic::error("undefined key")
            .with_code(ErrorCode::E300)
            .into();

        assert_eq!(err.diagnostics().len(), 1);
        assert_eq!(err.kind(), Some(ErrorKind::UndefinedKey));
    }

    #[test]
    fn test_parse_error_display_multiple() {
        let err: ParseError = vec![
            Diagnostic::error("first error"),
            Diagnostic::error("second error"),
            Diagnostic::error("third error"),
        ]
        .into();

        assert_eq!(err.to_string(), "error: first error (+2 more)");
    }

    #[test]
    fn test_parse_error_display_prefers_errors() {
        let err: ParseError = vec![
            Diagnostic::warning("duplicate key"),
            Diagnostic::error("unknown literal").with_code(ErrorCode::E100),
        ]
        .into();

        assert_eq!(err.to_string(), "error[E100]: unknown literal (+1 more)");
        assert_eq!(err.errors().count(), 1);
        assert_eq!(err.kind(), Some(ErrorKind::Syntax));
    }
}
