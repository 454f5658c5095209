//! Severity levels for diagnostics.

use std::fmt;

/// How serious a diagnostic is.
///
/// An [`Error`](Severity::Error) makes the whole load fail; a
/// [`Warning`](Severity::Warning) is reported but the file still loads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// The file cannot be loaded until this is fixed.
    Error,

    /// Suspicious but legal, such as assigning the same key twice.
    Warning,
}

impl Severity {
    /// Returns `true` if this is an error severity.
    pub fn is_error(&self) -> bool {
        matches!(self, Severity::Error)
    }

    /// Returns `true` if this is a warning severity.
    pub fn is_warning(&self) -> bool {
        matches!(self, Severity::Warning)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}
