//! The core diagnostic type.

use std::fmt;

use crate::{
    error::{ErrorKind, Severity, error_code::ErrorCode, label::Label},
    span::Span,
};

/// A single error or warning with source locations.
///
/// ```text
/// error[E102]: `S(...)` takes 2 arguments, found 3
///   --> theme.style:4:12
///    |
///  4 |     size = S(10, 20, 30)
///    |            ^^^^^^^^^^^^^ expected `S(width, height)`
/// ```
#[derive(Debug, Clone)]
pub struct Diagnostic {
    severity: Severity,
    code: Option<ErrorCode>,
    message: String,
    labels: Vec<Label>,
    help: Option<String>,
}

impl Diagnostic {
    /// Create an error diagnostic.
    ///
    /// # Example
    ///
    /// ```
    /// # use swatch_parser::error::{Diagnostic, ErrorCode};
    /// # use swatch_parser::Span;
    ///
    /// let diag = Diagnostic::error("unknown function `flor`")
    ///     .with_code(ErrorCode::E202)
    ///     .with_label(Span::new(2..6), "not a known function")
    ///     .with_help("did you mean `floor`?");
    /// ```
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    /// A warning does not stop the file from loading.
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Warnings have no code.
    pub fn code(&self) -> Option<ErrorCode> {
        self.code
    }

    /// The category of the error code, if any.
    pub fn kind(&self) -> Option<ErrorKind> {
        self.code.map(|code| code.kind())
    }

    /// The one-line summary shown after `error[Exxx]:`.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Labels in the order they were added.
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// Span of the first primary label.
    pub fn primary_span(&self) -> Option<Span> {
        self.labels
            .iter()
            .find(|label| label.is_primary())
            .map(Label::span)
    }

    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    /// Set the error code.
    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = Some(code);
        self
    }

    /// Add a primary label to this diagnostic.
    pub fn with_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::primary(span, message));
        self
    }

    /// Point at related text, such as an earlier definition.
    pub fn with_secondary_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::secondary(span, message));
        self
    }

    /// Set the help text.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            code: None,
            message: message.into(),
            labels: Vec::new(),
            help: None,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // "error[E001]: message" or "warning: message"
        write!(f, "{}", self.severity)?;
        if let Some(code) = self.code {
            write!(f, "[{}]", code)?;
        }
        write!(f, ": {}", self.message)
    }
}

impl std::error::Error for Diagnostic {}
