//! Rendering [`SwatchError`] through miette.
//!
//! Parse failures carry every diagnostic of the style file together with
//! its source text; each diagnostic becomes its own miette report with a
//! snippet. Other errors become a single report with a `swatch::*` code.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceCode, SourceSpan};

use swatch::SwatchError;
use swatch_parser::error::{Diagnostic, Severity};

/// A report ready for a miette handler.
pub type Report<'a> = Box<dyn MietteDiagnostic + 'a>;

/// One style-file diagnostic paired with the text it points into.
pub struct DiagnosticAdapter<'a> {
    diag: &'a Diagnostic,
    src: &'a str,
}

impl<'a> DiagnosticAdapter<'a> {
    pub fn new(diag: &'a Diagnostic, src: &'a str) -> Self {
        Self { diag, src }
    }
}

impl fmt::Debug for DiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.diag, f)
    }
}

impl fmt::Display for DiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.diag.message())
    }
}

impl std::error::Error for DiagnosticAdapter<'_> {}

impl MietteDiagnostic for DiagnosticAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = self.diag.code()?;
        Some(Box::new(code))
    }

    fn severity(&self) -> Option<miette::Severity> {
        Some(match self.diag.severity() {
            Severity::Error => miette::Severity::Error,
            Severity::Warning => miette::Severity::Warning,
        })
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = self.diag.help()?;
        Some(Box::new(help))
    }

    fn source_code(&self) -> Option<&dyn SourceCode> {
        Some(&self.src as &dyn SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let labels = self.diag.labels();
        if labels.is_empty() {
            return None;
        }

        Some(Box::new(labels.iter().map(|label| {
            let span = SourceSpan::new(label.span().start().into(), label.span().len());
            let text = Some(label.message().to_string());
            if label.is_primary() {
                LabeledSpan::new_primary_with_span(text, span)
            } else {
                LabeledSpan::new_with_span(text, span)
            }
        })))
    }
}

/// A [`SwatchError`] that has no source location.
#[derive(Debug)]
pub struct ErrorAdapter<'a>(pub &'a SwatchError);

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(self.0)
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match self.0 {
            SwatchError::Io(_) => "swatch::io",
            SwatchError::Parse { .. } => return None,
            SwatchError::StyleNotFound { .. } => "swatch::style_not_found",
            SwatchError::Lookup(_) => "swatch::lookup",
            SwatchError::Materialize(_) => "swatch::materialize",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self.0 {
            SwatchError::StyleNotFound { .. } => Some(Box::new(
                "add the directory holding the style to `resources.directories` in the configuration",
            )),
            _ => None,
        }
    }
}

/// One report per parse diagnostic, or a single report for other errors.
pub fn to_reportables(err: &SwatchError) -> Vec<Report<'_>> {
    match err {
        SwatchError::Parse { err: parse_err, src } => parse_err
            .diagnostics()
            .iter()
            .map(|diag| Box::new(DiagnosticAdapter::new(diag, src)) as Report<'_>)
            .collect(),
        _ => vec![Box::new(ErrorAdapter(err)) as Report<'_>],
    }
}
