//! Error types for Swatch operations.
//!
//! This module provides the main error type [`SwatchError`] which wraps
//! the error conditions of loading style files, plus the narrower
//! [`LookupError`] and [`MaterializeError`] returned by store accessors.

use std::io;

use thiserror::Error;

use swatch_core::{identifier::KeyPathError, value::ValueKind};
use swatch_parser::error::ParseError;

/// The main error type for Swatch operations.
///
/// # Diagnostic Variants
///
/// The `Parse` variant keeps the source text next to the structured
/// diagnostics so a front end can render snippets.
#[derive(Debug, Error)]
pub enum SwatchError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Parse { err: ParseError, src: String },

    #[error("no style named `{name}` in the resource bundle")]
    StyleNotFound { name: String },

    #[error(transparent)]
    Lookup(#[from] LookupError),

    #[error(transparent)]
    Materialize(#[from] MaterializeError),
}

impl SwatchError {
    /// Create a new `Parse` error with the associated source code.
    pub fn new_parse_error(err: ParseError, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }
}

/// Failure of a typed store lookup.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LookupError {
    #[error(transparent)]
    InvalidPath(#[from] KeyPathError),

    #[error("undefined key `{path}`")]
    UndefinedKey { path: String },

    #[error("`{path}` is a {found}, not a {expected}")]
    TypeMismatch {
        path: String,
        expected: ValueKind,
        found: ValueKind,
    },

    #[error("`{path}` = {value} is out of range: {reason}")]
    OutOfRange {
        path: String,
        value: f64,
        reason: &'static str,
    },
}

/// Failure to turn a descriptor into a runtime object.
#[derive(Debug, Error)]
pub enum MaterializeError {
    #[error("failed to load image `{name}`: {source}")]
    ImageLoad {
        name: String,
        #[source]
        source: io::Error,
    },
}
