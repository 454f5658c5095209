//! Error codes for the Swatch diagnostic system.
//!
//! Codes are grouped by the stage that reports them:
//! - `E0xx` - Line structure
//! - `E1xx` - Value literals
//! - `E2xx` - Numeric expressions
//! - `E3xx` - Variable resolution

use std::fmt;

/// Broad category of a diagnostic, used by callers that only care whether a
/// file was malformed, failed to evaluate, or referenced a missing key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The text does not follow the style-file grammar.
    Syntax,
    /// A numeric expression could not be evaluated.
    Evaluation,
    /// A variable names a key that is not visible at that point.
    UndefinedKey,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Syntax => write!(f, "syntax error"),
            ErrorKind::Evaluation => write!(f, "evaluation error"),
            ErrorKind::UndefinedKey => write!(f, "undefined key"),
        }
    }
}

/// Error codes for categorizing diagnostic errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Line Errors (E0xx)
    // =========================================================================
    /// Malformed line.
    ///
    /// The line is not a group opening, a group closing or an assignment.
    E001,

    /// Opening brace not on the group's line.
    ///
    /// A group is written `name {` on one line; the brace cannot move to
    /// the next line.
    E002,

    /// Unexpected content after a brace.
    ///
    /// `}` must stand alone on its line, and nothing may follow `name {`.
    E003,

    /// Unbalanced group close.
    ///
    /// A `}` was found with no open group.
    E004,

    /// Unterminated group.
    ///
    /// The file ended while a group was still open.
    E005,

    /// Invalid key.
    ///
    /// Keys and group names are identifiers: `[A-Za-z_][A-Za-z0-9_]*`.
    E006,

    // =========================================================================
    // Literal Errors (E1xx)
    // =========================================================================
    /// Unknown literal.
    ///
    /// The value does not start with a known marker such as `#(` or `%(`.
    E100,

    /// Malformed literal.
    ///
    /// Missing or unbalanced parentheses around the literal's arguments.
    E101,

    /// Wrong number of literal arguments.
    E102,

    /// Invalid color component.
    ///
    /// Components are plain integers 0-255, alpha a plain number 0-1.
    E103,

    /// Unknown text style.
    ///
    /// A single-argument `FONT(...)` must name a text style.
    E104,

    /// Invalid name argument.
    ///
    /// Font and image names must be non-empty plain text.
    E105,

    // =========================================================================
    // Expression Errors (E2xx)
    // =========================================================================
    /// Unexpected character in an expression.
    E200,

    /// Malformed expression.
    ///
    /// The tokens do not form an expression, e.g. `3 +` or `(1`.
    E201,

    /// Unknown function or constant.
    E202,

    /// Wrong number of function arguments.
    E203,

    /// Non-numeric variable.
    ///
    /// A variable used inside an expression refers to a value that is not a
    /// number.
    E204,

    // =========================================================================
    // Resolution Errors (E3xx)
    // =========================================================================
    /// Undefined key.
    ///
    /// A variable refers to a path that is neither assigned earlier in the
    /// file nor already loaded.
    E300,

    /// Invalid variable path.
    ///
    /// The text after `@` is not a dotted sequence of identifiers.
    E301,
}

impl ErrorCode {
    /// Returns the numeric code as a string (e.g., "E001").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "E001",
            ErrorCode::E002 => "E002",
            ErrorCode::E003 => "E003",
            ErrorCode::E004 => "E004",
            ErrorCode::E005 => "E005",
            ErrorCode::E006 => "E006",
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            ErrorCode::E102 => "E102",
            ErrorCode::E103 => "E103",
            ErrorCode::E104 => "E104",
            ErrorCode::E105 => "E105",
            ErrorCode::E200 => "E200",
            ErrorCode::E201 => "E201",
            ErrorCode::E202 => "E202",
            ErrorCode::E203 => "E203",
            ErrorCode::E204 => "E204",
            ErrorCode::E300 => "E300",
            ErrorCode::E301 => "E301",
        }
    }

    /// Returns a short description of what this error code means.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "malformed line",
            ErrorCode::E002 => "opening brace not on the group line",
            ErrorCode::E003 => "unexpected content after brace",
            ErrorCode::E004 => "unbalanced group close",
            ErrorCode::E005 => "unterminated group",
            ErrorCode::E006 => "invalid key",
            ErrorCode::E100 => "unknown literal",
            ErrorCode::E101 => "malformed literal",
            ErrorCode::E102 => "wrong number of literal arguments",
            ErrorCode::E103 => "invalid color component",
            ErrorCode::E104 => "unknown text style",
            ErrorCode::E105 => "invalid name argument",
            ErrorCode::E200 => "unexpected character in expression",
            ErrorCode::E201 => "malformed expression",
            ErrorCode::E202 => "unknown function",
            ErrorCode::E203 => "wrong number of function arguments",
            ErrorCode::E204 => "non-numeric variable",
            ErrorCode::E300 => "undefined key",
            ErrorCode::E301 => "invalid variable path",
        }
    }

    /// The category this code belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ErrorCode::E200
            | ErrorCode::E201
            | ErrorCode::E202
            | ErrorCode::E203
            | ErrorCode::E204 => ErrorKind::Evaluation,
            ErrorCode::E300 => ErrorKind::UndefinedKey,
            _ => ErrorKind::Syntax,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
