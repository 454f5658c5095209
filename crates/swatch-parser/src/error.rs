//! Diagnostics reported while reading a style file.
//!
//! Every problem the parser finds becomes a [`Diagnostic`]: a message with
//! an optional [`ErrorCode`], labeled spans pointing into the source, and
//! optional help text. The parser keeps going after a bad line, so one
//! [`ParseError`] can carry many diagnostics.
//!
//! # Example
//!
//! ```
//! # use swatch_parser::error::{Diagnostic, ErrorCode, ErrorKind};
//! # use swatch_parser::Span;
//!
//! let diag = Diagnostic::error("undefined key `screen.width`")
//!     .with_code(ErrorCode::E300)
//!     .with_label(Span::new(14..27), "not defined before this line")
//!     .with_help("variables use the full key path, e.g. `@screen.width`");
//!
//! assert_eq!(diag.kind(), Some(ErrorKind::UndefinedKey));
//! ```

mod collector;
mod diagnostic;
mod error_code;
mod label;
mod parse_error;
mod severity;

pub(crate) use collector::DiagnosticCollector;
pub(crate) use parse_error::Result;

pub use diagnostic::Diagnostic;
pub use error_code::{ErrorCode, ErrorKind};
pub use label::Label;
pub use parse_error::ParseError;
pub use severity::Severity;
