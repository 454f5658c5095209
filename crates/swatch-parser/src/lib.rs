//! # Swatch Parser
//!
//! Parser for Swatch style files. A style file assigns typed values to keys,
//! optionally nested in named groups:
//!
//! ```text
//! // Colors and fonts for the title bar
//! title {
//!     font = FONT(Avenir-Heavy, 18)
//!     color = %(244, 248, 251)
//!     frame = R(0, 0, @screen.width, 44)
//! }
//! ```
//!
//! Parsing runs in three steps:
//!
//! 1. **Tokenize** - classify each line as a group opening, a group closing
//!    or an assignment
//! 2. **Structure** - track open groups and build full key paths
//! 3. **Literals** - parse each value, evaluating numeric expressions and
//!    resolving `@variables`
//!
//! The result is a [`Stylesheet`]: the file's assignments in order, not yet
//! merged anywhere.
//!
//! ## Usage
//!
//! ```
//! # use swatch_parser::{parse, NoBindings, error::ParseError};
//! # use swatch_core::{identifier::KeyPath, value::RawValue};
//!
//! fn main() -> Result<(), ParseError> {
//!     let source = "
//!         screen {
//!             width = #(320)
//!         }
//!         half = #(@screen.width / 2)
//!     ";
//!
//!     let sheet = parse(source, &NoBindings)?;
//!     let half = KeyPath::parse("half").unwrap();
//!     assert_eq!(sheet.get(&half), Some(&RawValue::Number(160.0)));
//!     Ok(())
//! }
//! ```

pub mod error;
mod expr;
pub mod functions;
mod lexer;
mod literal;
mod parser;
mod resolve;
mod span;
mod stylesheet;
mod tokens;

pub use functions::FunctionTable;
pub use resolve::{Bindings, NoBindings};
pub use span::{Span, Spanned};
pub use stylesheet::{Assignment, Stylesheet};

use error::ParseError;

/// Parse a style file with the standard function table.
///
/// Variables that the file does not assign itself are looked up in
/// `bindings`.
pub fn parse(source: &str, bindings: &dyn Bindings) -> Result<Stylesheet, ParseError> {
    parse_with_functions(source, bindings, &FunctionTable::standard())
}

/// Parse a style file with a caller-supplied function table.
pub fn parse_with_functions(
    source: &str,
    bindings: &dyn Bindings,
    functions: &FunctionTable,
) -> Result<Stylesheet, ParseError> {
    // Step 1: Tokenize
    let lines = lexer::tokenize(source)?;

    // Steps 2 and 3: Structure and literals
    parser::build_stylesheet(&lines, bindings, functions)
}

/// Evaluate a single numeric expression such as `@screen.width / 2`.
///
/// # Example
///
/// ```
/// # use swatch_parser::{evaluate, FunctionTable, NoBindings};
/// let value = evaluate("floor(100 / 3)", &NoBindings, &FunctionTable::standard()).unwrap();
/// assert_eq!(value, 33.0);
/// ```
pub fn evaluate(
    expression: &str,
    bindings: &dyn Bindings,
    functions: &FunctionTable,
) -> Result<f64, ParseError> {
    let local = Stylesheet::new();
    let scope = resolve::Scope::new(&local, bindings, None);
    let trimmed = expression.trim();
    let start = expression.len() - expression.trim_start().len();
    let text = Spanned::new(trimmed, Span::new(start..start + trimmed.len()));
    Ok(expr::evaluate_text(text, &scope, functions)?)
}
