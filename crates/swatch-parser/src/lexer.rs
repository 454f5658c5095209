//! Line tokenizer for style files.
//!
//! A style file is line oriented: after `//` comments and blank lines are
//! dropped, every remaining line is a group opening (`name {`), a group
//! closing (`}`) or an assignment (`key = literal`). [`tokenize`] classifies
//! each line and leaves the literal text raw for the literal parser.
//!
//! Errors are recovered per line, so one pass reports every malformed line.

use winnow::{
    Parser as _,
    ascii::space0,
    combinator::{alt, cut_err, eof, fail, opt},
    error::{ContextError, ErrMode, ModalResult},
    stream::{LocatingSlice, Location},
    token::{one_of, rest, take_till},
};

use swatch_core::identifier::is_identifier;

use crate::{
    error::{Diagnostic, DiagnosticCollector, ErrorCode, ParseError},
    span::{Span, Spanned},
    tokens::{Line, LineKind},
};

/// Rich diagnostic information for line errors.
///
/// Attached to winnow errors via `.context()`; the reported span runs from
/// `start` to the end of the line.
#[derive(Debug, Clone, PartialEq, Eq)]
struct LexerDiagnostic {
    code: ErrorCode,
    message: &'static str,
    help: Option<&'static str>,
    start: usize,
}

type Input<'a> = LocatingSlice<&'a str>;
type IResult<'a, O> = ModalResult<O, ContextError<LexerDiagnostic>>;

/// A key or group name: everything up to whitespace, `=`, `{` or `}`.
///
/// Validity is checked after the line is classified so a bad key gets its
/// own diagnostic.
fn key<'a>(input: &mut Input<'a>) -> IResult<'a, Spanned<&'a str>> {
    take_till(1.., |c: char| {
        c.is_whitespace() || matches!(c, '=' | '{' | '}')
    })
    .with_span()
    .map(|(text, range)| Spanned::new(text, Span::new(range)))
    .parse_next(input)
}

/// `}` alone on its line.
fn group_close<'a>(input: &mut Input<'a>) -> IResult<'a, LineKind<'a>> {
    let start = input.current_token_start();
    '}'.parse_next(input)?;
    cut_err((space0, eof))
        .context(LexerDiagnostic {
            code: ErrorCode::E003,
            message: "unexpected content after `}`",
            help: Some("a closing brace must be on a line of its own"),
            start,
        })
        .parse_next(input)?;
    Ok(LineKind::GroupClose)
}

/// A `{` that starts a line belongs to a group name on an earlier line.
fn stray_group_open<'a>(input: &mut Input<'a>) -> IResult<'a, LineKind<'a>> {
    let start = input.current_token_start();
    '{'.parse_next(input)?;
    cut_err(fail)
        .context(LexerDiagnostic {
            code: ErrorCode::E002,
            message: "opening brace must follow the group name on the same line",
            help: Some("write the group as `name {`"),
            start,
        })
        .parse_next(input)
}

/// `name {` or `key = literal`.
fn group_open_or_assignment<'a>(input: &mut Input<'a>) -> IResult<'a, LineKind<'a>> {
    let start = input.current_token_start();
    let key = key.parse_next(input)?;
    space0.parse_next(input)?;

    match opt(one_of(['=', '{'])).parse_next(input)? {
        Some('{') => {
            cut_err((space0, eof))
                .context(LexerDiagnostic {
                    code: ErrorCode::E003,
                    message: "unexpected content after `{`",
                    help: Some("put each assignment on its own line"),
                    start,
                })
                .parse_next(input)?;
            Ok(LineKind::GroupOpen { name: key })
        }
        Some(_) => {
            space0.parse_next(input)?;
            let literal = cut_err(rest.verify(|text: &str| !text.is_empty()).with_span())
                .context(LexerDiagnostic {
                    code: ErrorCode::E100,
                    message: "expected a value after `=`",
                    help: Some("values are literals such as `#(12)` or `%(0, 0, 0)`"),
                    start,
                })
                .map(|(text, range)| Spanned::new(text, Span::new(range)))
                .parse_next(input)?;
            Ok(LineKind::Assignment { key, literal })
        }
        None if input.is_empty() => cut_err(fail)
            .context(LexerDiagnostic {
                code: ErrorCode::E002,
                message: "expected `{` after group name",
                help: Some("a group's opening brace must be on the same line as its name"),
                start,
            })
            .parse_next(input),
        None => cut_err(fail)
            .context(LexerDiagnostic {
                code: ErrorCode::E001,
                message: "expected `=` or `{` after key",
                help: None,
                start,
            })
            .parse_next(input),
    }
}

fn line_kind<'a>(input: &mut Input<'a>) -> IResult<'a, LineKind<'a>> {
    alt((group_close, stray_group_open, group_open_or_assignment)).parse_next(input)
}

/// The part of a physical line before any `//` comment.
fn strip_comment(line: &str) -> &str {
    line.find("//").map_or(line, |index| &line[..index])
}

/// Lexer that accumulates lines and diagnostics.
struct Lexer<'a> {
    lines: Vec<Line<'a>>,
    diagnostics: DiagnosticCollector,
}

impl<'a> Lexer<'a> {
    fn new() -> Self {
        Self {
            lines: Vec::new(),
            diagnostics: DiagnosticCollector::new(),
        }
    }

    fn tokenize(&mut self, source: &'a str) {
        let (mut offset, body) = match source.strip_prefix('\u{feff}') {
            Some(body) => ('\u{feff}'.len_utf8(), body),
            None => (0, source),
        };

        for (index, physical) in body.split_inclusive('\n').enumerate() {
            let line_start = offset;
            offset += physical.len();

            let content = strip_comment(physical).trim_end();
            let text = content.trim_start();
            if text.is_empty() {
                continue;
            }

            let base = line_start + (content.len() - text.len());
            let span = Span::new(base..base + text.len());
            let mut input = Input::new(text);

            match line_kind(&mut input) {
                Ok(kind) => {
                    let line = Line::new(kind, span, index + 1);
                    if let Some(diagnostic) = Self::check_key(&line) {
                        self.diagnostics.emit(diagnostic);
                    } else {
                        self.lines.push(line);
                    }
                }
                Err(err) => self.diagnostics.emit(Self::convert_err_mode(err, span)),
            }
        }
    }

    fn finish(self) -> Result<Vec<Line<'a>>, ParseError> {
        self.diagnostics.finish().map(|_| self.lines)
    }

    /// Keys and group names must be plain identifiers.
    fn check_key(line: &Line<'_>) -> Option<Diagnostic> {
        let (key, what) = match &line.kind {
            LineKind::GroupOpen { name } => (name, "group name"),
            LineKind::Assignment { key, .. } => (key, "key"),
            LineKind::GroupClose => return None,
        };
        if is_identifier(key.inner()) {
            return None;
        }
        Some(
            Diagnostic::error(format!("invalid {what} `{}`", key.inner()))
                .with_code(ErrorCode::E006)
                .with_label(key.span(), "not an identifier")
                .with_help(
                    "names start with a letter or `_` and contain only letters, digits and `_`; \
                     use groups instead of dots",
                ),
        )
    }

    /// Convert a winnow error on the line at `line` into a diagnostic.
    ///
    /// Falls back to E001 (malformed line) over the whole line when no
    /// context was attached.
    fn convert_err_mode(err: ErrMode<ContextError<LexerDiagnostic>>, line: Span) -> Diagnostic {
        let context_error = match err {
            ErrMode::Backtrack(ctx) | ErrMode::Cut(ctx) => ctx,
            ErrMode::Incomplete(_) => ContextError::new(),
        };

        if let Some(LexerDiagnostic {
            code,
            message,
            help,
            start,
        }) = context_error.context().next()
        {
            let span = Span::new(line.start() + start..line.end());
            let mut diag = Diagnostic::error(*message)
                .with_code(*code)
                .with_label(span, code.description());
            if let Some(h) = help {
                diag = diag.with_help(*h);
            }
            return diag;
        }

        Diagnostic::error("malformed line")
            .with_code(ErrorCode::E001)
            .with_label(line, ErrorCode::E001.description())
            .with_help("expected `name {`, `}` or `key = value`")
    }
}

/// Classify every meaningful line of `source`.
///
/// # Returns
///
/// - `Ok(lines)` - every non-blank, non-comment line, in order
/// - `Err(ParseError)` - one diagnostic per malformed line
pub fn tokenize(source: &str) -> Result<Vec<Line<'_>>, ParseError> {
    let mut lexer = Lexer::new();
    lexer.tokenize(source);
    lexer.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<LineKind<'_>> {
        tokenize(source)
            .expect("source should tokenize")
            .into_iter()
            .map(|line| line.kind)
            .collect()
    }

    fn error_codes(source: &str) -> Vec<ErrorCode> {
        tokenize(source)
            .expect_err("source should fail")
            .diagnostics()
            .iter()
            .filter_map(|diag| diag.code())
            .collect()
    }

    #[test]
    fn test_assignment() {
        let lines = tokenize("width = #(100 / 2)").unwrap();
        assert_eq!(lines.len(), 1);

        let LineKind::Assignment { key, literal } = &lines[0].kind else {
            panic!("expected assignment, got {:?}", lines[0].kind);
        };
        assert_eq!(*key.inner(), "width");
        assert_eq!(key.span().range(), 0..5);
        assert_eq!(*literal.inner(), "#(100 / 2)");
        assert_eq!(literal.span().range(), 8..18);
    }

    #[test]
    fn test_group_lines() {
        assert_eq!(
            kinds("title {\n  font = FONT(Body)\n}\n"),
            vec![
                LineKind::GroupOpen {
                    name: Spanned::new("title", Span::default())
                },
                LineKind::Assignment {
                    key: Spanned::new("font", Span::default()),
                    literal: Spanned::new("FONT(Body)", Span::default()),
                },
                LineKind::GroupClose,
            ]
        );
    }

    #[test]
    fn test_spacing_is_flexible() {
        let kinds = kinds("title{\nwidth=#(1)\n\t}\t\n");
        assert_eq!(kinds.len(), 3);
        assert_eq!(kinds[2], LineKind::GroupClose);
    }

    #[test]
    fn test_comments_and_blank_lines_are_skipped() {
        let lines = tokenize("// header\n\n   \nwidth = #(1) // trailing\n// footer").unwrap();

        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].number, 4);
        let LineKind::Assignment { literal, .. } = &lines[0].kind else {
            panic!("expected assignment");
        };
        assert_eq!(*literal.inner(), "#(1)");
    }

    #[test]
    fn test_spans_are_file_offsets() {
        let source = "a {\n    b = #(2)\n}";
        let lines = tokenize(source).unwrap();

        let LineKind::Assignment { key, literal } = &lines[1].kind else {
            panic!("expected assignment");
        };
        assert_eq!(&source[key.span().range()], "b");
        assert_eq!(&source[literal.span().range()], "#(2)");
        assert_eq!(&source[lines[1].span.range()], "b = #(2)");
    }

    #[test]
    fn test_crlf_line_endings() {
        let kinds = kinds("a {\r\n  b = #(2)\r\n}\r\n");
        assert_eq!(kinds.len(), 3);
        assert!(matches!(
            &kinds[1],
            LineKind::Assignment { literal, .. } if *literal.inner() == "#(2)"
        ));
    }

    #[test]
    fn test_byte_order_mark() {
        let source = "\u{feff}width = #(1)";
        let lines = tokenize(source).unwrap();
        let LineKind::Assignment { key, .. } = &lines[0].kind else {
            panic!("expected assignment");
        };
        assert_eq!(&source[key.span().range()], "width");
    }

    #[test]
    fn test_brace_on_next_line() {
        assert_eq!(
            error_codes("title\n{\n}"),
            vec![ErrorCode::E002, ErrorCode::E002]
        );
    }

    #[test]
    fn test_content_after_close_brace() {
        assert_eq!(error_codes("a {\n} b = #(1)"), vec![ErrorCode::E003]);
    }

    #[test]
    fn test_content_after_open_brace() {
        assert_eq!(error_codes("a { b = #(1) }"), vec![ErrorCode::E003]);
    }

    #[test]
    fn test_missing_value() {
        assert_eq!(error_codes("width ="), vec![ErrorCode::E100]);
    }

    #[test]
    fn test_malformed_lines() {
        assert_eq!(error_codes("width #(1)"), vec![ErrorCode::E001]);
        assert_eq!(error_codes("= #(1)"), vec![ErrorCode::E001]);
    }

    #[test]
    fn test_invalid_keys() {
        assert_eq!(error_codes("view.width = #(1)"), vec![ErrorCode::E006]);
        assert_eq!(error_codes("2col = #(1)"), vec![ErrorCode::E006]);
        assert_eq!(error_codes("my-group {"), vec![ErrorCode::E006]);
    }

    #[test]
    fn test_reports_every_bad_line() {
        let err = tokenize("ok = #(1)\nbad line\nalso = #(2)\n} extra\n").unwrap_err();

        assert_eq!(err.diagnostics().len(), 2);
        assert_eq!(err.diagnostics()[0].code(), Some(ErrorCode::E001));
        assert_eq!(err.diagnostics()[1].code(), Some(ErrorCode::E003));
    }

    #[test]
    fn test_error_span_covers_rest_of_line() {
        let source = "a {\n  } trailing";
        let err = tokenize(source).unwrap_err();
        let span = err.diagnostics()[0].primary_span().unwrap();
        assert_eq!(&source[span.range()], "} trailing");
    }
}
