//! Token types shared by the line tokenizer and the expression evaluator.

use std::fmt;

use crate::span::{Span, Spanned};

/// The shape of one meaningful line of a style file.
#[derive(Debug, Clone, PartialEq)]
pub enum LineKind<'src> {
    /// `name {`
    GroupOpen { name: Spanned<&'src str> },
    /// `}`
    GroupClose,
    /// `key = literal`; the literal text is kept raw for the literal parser.
    Assignment {
        key: Spanned<&'src str>,
        literal: Spanned<&'src str>,
    },
}

impl LineKind<'_> {
    fn shift(self, offset: usize) -> Self {
        match self {
            LineKind::GroupOpen { name } => LineKind::GroupOpen {
                name: Spanned::new(*name.inner(), name.span().shift(offset)),
            },
            LineKind::GroupClose => LineKind::GroupClose,
            LineKind::Assignment { key, literal } => LineKind::Assignment {
                key: Spanned::new(*key.inner(), key.span().shift(offset)),
                literal: Spanned::new(*literal.inner(), literal.span().shift(offset)),
            },
        }
    }
}

/// A classified line with its position in the file.
#[derive(Debug, Clone, PartialEq)]
pub struct Line<'src> {
    pub kind: LineKind<'src>,
    /// Span of the line's text, comments and surrounding blanks excluded.
    pub span: Span,
    /// 1-based line number.
    pub number: usize,
}

impl<'src> Line<'src> {
    /// Build a line from a kind whose spans are relative to `span.start()`.
    pub(crate) fn new(kind: LineKind<'src>, span: Span, number: usize) -> Self {
        Self {
            kind: kind.shift(span.start()),
            span,
            number,
        }
    }
}

/// Tokens of a numeric expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Token<'src> {
    Number(f64),
    Identifier(&'src str),
    /// `@path`, without the `@`.
    Variable(&'src str),
    Plus,
    Minus,
    Star,
    Slash,
    LeftParen,
    RightParen,
    Comma,
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(number) => write!(f, "{number}"),
            Token::Identifier(name) => write!(f, "{name}"),
            Token::Variable(path) => write!(f, "@{path}"),
            Token::Plus => write!(f, "+"),
            Token::Minus => write!(f, "-"),
            Token::Star => write!(f, "*"),
            Token::Slash => write!(f, "/"),
            Token::LeftParen => write!(f, "("),
            Token::RightParen => write!(f, ")"),
            Token::Comma => write!(f, ","),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PositionedToken<'src> {
    pub token: Token<'src>,
    pub span: Span,
}

impl<'src> PositionedToken<'src> {
    pub fn new(token: Token<'src>, span: Span) -> Self {
        Self { token, span }
    }
}
