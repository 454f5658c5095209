//! Numeric expressions.
//!
//! Every numeric argument of a literal (`#(100 / 2.5)`,
//! `R(0, 0, @screen.width - 20, 44)`) is an expression. Evaluation is three
//! steps: [`scan`] turns the text into tokens with winnow, [`ExprParser`]
//! builds a tree by recursive descent, and [`evaluate`] folds the tree to an
//! `f64`.
//!
//! Precedence, tightest first: unary `-`/`+`, then `*` `/`, then `+` `-`.
//! Binary operators are left-associative. Division by zero is not an error;
//! it yields an infinity or NaN like any other float division.

use winnow::{
    Parser as _,
    ascii::{digit0, digit1, multispace0},
    combinator::{alt, opt, preceded},
    error::ModalResult,
    stream::{LocatingSlice, Location},
    token::{one_of, take_while},
};

use swatch_core::{identifier::KeyPath, value::RawValue};

use crate::{
    error::{Diagnostic, ErrorCode, Result},
    functions::FunctionTable,
    resolve::Scope,
    span::{Span, Spanned},
    tokens::{PositionedToken, Token},
};

type Input<'a> = LocatingSlice<&'a str>;

/// Deepest allowed nesting of parentheses and unary operators.
const MAX_DEPTH: usize = 64;

/// Unsigned decimal number: `12`, `12.`, `.5`, `2.5e-3`.
///
/// Signs are operators, so `1-2` scans as three tokens.
fn number_text<'a>(input: &mut Input<'a>) -> ModalResult<&'a str> {
    (
        alt(((digit1, opt(('.', digit0))).void(), ('.', digit1).void())),
        opt((one_of(['e', 'E']), opt(one_of(['+', '-'])), digit1)),
    )
        .take()
        .parse_next(input)
}

fn number<'a>(input: &mut Input<'a>) -> ModalResult<Token<'a>> {
    number_text
        .try_map(str::parse::<f64>)
        .map(Token::Number)
        .parse_next(input)
}

fn identifier<'a>(input: &mut Input<'a>) -> ModalResult<Token<'a>> {
    (
        one_of(|c: char| c.is_ascii_alphabetic() || c == '_'),
        take_while(0.., |c: char| c.is_ascii_alphanumeric() || c == '_'),
    )
        .take()
        .map(Token::Identifier)
        .parse_next(input)
}

/// `@` and the dotted path after it; the path is validated by the parser.
fn variable<'a>(input: &mut Input<'a>) -> ModalResult<Token<'a>> {
    preceded(
        '@',
        take_while(0.., |c: char| c.is_ascii_alphanumeric() || matches!(c, '_' | '.')),
    )
    .map(Token::Variable)
    .parse_next(input)
}

fn punctuation<'a>(input: &mut Input<'a>) -> ModalResult<Token<'a>> {
    alt((
        '+'.value(Token::Plus),
        '-'.value(Token::Minus),
        '*'.value(Token::Star),
        '/'.value(Token::Slash),
        '('.value(Token::LeftParen),
        ')'.value(Token::RightParen),
        ','.value(Token::Comma),
    ))
    .parse_next(input)
}

/// Split expression text into tokens. `offset` is the position of `text`
/// in the file, so token spans are file offsets.
pub(crate) fn scan(text: &str, offset: usize) -> Result<Vec<PositionedToken<'_>>> {
    let mut input = Input::new(text);
    let mut tokens = Vec::new();

    loop {
        let _: ModalResult<&str> = multispace0.parse_next(&mut input);
        if input.is_empty() {
            return Ok(tokens);
        }

        let start = input.current_token_start();
        match alt((number, identifier, variable, punctuation)).parse_next(&mut input) {
            Ok(token) => {
                let end = input.current_token_start();
                tokens.push(PositionedToken::new(
                    token,
                    Span::new(start..end).shift(offset),
                ));
            }
            Err(_) => {
                let ch = text[start..].chars().next().unwrap_or(' ');
                let span = Span::new(start..start + ch.len_utf8()).shift(offset);
                return Err(
                    Diagnostic::error(format!("unexpected character `{ch}` in expression"))
                        .with_code(ErrorCode::E200)
                        .with_label(span, "not part of an expression")
                        .with_help(
                            "expressions use numbers, `+ - * /`, parentheses, functions and `@variables`",
                        ),
                );
            }
        }
    }
}

/// The value of `text` if it is a plain unsigned number and nothing else.
pub(crate) fn plain_number(text: &str) -> Option<f64> {
    number_text
        .parse(Input::new(text))
        .ok()
        .and_then(|text| text.parse().ok())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl BinaryOp {
    fn apply(self, lhs: f64, rhs: f64) -> f64 {
        match self {
            BinaryOp::Add => lhs + rhs,
            BinaryOp::Subtract => lhs - rhs,
            BinaryOp::Multiply => lhs * rhs,
            BinaryOp::Divide => lhs / rhs,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ExprKind {
    Number(f64),
    Variable(KeyPath),
    /// A bare name such as `pi`.
    Constant(String),
    Negate(Box<Expr>),
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Call {
        name: Spanned<String>,
        args: Vec<Expr>,
    },
}

pub(crate) type Expr = Spanned<ExprKind>;

/// Recursive-descent parser over scanned tokens.
struct ExprParser<'t, 'src> {
    tokens: &'t [PositionedToken<'src>],
    position: usize,
    /// Span of the whole expression text.
    whole: Span,
    depth: usize,
}

impl<'t, 'src> ExprParser<'t, 'src> {
    fn new(tokens: &'t [PositionedToken<'src>], whole: Span) -> Self {
        Self {
            tokens,
            position: 0,
            whole,
            depth: 0,
        }
    }

    fn parse(mut self) -> Result<Expr> {
        let expr = self.expression()?;
        match self.peek() {
            None => Ok(expr),
            Some(extra) => Err(Diagnostic::error(format!(
                "unexpected `{}` after expression",
                extra.token
            ))
            .with_code(ErrorCode::E201)
            .with_label(extra.span, "expected the end of the expression")),
        }
    }

    fn peek(&self) -> Option<&'t PositionedToken<'src>> {
        self.tokens.get(self.position)
    }

    fn advance(&mut self) -> Option<&'t PositionedToken<'src>> {
        let token = self.tokens.get(self.position)?;
        self.position += 1;
        Some(token)
    }

    /// Consume the next token if it is `expected`.
    fn eat(&mut self, expected: &Token<'_>) -> Option<Span> {
        match self.peek() {
            Some(next) if next.token == *expected => {
                self.position += 1;
                Some(next.span)
            }
            _ => None,
        }
    }

    fn enter(&mut self, span: Span) -> Result<()> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(Diagnostic::error("expression is nested too deeply")
                .with_code(ErrorCode::E201)
                .with_label(span, format!("more than {MAX_DEPTH} levels deep")));
        }
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    fn end_of_input(&self) -> Diagnostic {
        let end = Span::new(self.whole.end()..self.whole.end());
        let message = if self.tokens.is_empty() {
            "expected an expression"
        } else {
            "expression ends unexpectedly"
        };
        Diagnostic::error(message)
            .with_code(ErrorCode::E201)
            .with_label(self.whole.union(end), "incomplete expression")
    }

    /// `term (('+' | '-') term)*`
    fn expression(&mut self) -> Result<Expr> {
        let mut lhs = self.term()?;
        loop {
            let op = match self.peek().map(|next| &next.token) {
                Some(Token::Plus) => BinaryOp::Add,
                Some(Token::Minus) => BinaryOp::Subtract,
                _ => return Ok(lhs),
            };
            self.position += 1;
            let rhs = self.term()?;
            lhs = binary(op, lhs, rhs);
        }
    }

    /// `unary (('*' | '/') unary)*`
    fn term(&mut self) -> Result<Expr> {
        let mut lhs = self.unary()?;
        loop {
            let op = match self.peek().map(|next| &next.token) {
                Some(Token::Star) => BinaryOp::Multiply,
                Some(Token::Slash) => BinaryOp::Divide,
                _ => return Ok(lhs),
            };
            self.position += 1;
            let rhs = self.unary()?;
            lhs = binary(op, lhs, rhs);
        }
    }

    /// `('-' | '+') unary | primary`
    fn unary(&mut self) -> Result<Expr> {
        let Some(next) = self.peek() else {
            return Err(self.end_of_input());
        };
        let negate = match next.token {
            Token::Minus => true,
            Token::Plus => false,
            _ => return self.primary(),
        };
        self.position += 1;

        self.enter(next.span)?;
        let operand = self.unary()?;
        self.leave();

        let span = next.span.union(operand.span());
        if negate {
            Ok(Spanned::new(ExprKind::Negate(Box::new(operand)), span))
        } else {
            Ok(Spanned::new(operand.into_inner(), span))
        }
    }

    fn primary(&mut self) -> Result<Expr> {
        let Some(PositionedToken { token, span }) = self.advance() else {
            return Err(self.end_of_input());
        };
        let span = *span;

        match token {
            Token::Number(number) => Ok(Spanned::new(ExprKind::Number(*number), span)),
            Token::Variable(text) => {
                let path = Scope::parse_path(text, span)?;
                Ok(Spanned::new(ExprKind::Variable(path), span))
            }
            Token::Identifier(name) => {
                let Some(open) = self.eat(&Token::LeftParen) else {
                    return Ok(Spanned::new(ExprKind::Constant((*name).to_string()), span));
                };
                self.enter(open)?;
                let (args, close) = self.arguments(open)?;
                self.leave();
                Ok(Spanned::new(
                    ExprKind::Call {
                        name: Spanned::new((*name).to_string(), span),
                        args,
                    },
                    span.union(close),
                ))
            }
            Token::LeftParen => {
                self.enter(span)?;
                let inner = self.expression()?;
                self.leave();
                let close = self.expect_close(span)?;
                Ok(Spanned::new(inner.into_inner(), span.union(close)))
            }
            other => Err(Diagnostic::error(format!("unexpected `{other}` in expression"))
                .with_code(ErrorCode::E201)
                .with_label(span, "expected a number, name, variable or `(`")),
        }
    }

    /// Arguments after a call's `(`, up to and including the `)`.
    fn arguments(&mut self, open: Span) -> Result<(Vec<Expr>, Span)> {
        let mut args = Vec::new();
        if let Some(close) = self.eat(&Token::RightParen) {
            return Ok((args, close));
        }
        loop {
            args.push(self.expression()?);
            if self.eat(&Token::Comma).is_none() {
                return Ok((args, self.expect_close(open)?));
            }
        }
    }

    fn expect_close(&mut self, open: Span) -> Result<Span> {
        if let Some(close) = self.eat(&Token::RightParen) {
            return Ok(close);
        }
        let diagnostic = match self.peek() {
            Some(next) => Diagnostic::error(format!("expected `)`, found `{}`", next.token))
                .with_label(next.span, "expected `)`"),
            None => Diagnostic::error("unclosed parenthesis")
                .with_label(Span::new(self.whole.end()..self.whole.end()), "expected `)`"),
        };
        Err(diagnostic
            .with_code(ErrorCode::E201)
            .with_secondary_label(open, "opened here"))
    }
}

fn binary(op: BinaryOp, lhs: Expr, rhs: Expr) -> Expr {
    let span = lhs.span().union(rhs.span());
    Spanned::new(
        ExprKind::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        },
        span,
    )
}

/// Parse expression text located at `text.span()` in the file.
pub(crate) fn parse(text: Spanned<&str>) -> Result<Expr> {
    let tokens = scan(text.inner(), text.span().start())?;
    ExprParser::new(&tokens, text.span()).parse()
}

/// Fold an expression tree to a number.
pub(crate) fn evaluate(expr: &Expr, scope: &Scope<'_>, functions: &FunctionTable) -> Result<f64> {
    match expr.inner() {
        ExprKind::Number(number) => Ok(*number),
        ExprKind::Variable(path) => match scope.resolve(path, expr.span())? {
            RawValue::Number(number) => Ok(*number),
            other => Err(Diagnostic::error(format!(
                "variable `@{path}` is a {}, not a number",
                other.kind()
            ))
            .with_code(ErrorCode::E204)
            .with_label(expr.span(), format!("this is a {}", other.kind()))
            .with_help("only number values can be used in expressions")),
        },
        ExprKind::Constant(name) => functions.constant(name).ok_or_else(|| {
            let diagnostic = Diagnostic::error(format!("unknown name `{name}`"))
                .with_code(ErrorCode::E202)
                .with_label(expr.span(), "not a known constant");
            if functions.function(name).is_some() {
                diagnostic.with_help(format!("`{name}` is a function; call it as `{name}(...)`"))
            } else {
                diagnostic.with_help("variables start with `@`, e.g. `@title.size`")
            }
        }),
        ExprKind::Negate(operand) => Ok(-evaluate(operand, scope, functions)?),
        ExprKind::Binary { op, lhs, rhs } => {
            let lhs = evaluate(lhs, scope, functions)?;
            let rhs = evaluate(rhs, scope, functions)?;
            Ok(op.apply(lhs, rhs))
        }
        ExprKind::Call { name, args } => {
            let Some((arity, function)) = functions.function(name.inner()) else {
                return Err(
                    Diagnostic::error(format!("unknown function `{}`", name.inner()))
                        .with_code(ErrorCode::E202)
                        .with_label(name.span(), "not a known function"),
                );
            };
            if !arity.accepts(args.len()) {
                return Err(Diagnostic::error(format!(
                    "`{}` takes {arity}, found {}",
                    name.inner(),
                    args.len()
                ))
                .with_code(ErrorCode::E203)
                .with_label(expr.span(), "wrong number of arguments"));
            }
            let values = args
                .iter()
                .map(|arg| evaluate(arg, scope, functions))
                .collect::<Result<Vec<_>>>()?;
            Ok(function(&values))
        }
    }
}

/// Parse and evaluate expression text in one step.
pub(crate) fn evaluate_text(
    text: Spanned<&str>,
    scope: &Scope<'_>,
    functions: &FunctionTable,
) -> Result<f64> {
    evaluate(&parse(text)?, scope, functions)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use float_cmp::assert_approx_eq;
    use swatch_core::value::ColorSpec;

    use super::*;
    use crate::{error::ErrorKind, resolve::NoBindings, stylesheet::Stylesheet};

    fn eval_with(text: &str, bindings: &HashMap<KeyPath, RawValue>) -> Result<f64> {
        let local = Stylesheet::new();
        let scope = Scope::new(&local, bindings, None);
        evaluate_text(
            Spanned::new(text, Span::new(0..text.len())),
            &scope,
            &FunctionTable::standard(),
        )
    }

    fn eval(text: &str) -> f64 {
        eval_with(text, &HashMap::new()).expect("expression should evaluate")
    }

    fn eval_err(text: &str) -> Diagnostic {
        let local = Stylesheet::new();
        let scope = Scope::new(&local, &NoBindings, None);
        evaluate_text(
            Spanned::new(text, Span::new(0..text.len())),
            &scope,
            &FunctionTable::standard(),
        )
        .expect_err("expression should fail")
    }

    #[test]
    fn test_scan_tokens() {
        let tokens: Vec<Token<'_>> = scan("floor(@a.b * 2.5e1)", 0)
            .unwrap()
            .into_iter()
            .map(|t| t.token)
            .collect();

        assert_eq!(
            tokens,
            vec![
                Token::Identifier("floor"),
                Token::LeftParen,
                Token::Variable("a.b"),
                Token::Star,
                Token::Number(25.0),
                Token::RightParen,
            ]
        );
    }

    #[test]
    fn test_scan_minus_is_an_operator() {
        let tokens: Vec<Token<'_>> = scan("1-2", 0).unwrap().into_iter().map(|t| t.token).collect();
        assert_eq!(
            tokens,
            vec![Token::Number(1.0), Token::Minus, Token::Number(2.0)]
        );
    }

    #[test]
    fn test_scan_spans_are_offset() {
        let tokens = scan(" 10 + x", 20).unwrap();
        assert_eq!(tokens[0].span.range(), 21..23);
        assert_eq!(tokens[2].span.range(), 26..27);
    }

    #[test]
    fn test_number_forms() {
        assert_approx_eq!(f64, eval("12"), 12.0);
        assert_approx_eq!(f64, eval("12.5"), 12.5);
        assert_approx_eq!(f64, eval("12."), 12.0);
        assert_approx_eq!(f64, eval(".5"), 0.5);
        assert_approx_eq!(f64, eval("2.5e-3"), 0.0025);
        assert_approx_eq!(f64, eval("1E3"), 1000.0);
    }

    #[test]
    fn test_precedence_and_associativity() {
        assert_approx_eq!(f64, eval("100 / 2.5"), 40.0);
        assert_approx_eq!(f64, eval("2 + 3 * 4"), 14.0);
        assert_approx_eq!(f64, eval("(2 + 3) * 4"), 20.0);
        assert_approx_eq!(f64, eval("10 - 4 - 3"), 3.0);
        assert_approx_eq!(f64, eval("64 / 4 / 2"), 8.0);
        assert_approx_eq!(f64, eval("-2 * -3"), 6.0);
        assert_approx_eq!(f64, eval("--4"), 4.0);
        assert_approx_eq!(f64, eval("+4 - -1"), 5.0);
        assert_approx_eq!(f64, eval("-(1 + 2) * 2"), -6.0);
    }

    #[test]
    fn test_functions_and_constants() {
        assert_approx_eq!(f64, eval("floor(7 / 2)"), 3.0);
        assert_approx_eq!(f64, eval("max(1, 5, 3) + min(4, 2)"), 7.0);
        assert_approx_eq!(f64, eval("pow(2, 3 + 1)"), 16.0);
        assert_approx_eq!(f64, eval("round(pi * 100)"), 314.0);
        assert_approx_eq!(f64, eval("e"), std::f64::consts::E);
    }

    #[test]
    fn test_division_by_zero_is_not_an_error() {
        assert!(eval("1 / 0").is_infinite());
        assert!(eval("0 / 0").is_nan());
    }

    #[test]
    fn test_variables() {
        let bindings = HashMap::from([
            (KeyPath::parse("screen.width").unwrap(), RawValue::Number(320.0)),
            (KeyPath::parse("tint").unwrap(), RawValue::Color(ColorSpec::gray(10))),
        ]);

        assert_approx_eq!(
            f64,
            eval_with("@screen.width / 2 - 10", &bindings).unwrap(),
            150.0
        );

        let err = eval_with("@tint * 2", &bindings).unwrap_err();
        assert_eq!(err.code(), Some(ErrorCode::E204));
        assert_eq!(err.kind(), Some(ErrorKind::Evaluation));

        let err = eval_with("@screen.height", &bindings).unwrap_err();
        assert_eq!(err.code(), Some(ErrorCode::E300));
    }

    #[test]
    fn test_errors() {
        assert_eq!(eval_err("").code(), Some(ErrorCode::E201));
        assert_eq!(eval_err("3 +").code(), Some(ErrorCode::E201));
        assert_eq!(eval_err("(1 + 2").code(), Some(ErrorCode::E201));
        assert_eq!(eval_err("1 2").code(), Some(ErrorCode::E201));
        assert_eq!(eval_err("3 $ 4").code(), Some(ErrorCode::E200));
        assert_eq!(eval_err("flor(2)").code(), Some(ErrorCode::E202));
        assert_eq!(eval_err("width").code(), Some(ErrorCode::E202));
        assert_eq!(eval_err("floor(1, 2)").code(), Some(ErrorCode::E203));
        assert_eq!(eval_err("max()").code(), Some(ErrorCode::E203));
        assert_eq!(eval_err("@").code(), Some(ErrorCode::E301));
        assert_eq!(eval_err("@a..b").code(), Some(ErrorCode::E301));
    }

    #[test]
    fn test_unexpected_character_span() {
        let err = eval_err("3 $ 4");
        assert_eq!(err.primary_span(), Some(Span::new(2..3)));
    }

    #[test]
    fn test_nesting_limit() {
        let deep = format!("{}1{}", "(".repeat(MAX_DEPTH + 1), ")".repeat(MAX_DEPTH + 1));
        assert_eq!(eval_err(&deep).code(), Some(ErrorCode::E201));

        let shallow = format!("{}1{}", "(".repeat(10), ")".repeat(10));
        assert_approx_eq!(f64, eval(&shallow), 1.0);
    }

    #[test]
    fn test_plain_number() {
        assert_eq!(plain_number("244"), Some(244.0));
        assert_eq!(plain_number("0.5"), Some(0.5));
        assert_eq!(plain_number("-1"), None);
        assert_eq!(plain_number("1 + 1"), None);
        assert_eq!(plain_number("noise"), None);
        assert_eq!(plain_number(""), None);
    }
}

#[cfg(test)]
mod proptest_tests {
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    use super::*;
    use crate::{resolve::NoBindings, stylesheet::Stylesheet};

    fn eval(text: &str) -> f64 {
        let local = Stylesheet::new();
        let scope = Scope::new(&local, &NoBindings, None);
        evaluate_text(
            Spanned::new(text, Span::new(0..text.len())),
            &scope,
            &FunctionTable::standard(),
        )
        .expect("generated expression should evaluate")
    }

    proptest! {
        #[test]
        fn formatted_numbers_evaluate_to_themselves(value in 0.0f64..1.0e9) {
            prop_assert_eq!(eval(&value.to_string()), value);
        }

        #[test]
        fn mixed_operators_follow_precedence(a in -1000i32..1000, b in -1000i32..1000, c in 1i32..1000) {
            let (a, b, c) = (f64::from(a), f64::from(b), f64::from(c));
            let text = format!("{a} + {b} * {c} - {a} / {c}");
            prop_assert!(approx_eq!(f64, eval(&text), a + b * c - a / c, ulps = 4));
        }

        #[test]
        fn subtraction_is_left_associative(a in -1000i32..1000, b in -1000i32..1000, c in -1000i32..1000) {
            let (a, b, c) = (f64::from(a), f64::from(b), f64::from(c));
            prop_assert_eq!(eval(&format!("{a} - {b} - {c}")), (a - b) - c);
        }

        #[test]
        fn parentheses_override_precedence(a in -1000i32..1000, b in -1000i32..1000, c in -1000i32..1000) {
            let (a, b, c) = (f64::from(a), f64::from(b), f64::from(c));
            prop_assert_eq!(eval(&format!("({a} + {b}) * {c}")), (a + b) * c);
        }
    }
}
