//! Value literals: the text to the right of `=`.
//!
//! | Literal | Value |
//! |---|---|
//! | `#(expr)` | number |
//! | `FONT(name, size)`, `FONT(TextStyle)` | font |
//! | `%(r, g, b)`, `%(r, g, b, a)`, `%(gray)`, `%(image)` | color |
//! | `R(x, y, w, h)`, `S(w, h)`, `P(x, y)` | rect, size, point |
//! | `IMAGE(name)`, `IMAGE(name, top, left, bottom, right)` | image |
//! | `@key.path` | copy of an earlier value |
//!
//! Whitespace between a marker and its `(` and around arguments is ignored.
//! Arguments are split at commas outside nested parentheses, so
//! `#(max(1, 2))` has one argument.

use winnow::{
    Parser as _,
    ascii::space0,
    combinator::alt,
    error::ModalResult,
    stream::{LocatingSlice, Location},
};

use swatch_core::{
    geometry::{Insets, Point, Rect, Size},
    value::{ColorSpec, FontSpec, ImageSpec, RawValue, TextStyle},
};

use crate::{
    error::{Diagnostic, ErrorCode, Result},
    expr,
    functions::FunctionTable,
    resolve::Scope,
    span::{Span, Spanned},
};

type Input<'a> = LocatingSlice<&'a str>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Marker {
    Number,
    Font,
    Color,
    Rect,
    Size,
    Point,
    Image,
}

impl Marker {
    fn as_str(self) -> &'static str {
        match self {
            Marker::Number => "#",
            Marker::Font => "FONT",
            Marker::Color => "%",
            Marker::Rect => "R",
            Marker::Size => "S",
            Marker::Point => "P",
            Marker::Image => "IMAGE",
        }
    }

    /// The accepted argument lists, for help text.
    fn usage(self) -> &'static str {
        match self {
            Marker::Number => "`#(expression)`",
            Marker::Font => "`FONT(name, size)` or `FONT(TextStyle)`",
            Marker::Color => "`%(red, green, blue)`, `%(red, green, blue, alpha)`, `%(gray)` or `%(image)`",
            Marker::Rect => "`R(x, y, width, height)`",
            Marker::Size => "`S(width, height)`",
            Marker::Point => "`P(x, y)`",
            Marker::Image => "`IMAGE(name)` or `IMAGE(name, top, left, bottom, right)`",
        }
    }
}

fn marker(input: &mut Input<'_>) -> ModalResult<Marker> {
    alt((
        "#".value(Marker::Number),
        "%".value(Marker::Color),
        "FONT".value(Marker::Font),
        "IMAGE".value(Marker::Image),
        "R".value(Marker::Rect),
        "S".value(Marker::Size),
        "P".value(Marker::Point),
    ))
    .parse_next(input)
}

/// Marker, optional blanks, `(`; returns the offset just past the `(`.
fn opening<'a>(input: &mut Input<'a>) -> ModalResult<(Marker, usize)> {
    let marker = marker.parse_next(input)?;
    (space0, '(').parse_next(input)?;
    Ok((marker, input.current_token_start()))
}

/// Parses literal text against what is visible at its line.
pub(crate) struct LiteralParser<'a> {
    scope: &'a Scope<'a>,
    functions: &'a FunctionTable,
}

impl<'a> LiteralParser<'a> {
    pub fn new(scope: &'a Scope<'a>, functions: &'a FunctionTable) -> Self {
        Self { scope, functions }
    }

    pub fn parse(&self, literal: Spanned<&str>) -> Result<RawValue> {
        let text = *literal.inner();
        let span = literal.span();

        if let Some(path) = text.strip_prefix('@') {
            let path = Scope::parse_path(path.trim(), span)?;
            return self.scope.resolve(&path, span).cloned();
        }

        let mut input = Input::new(text);
        let Ok((marker, body_start)) = opening.parse_next(&mut input) else {
            return Err(unknown_literal(text, span));
        };
        let Some(body) = text[body_start..].strip_suffix(')') else {
            return Err(Diagnostic::error(format!(
                "`{}(...)` literal is missing its closing `)`",
                marker.as_str()
            ))
            .with_code(ErrorCode::E101)
            .with_label(span, "expected `)` at the end of the value")
            .with_help(format!("expected {}", marker.usage())));
        };

        let args = split_arguments(body, span.start() + body_start, marker, span)?;
        let call = Call { marker, args, span };

        match marker {
            Marker::Number => self.number(&call),
            Marker::Font => self.font(&call),
            Marker::Color => color(&call),
            Marker::Rect => {
                let [x, y, width, height] = self.numbers::<4>(&call)?;
                Ok(RawValue::Rect(Rect::new(x, y, width, height)))
            }
            Marker::Size => {
                let [width, height] = self.numbers::<2>(&call)?;
                Ok(RawValue::Size(Size::new(width, height)))
            }
            Marker::Point => {
                let [x, y] = self.numbers::<2>(&call)?;
                Ok(RawValue::Point(Point::new(x, y)))
            }
            Marker::Image => self.image(&call),
        }
    }

    fn evaluate(&self, arg: &Spanned<&str>) -> Result<f64> {
        expr::evaluate_text(arg.clone(), self.scope, self.functions)
    }

    /// Exactly `N` arguments, each evaluated as an expression.
    fn numbers<const N: usize>(&self, call: &Call<'_>) -> Result<[f64; N]> {
        call.expect_arity(&[N])?;
        let mut values = [0.0; N];
        for (value, arg) in values.iter_mut().zip(&call.args) {
            *value = self.evaluate(arg)?;
        }
        Ok(values)
    }

    fn number(&self, call: &Call<'_>) -> Result<RawValue> {
        let [value] = self.numbers::<1>(call)?;
        Ok(RawValue::Number(value))
    }

    fn font(&self, call: &Call<'_>) -> Result<RawValue> {
        call.expect_arity(&[1, 2])?;
        match call.args.as_slice() {
            [style] => style
                .inner()
                .parse::<TextStyle>()
                .map(|style| RawValue::Font(FontSpec::Preferred(style)))
                .map_err(|message| {
                    let styles: Vec<&str> = TextStyle::ALL.iter().map(|s| s.as_str()).collect();
                    Diagnostic::error(message)
                        .with_code(ErrorCode::E104)
                        .with_label(style.span(), "not a text style")
                        .with_help(format!(
                            "known text styles are {}; a named font also needs a size, e.g. `FONT({}, 17)`",
                            styles.join(", "),
                            style.inner()
                        ))
                }),
            [name, size] => {
                let name = plain_name(name, "font")?;
                let size = self.evaluate(size)?;
                Ok(RawValue::Font(FontSpec::named(name, size)))
            }
            _ => unreachable!("arity checked above"),
        }
    }

    fn image(&self, call: &Call<'_>) -> Result<RawValue> {
        call.expect_arity(&[1, 5])?;
        let name = plain_name(&call.args[0], "image")?;
        let image = ImageSpec::new(name);
        if call.args.len() == 1 {
            return Ok(RawValue::Image(image));
        }

        let mut edges = [0.0; 4];
        for (edge, arg) in edges.iter_mut().zip(&call.args[1..]) {
            *edge = self.evaluate(arg)?;
        }
        let [top, left, bottom, right] = edges;
        Ok(RawValue::Image(
            image.with_cap_insets(Insets::new(top, left, bottom, right)),
        ))
    }
}

/// A marker with its split arguments.
struct Call<'a> {
    marker: Marker,
    args: Vec<Spanned<&'a str>>,
    /// Span of the whole literal.
    span: Span,
}

impl Call<'_> {
    fn expect_arity(&self, accepted: &[usize]) -> Result<()> {
        if accepted.contains(&self.args.len()) {
            return Ok(());
        }
        let expected = match accepted {
            [count] => format!("{count}"),
            counts => {
                let counts: Vec<String> = counts.iter().map(ToString::to_string).collect();
                counts.join(" or ")
            }
        };
        let plural = if matches!(accepted, [1]) { "argument" } else { "arguments" };
        Err(Diagnostic::error(format!(
            "`{}(...)` takes {expected} {plural}, found {}",
            self.marker.as_str(),
            self.args.len()
        ))
        .with_code(ErrorCode::E102)
        .with_label(self.span, "wrong number of arguments")
        .with_help(format!("expected {}", self.marker.usage())))
    }
}

fn unknown_literal(text: &str, span: Span) -> Diagnostic {
    Diagnostic::error(format!("unknown literal `{text}`"))
        .with_code(ErrorCode::E100)
        .with_label(span, "not a value literal")
        .with_help(
            "values are written `#(...)`, `FONT(...)`, `%(...)`, `R(...)`, `S(...)`, `P(...)`, \
             `IMAGE(...)` or `@key.path`",
        )
}

/// Split the text between the literal's parentheses at top-level commas.
///
/// `offset` is the file position of `body`. Arguments are trimmed and keep
/// file spans.
fn split_arguments<'a>(
    body: &'a str,
    offset: usize,
    marker: Marker,
    literal: Span,
) -> Result<Vec<Spanned<&'a str>>> {
    let unbalanced = || {
        Diagnostic::error(format!(
            "unbalanced parentheses in `{}(...)` literal",
            marker.as_str()
        ))
        .with_code(ErrorCode::E101)
        .with_label(literal, "parentheses do not match")
    };

    let mut args = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (index, ch) in body.char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => depth = depth.checked_sub(1).ok_or_else(unbalanced)?,
            ',' if depth == 0 => {
                args.push(trimmed(body, start..index, offset));
                start = index + 1;
            }
            _ => {}
        }
    }
    if depth != 0 {
        return Err(unbalanced());
    }
    args.push(trimmed(body, start..body.len(), offset));
    Ok(args)
}

fn trimmed(body: &str, range: std::ops::Range<usize>, offset: usize) -> Spanned<&str> {
    let raw = &body[range.clone()];
    let text = raw.trim();
    let start = range.start + (raw.len() - raw.trim_start().len());
    Spanned::new(text, Span::new(start..start + text.len()).shift(offset))
}

/// A font or image name: non-empty, not a variable, no parentheses.
fn plain_name<'a>(arg: &Spanned<&'a str>, what: &str) -> Result<&'a str> {
    let name = *arg.inner();
    let problem = if name.is_empty() {
        Some("name is empty")
    } else if name.starts_with('@') {
        Some("variables cannot be used as names")
    } else if name.contains(['(', ')']) {
        Some("names cannot contain parentheses")
    } else {
        None
    };
    match problem {
        None => Ok(name),
        Some(problem) => Err(Diagnostic::error(format!("invalid {what} name `{name}`"))
            .with_code(ErrorCode::E105)
            .with_label(arg.span(), problem)),
    }
}

/// `%(...)`: components are plain numbers, never expressions or variables.
fn color(call: &Call<'_>) -> Result<RawValue> {
    call.expect_arity(&[1, 3, 4])?;
    let spec = match call.args.as_slice() {
        [single] => {
            let text = *single.inner();
            if text.starts_with(|c: char| c.is_ascii_digit() || matches!(c, '.' | '-' | '+')) {
                ColorSpec::gray(component(single)?)
            } else {
                ColorSpec::pattern_image(plain_name(single, "pattern image")?)
            }
        }
        [red, green, blue] => ColorSpec::rgb(component(red)?, component(green)?, component(blue)?),
        [red, green, blue, alpha] => ColorSpec::rgba(
            component(red)?,
            component(green)?,
            component(blue)?,
            alpha_component(alpha)?,
        ),
        _ => unreachable!("arity checked above"),
    };
    Ok(RawValue::Color(spec))
}

fn invalid_component(arg: &Spanned<&str>, label: &str) -> Diagnostic {
    Diagnostic::error(format!("invalid color component `{}`", arg.inner()))
        .with_code(ErrorCode::E103)
        .with_label(arg.span(), label)
        .with_help("color components are plain numbers: red, green, blue and gray are integers 0-255, alpha is 0-1")
}

fn component(arg: &Spanned<&str>) -> Result<u8> {
    let value = expr::plain_number(arg.inner())
        .ok_or_else(|| invalid_component(arg, "expected a plain number"))?;
    if value.fract() != 0.0 || !(0.0..=255.0).contains(&value) {
        return Err(invalid_component(arg, "expected an integer from 0 to 255"));
    }
    Ok(value as u8)
}

fn alpha_component(arg: &Spanned<&str>) -> Result<f64> {
    let value = expr::plain_number(arg.inner())
        .ok_or_else(|| invalid_component(arg, "expected a plain number"))?;
    if !(0.0..=1.0).contains(&value) {
        return Err(invalid_component(arg, "expected a value from 0 to 1"));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use swatch_core::identifier::KeyPath;

    use super::*;
    use crate::{resolve::NoBindings, stylesheet::Stylesheet};

    fn parse_with(text: &str, bindings: &HashMap<KeyPath, RawValue>) -> Result<RawValue> {
        let local = Stylesheet::new();
        let scope = Scope::new(&local, bindings, None);
        let functions = FunctionTable::standard();
        LiteralParser::new(&scope, &functions).parse(Spanned::new(text, Span::new(0..text.len())))
    }

    fn parse(text: &str) -> RawValue {
        parse_with(text, &HashMap::new()).expect("literal should parse")
    }

    fn parse_err(text: &str) -> ErrorCode {
        let local = Stylesheet::new();
        let scope = Scope::new(&local, &NoBindings, None);
        let functions = FunctionTable::standard();
        LiteralParser::new(&scope, &functions)
            .parse(Spanned::new(text, Span::new(0..text.len())))
            .expect_err("literal should fail")
            .code()
            .expect("diagnostic should have a code")
    }

    #[test]
    fn test_number() {
        assert_eq!(parse("#(100 / 2.5)"), RawValue::Number(40.0));
        assert_eq!(parse("# ( 12 )"), RawValue::Number(12.0));
        assert_eq!(parse("#(max(1, 2))"), RawValue::Number(2.0));
    }

    #[test]
    fn test_font() {
        assert_eq!(
            parse("FONT(Avenir-Book, 12 * 2)"),
            RawValue::Font(FontSpec::named("Avenir-Book", 24.0))
        );
        assert_eq!(
            parse("FONT(Helvetica Neue, 17)"),
            RawValue::Font(FontSpec::named("Helvetica Neue", 17.0))
        );
        assert_eq!(
            parse("FONT( Caption1 )"),
            RawValue::Font(FontSpec::Preferred(TextStyle::Caption1))
        );
        assert_eq!(parse_err("FONT(Avenir)"), ErrorCode::E104);
        assert_eq!(parse_err("FONT(a, 1, 2)"), ErrorCode::E102);
        assert_eq!(parse_err("FONT(, 12)"), ErrorCode::E105);
    }

    #[test]
    fn test_color_arities() {
        assert_eq!(
            parse("%(244, 248, 251, 0.5)"),
            RawValue::Color(ColorSpec::rgba(244, 248, 251, 0.5))
        );
        assert_eq!(
            parse("%(244, 248, 251)"),
            RawValue::Color(ColorSpec::rgb(244, 248, 251))
        );
        assert_eq!(parse("%(70)"), RawValue::Color(ColorSpec::gray(70)));
        assert_eq!(
            parse("%(example_pattern)"),
            RawValue::Color(ColorSpec::pattern_image("example_pattern"))
        );
    }

    #[test]
    fn test_color_components_are_plain() {
        assert_eq!(parse_err("%(256, 0, 0)"), ErrorCode::E103);
        assert_eq!(parse_err("%(1.5, 0, 0)"), ErrorCode::E103);
        assert_eq!(parse_err("%(100 + 1, 0, 0)"), ErrorCode::E103);
        assert_eq!(parse_err("%(-1, 0, 0)"), ErrorCode::E103);
        assert_eq!(parse_err("%(0, 0, 0, 1.5)"), ErrorCode::E103);
        assert_eq!(parse_err("%(300)"), ErrorCode::E103);
        assert_eq!(parse_err("%(-1)"), ErrorCode::E103);
        assert_eq!(parse_err("%(+5)"), ErrorCode::E103);
        assert_eq!(parse_err("%(@tint)"), ErrorCode::E105);
        assert_eq!(parse_err("%(1, 2)"), ErrorCode::E102);
        assert_eq!(parse_err("%()"), ErrorCode::E105);
    }

    #[test]
    fn test_geometry() {
        assert_eq!(
            parse("R(10, 10, 44, 44)"),
            RawValue::Rect(Rect::new(10.0, 10.0, 44.0, 44.0))
        );
        assert_eq!(parse("S(320, 480 / 2)"), RawValue::Size(Size::new(320.0, 240.0)));
        assert_eq!(parse("P(-2, 0.5)"), RawValue::Point(Point::new(-2.0, 0.5)));
        assert_eq!(parse_err("S(10, 20, 30)"), ErrorCode::E102);
        assert_eq!(parse_err("R(1, 2, 3)"), ErrorCode::E102);
    }

    #[test]
    fn test_image() {
        assert_eq!(
            parse("IMAGE(example_image)"),
            RawValue::Image(ImageSpec::new("example_image"))
        );
        assert_eq!(
            parse("IMAGE(example_image, 10, 5, 10, 5)"),
            RawValue::Image(
                ImageSpec::new("example_image").with_cap_insets(Insets::new(10.0, 5.0, 10.0, 5.0))
            )
        );
        assert_eq!(parse_err("IMAGE(a, 1, 2)"), ErrorCode::E102);
        assert_eq!(parse_err("IMAGE()"), ErrorCode::E105);
    }

    #[test]
    fn test_variable_copies_value() {
        let bindings = HashMap::from([(
            KeyPath::parse("title.color").unwrap(),
            RawValue::Color(ColorSpec::gray(10)),
        )]);

        assert_eq!(
            parse_with("@title.color", &bindings).unwrap(),
            RawValue::Color(ColorSpec::gray(10))
        );
        let err = parse_with("@title.font", &bindings).unwrap_err();
        assert_eq!(err.code(), Some(ErrorCode::E300));
    }

    #[test]
    fn test_malformed_literals() {
        assert_eq!(parse_err("12"), ErrorCode::E100);
        assert_eq!(parse_err("COLOR(1, 2, 3)"), ErrorCode::E100);
        assert_eq!(parse_err("#(12"), ErrorCode::E101);
        assert_eq!(parse_err("#(max(1, 2)"), ErrorCode::E101);
        assert_eq!(parse_err("#(1))"), ErrorCode::E101);
        assert_eq!(parse_err("#()"), ErrorCode::E201);
    }

    #[test]
    fn test_argument_spans() {
        let text = "R(1,  22 , 3, 4)";
        let args = split_arguments(&text[2..text.len() - 1], 2, Marker::Rect, Span::default()).unwrap();

        assert_eq!(args.len(), 4);
        assert_eq!(*args[1].inner(), "22");
        assert_eq!(&text[args[1].span().range()], "22");
    }

    #[test]
    fn test_canonical_display_reparses() {
        for text in [
            "#(40)",
            "FONT(Avenir-Book, 24)",
            "FONT(Headline)",
            "%(244, 248, 251, 0.5)",
            "%(1, 2, 3)",
            "%(noise)",
            "R(10, 10, 44, 44)",
            "S(320, 480.5)",
            "P(0, -2)",
            "IMAGE(example_image)",
            "IMAGE(example_image, 10, 5, 10, 5)",
        ] {
            let value = parse(text);
            assert_eq!(value.to_string(), text);
            assert_eq!(parse(&value.to_string()), value);
        }
    }
}
