//! Raw value descriptors produced by parsing a style file.
//!
//! A [`RawValue`] records what a style file said, not a platform object:
//! fonts, colors and images stay descriptors ([`FontSpec`], [`ColorSpec`],
//! [`ImageSpec`]) until a materializer turns them into something a UI
//! toolkit can use. Numbers and geometry are plain data already.
//!
//! Every value formats back to its canonical literal with `Display`, which
//! the parser accepts again:
//!
//! ```
//! use swatch_core::value::{ColorSpec, RawValue};
//!
//! let value = RawValue::Color(ColorSpec::rgba(244, 248, 251, 0.5));
//! assert_eq!(value.to_string(), "%(244, 248, 251, 0.5)");
//! ```

use std::{fmt, str::FromStr};

use crate::geometry::{Insets, Point, Rect, Size};

/// The payload-free tag of a [`RawValue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Number,
    Font,
    Color,
    Rect,
    Size,
    Point,
    Image,
}

impl ValueKind {
    /// Lowercase name used in messages.
    pub fn as_str(self) -> &'static str {
        match self {
            ValueKind::Number => "number",
            ValueKind::Font => "font",
            ValueKind::Color => "color",
            ValueKind::Rect => "rect",
            ValueKind::Size => "size",
            ValueKind::Point => "point",
            ValueKind::Image => "image",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed, un-materialized style value.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Number(f64),
    Font(FontSpec),
    Color(ColorSpec),
    Rect(Rect),
    Size(Size),
    Point(Point),
    Image(ImageSpec),
}

impl RawValue {
    /// Returns the tag of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            RawValue::Number(_) => ValueKind::Number,
            RawValue::Font(_) => ValueKind::Font,
            RawValue::Color(_) => ValueKind::Color,
            RawValue::Rect(_) => ValueKind::Rect,
            RawValue::Size(_) => ValueKind::Size,
            RawValue::Point(_) => ValueKind::Point,
            RawValue::Image(_) => ValueKind::Image,
        }
    }

    /// Returns the number if this is a `Number`.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            RawValue::Number(number) => Some(*number),
            _ => None,
        }
    }
}

impl From<f64> for RawValue {
    fn from(number: f64) -> Self {
        RawValue::Number(number)
    }
}

impl From<FontSpec> for RawValue {
    fn from(spec: FontSpec) -> Self {
        RawValue::Font(spec)
    }
}

impl From<ColorSpec> for RawValue {
    fn from(spec: ColorSpec) -> Self {
        RawValue::Color(spec)
    }
}

impl From<ImageSpec> for RawValue {
    fn from(spec: ImageSpec) -> Self {
        RawValue::Image(spec)
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawValue::Number(number) => write!(f, "#({})", Literal(*number)),
            RawValue::Font(spec) => fmt::Display::fmt(spec, f),
            RawValue::Color(spec) => fmt::Display::fmt(spec, f),
            RawValue::Rect(rect) => write!(
                f,
                "R({}, {}, {}, {})",
                Literal(rect.x()),
                Literal(rect.y()),
                Literal(rect.width()),
                Literal(rect.height())
            ),
            RawValue::Size(size) => write!(
                f,
                "S({}, {})",
                Literal(size.width()),
                Literal(size.height())
            ),
            RawValue::Point(point) => {
                write!(f, "P({}, {})", Literal(point.x()), Literal(point.y()))
            }
            RawValue::Image(spec) => fmt::Display::fmt(spec, f),
        }
    }
}

/// A number as expression text. Infinity and NaN have no literal, so they
/// are written as the division that produces them.
struct Literal(f64);

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            n if n.is_nan() => f.write_str("0 / 0"),
            n if n == f64::INFINITY => f.write_str("1 / 0"),
            n if n == f64::NEG_INFINITY => f.write_str("-1 / 0"),
            n => write!(f, "{n}"),
        }
    }
}

/// The preferred-font text styles a single-argument `FONT(...)` can name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextStyle {
    Headline,
    Subheadline,
    Body,
    Footnote,
    Caption1,
    Caption2,
}

impl TextStyle {
    /// All styles, in documentation order.
    pub const ALL: [TextStyle; 6] = [
        TextStyle::Headline,
        TextStyle::Subheadline,
        TextStyle::Body,
        TextStyle::Footnote,
        TextStyle::Caption1,
        TextStyle::Caption2,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TextStyle::Headline => "Headline",
            TextStyle::Subheadline => "Subheadline",
            TextStyle::Body => "Body",
            TextStyle::Footnote => "Footnote",
            TextStyle::Caption1 => "Caption1",
            TextStyle::Caption2 => "Caption2",
        }
    }

    /// Point size used when a platform has no preference of its own.
    pub fn default_point_size(self) -> f64 {
        match self {
            TextStyle::Headline | TextStyle::Body => 17.0,
            TextStyle::Subheadline => 15.0,
            TextStyle::Footnote => 13.0,
            TextStyle::Caption1 => 12.0,
            TextStyle::Caption2 => 11.0,
        }
    }
}

impl FromStr for TextStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TextStyle::ALL
            .into_iter()
            .find(|style| style.as_str() == s)
            .ok_or_else(|| format!("unknown text style `{s}`"))
    }
}

impl fmt::Display for TextStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Font descriptor: either a named font at a size, or a preferred text style.
#[derive(Debug, Clone, PartialEq)]
pub enum FontSpec {
    /// `FONT(Avenir-Book, 24)`
    Named { name: String, size: f64 },
    /// `FONT(Headline)`
    Preferred(TextStyle),
}

impl FontSpec {
    pub fn named(name: impl Into<String>, size: f64) -> Self {
        FontSpec::Named {
            name: name.into(),
            size,
        }
    }

    /// The font name, or the text style's name for preferred fonts.
    pub fn name_or_text_style(&self) -> &str {
        match self {
            FontSpec::Named { name, .. } => name,
            FontSpec::Preferred(style) => style.as_str(),
        }
    }

    /// Explicit size, if the literal gave one.
    pub fn size(&self) -> Option<f64> {
        match self {
            FontSpec::Named { size, .. } => Some(*size),
            FontSpec::Preferred(_) => None,
        }
    }

    pub fn text_style(&self) -> Option<TextStyle> {
        match self {
            FontSpec::Named { .. } => None,
            FontSpec::Preferred(style) => Some(*style),
        }
    }
}

impl fmt::Display for FontSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FontSpec::Named { name, size } => write!(f, "FONT({name}, {size})"),
            FontSpec::Preferred(style) => write!(f, "FONT({style})"),
        }
    }
}

/// Color descriptor.
#[derive(Debug, Clone, PartialEq)]
pub enum ColorSpec {
    /// `%(r, g, b)` or `%(r, g, b, a)`; `%(gray)` is stored with equal components.
    Rgba {
        red: u8,
        green: u8,
        blue: u8,
        /// `None` when the literal omitted alpha.
        alpha: Option<f64>,
    },
    /// `%(image_name)`: a color that tiles the named image.
    PatternImage(String),
}

impl ColorSpec {
    pub fn rgb(red: u8, green: u8, blue: u8) -> Self {
        ColorSpec::Rgba {
            red,
            green,
            blue,
            alpha: None,
        }
    }

    pub fn rgba(red: u8, green: u8, blue: u8, alpha: f64) -> Self {
        ColorSpec::Rgba {
            red,
            green,
            blue,
            alpha: Some(alpha),
        }
    }

    /// `%(gray)`: red, green and blue all set to `level`.
    pub fn gray(level: u8) -> Self {
        Self::rgb(level, level, level)
    }

    pub fn pattern_image(name: impl Into<String>) -> Self {
        ColorSpec::PatternImage(name.into())
    }

    /// Effective alpha: the literal's alpha, `1.0` when omitted.
    ///
    /// Returns `None` for pattern images.
    pub fn alpha(&self) -> Option<f64> {
        match self {
            ColorSpec::Rgba { alpha, .. } => Some(alpha.unwrap_or(1.0)),
            ColorSpec::PatternImage(_) => None,
        }
    }

    /// The red, green and blue components, if this is not a pattern.
    pub fn components(&self) -> Option<(u8, u8, u8)> {
        match self {
            ColorSpec::Rgba {
                red, green, blue, ..
            } => Some((*red, *green, *blue)),
            ColorSpec::PatternImage(_) => None,
        }
    }
}

impl fmt::Display for ColorSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorSpec::Rgba {
                red,
                green,
                blue,
                alpha: None,
            } => write!(f, "%({red}, {green}, {blue})"),
            ColorSpec::Rgba {
                red,
                green,
                blue,
                alpha: Some(alpha),
            } => write!(f, "%({red}, {green}, {blue}, {alpha})"),
            ColorSpec::PatternImage(name) => write!(f, "%({name})"),
        }
    }
}

/// Image descriptor. Only the name is recorded; bytes are loaded on demand.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageSpec {
    name: String,
    cap_insets: Option<Insets>,
}

impl ImageSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cap_insets: None,
        }
    }

    /// Marks the image resizable with the given cap insets.
    pub fn with_cap_insets(mut self, insets: Insets) -> Self {
        self.cap_insets = Some(insets);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cap_insets(&self) -> Option<Insets> {
        self.cap_insets
    }

    /// An image with cap insets stretches its interior when resized.
    pub fn is_resizable(&self) -> bool {
        self.cap_insets.is_some()
    }
}

impl fmt::Display for ImageSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.cap_insets {
            None => write!(f, "IMAGE({})", self.name),
            Some(insets) => write!(
                f,
                "IMAGE({}, {}, {}, {}, {})",
                self.name,
                insets.top(),
                insets.left(),
                insets.bottom(),
                insets.right()
            ),
        }
    }
}
