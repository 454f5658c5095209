//! Geometric values that a style can define.
//!
//! These are plain data: a style file writes them with the `R(...)`,
//! `S(...)` and `P(...)` literals, and `IMAGE(...)` cap insets become an
//! [`Insets`]. Lookups hand them back unchanged.
//!
//! # Overview
//!
//! - [`Point`] - A 2D coordinate
//! - [`Size`] - Width and height dimensions
//! - [`Rect`] - An origin point plus a size
//! - [`Insets`] - Amounts for the four edges, in `top, left, bottom, right` order
//!
//! Coordinates follow screen conventions: origin at the top-left, Y grows
//! downward.

use std::fmt;

/// A 2D point.
///
/// # Examples
///
/// ```
/// # use swatch_core::geometry::Point;
/// let p = Point::new(10.0, 20.0);
/// assert_eq!(p.x(), 10.0);
/// assert_eq!(p.with_y(5.0).y(), 5.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f64,
    y: f64,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f64 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f64 {
        self.y
    }

    /// Creates a new point with the specified x-coordinate
    pub fn with_x(mut self, x: f64) -> Self {
        self.x = x;
        self
    }

    /// Creates a new point with the specified y-coordinate
    pub fn with_y(mut self, y: f64) -> Self {
        self.y = y;
        self
    }

    /// Checks if both x and y coordinates are zero
    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }
}

/// Width and height dimensions.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    width: f64,
    height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn width(self) -> f64 {
        self.width
    }

    pub fn height(self) -> f64 {
        self.height
    }

    /// Checks if both dimensions are zero
    pub fn is_zero(self) -> bool {
        self.width == 0.0 && self.height == 0.0
    }

    /// Returns the size left after removing `insets` from each edge.
    ///
    /// Dimensions are clamped at zero.
    ///
    /// # Examples
    ///
    /// ```
    /// # use swatch_core::geometry::{Insets, Size};
    /// let inner = Size::new(44.0, 30.0).inset_by(Insets::uniform(10.0));
    /// assert_eq!(inner, Size::new(24.0, 10.0));
    /// ```
    pub fn inset_by(self, insets: Insets) -> Self {
        Self {
            width: (self.width - insets.horizontal_sum()).max(0.0),
            height: (self.height - insets.vertical_sum()).max(0.0),
        }
    }
}

/// A rectangle defined by its top-left origin and its size.
///
/// # Examples
///
/// ```
/// # use swatch_core::geometry::{Point, Rect, Size};
/// let rect = Rect::new(10.0, 10.0, 44.0, 44.0);
/// assert_eq!(rect.origin(), Point::new(10.0, 10.0));
/// assert_eq!(rect.size(), Size::new(44.0, 44.0));
/// assert_eq!(rect.max_x(), 54.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    origin: Point,
    size: Size,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::from_origin_size(Point::new(x, y), Size::new(width, height))
    }

    pub fn from_origin_size(origin: Point, size: Size) -> Self {
        Self { origin, size }
    }

    pub fn origin(self) -> Point {
        self.origin
    }

    pub fn size(self) -> Size {
        self.size
    }

    pub fn x(self) -> f64 {
        self.origin.x()
    }

    pub fn y(self) -> f64 {
        self.origin.y()
    }

    pub fn width(self) -> f64 {
        self.size.width()
    }

    pub fn height(self) -> f64 {
        self.size.height()
    }

    /// Right edge: `x + width`.
    pub fn max_x(self) -> f64 {
        self.x() + self.width()
    }

    /// Bottom edge: `y + height`.
    pub fn max_y(self) -> f64 {
        self.y() + self.height()
    }

    /// Center point of the rectangle
    pub fn center(self) -> Point {
        Point::new(
            self.x() + self.width() / 2.0,
            self.y() + self.height() / 2.0,
        )
    }

    /// Returns true if `point` lies inside the rectangle (edges included).
    pub fn contains(self, point: Point) -> bool {
        point.x() >= self.x()
            && point.x() <= self.max_x()
            && point.y() >= self.y()
            && point.y() <= self.max_y()
    }
}

/// Edge amounts, in the `top, left, bottom, right` order used by
/// `IMAGE(name, top, left, bottom, right)`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Insets {
    top: f64,
    left: f64,
    bottom: f64,
    right: f64,
}

impl Insets {
    /// Create new insets.
    ///
    /// The argument order matches the style-file image literal.
    pub fn new(top: f64, left: f64, bottom: f64, right: f64) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }

    /// Same amount on every edge
    pub fn uniform(value: f64) -> Self {
        Self::new(value, value, value, value)
    }

    pub fn top(self) -> f64 {
        self.top
    }

    pub fn left(self) -> f64 {
        self.left
    }

    pub fn bottom(self) -> f64 {
        self.bottom
    }

    pub fn right(self) -> f64 {
        self.right
    }

    /// `left + right`
    pub fn horizontal_sum(self) -> f64 {
        self.left + self.right
    }

    /// `top + bottom`
    pub fn vertical_sum(self) -> f64 {
        self.top + self.bottom
    }

    /// True when every edge is zero.
    pub fn is_zero(self) -> bool {
        self.top == 0.0 && self.left == 0.0 && self.bottom == 0.0 && self.right == 0.0
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} x {}", self.width, self.height)
    }
}
