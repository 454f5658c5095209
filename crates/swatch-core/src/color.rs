//! Color handling for Swatch styles
//!
//! This module provides the [`Color`] type which wraps the `AlphaColor<Srgb>`
//! type from the color crate. A [`ColorSpec`] with explicit components
//! converts into a [`Color`]; pattern-image specs need an image and are
//! materialized elsewhere.

use std::fmt;

use color::{AlphaColor, Srgb};

use crate::value::ColorSpec;

/// Wrapper around the `AlphaColor<Srgb>` type from the color crate
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Color {
    color: AlphaColor<Srgb>,
}

impl Color {
    /// Create an opaque color from 8-bit components.
    ///
    /// # Examples
    ///
    /// ```
    /// use swatch_core::color::Color;
    ///
    /// let color = Color::from_rgb8(244, 248, 251);
    /// assert_eq!(color.to_rgba8(), (244, 248, 251, 255));
    /// ```
    pub fn from_rgb8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            color: AlphaColor::from_rgb8(red, green, blue),
        }
    }

    /// Build a color from a component spec, or `None` for a pattern image.
    ///
    /// An omitted alpha becomes fully opaque; alpha is clamped to `0.0..=1.0`.
    ///
    /// # Examples
    ///
    /// ```
    /// use swatch_core::{color::Color, value::ColorSpec};
    ///
    /// let color = Color::from_spec(&ColorSpec::rgba(0, 0, 0, 0.5)).unwrap();
    /// assert_eq!(color.alpha(), 0.5);
    ///
    /// assert!(Color::from_spec(&ColorSpec::pattern_image("noise")).is_none());
    /// ```
    pub fn from_spec(spec: &ColorSpec) -> Option<Self> {
        let (red, green, blue) = spec.components()?;
        let alpha = spec.alpha().unwrap_or(1.0).clamp(0.0, 1.0);
        Some(Self::from_rgb8(red, green, blue).with_alpha(alpha as f32))
    }

    /// Creates a new color with the specified alpha (transparency) value.
    pub fn with_alpha(self, alpha: f32) -> Self {
        Color {
            color: self.color.with_alpha(alpha),
        }
    }

    /// Returns the alpha (transparency) component of this color.
    ///
    /// The value is between 0.0 (fully transparent) and 1.0 (fully opaque).
    pub fn alpha(&self) -> f32 {
        self.color.components[3]
    }

    /// Red, green, blue and alpha as 8-bit values.
    pub fn to_rgba8(self) -> (u8, u8, u8, u8) {
        let rgba = self.color.to_rgba8();
        (rgba.r, rgba.g, rgba.b, rgba.a)
    }

    /// The wrapped color-crate value.
    pub fn as_alpha_color(&self) -> AlphaColor<Srgb> {
        self.color
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::from_rgb8(0, 0, 0)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (red, green, blue, _) = self.to_rgba8();
        write!(f, "rgba({red}, {green}, {blue}, {})", self.alpha())
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_color_default() {
        assert_eq!(Color::default().to_rgba8(), (0, 0, 0, 255));
    }

    #[test]
    fn test_from_spec_without_alpha_is_opaque() {
        let color = Color::from_spec(&ColorSpec::rgb(244, 248, 251)).unwrap();

        assert_eq!(color.to_rgba8(), (244, 248, 251, 255));
        assert_approx_eq!(f32, color.alpha(), 1.0);
    }

    #[test]
    fn test_from_spec_gray() {
        let color = Color::from_spec(&ColorSpec::gray(70)).unwrap();
        assert_eq!(color.to_rgba8(), (70, 70, 70, 255));
    }

    #[test]
    fn test_from_spec_clamps_alpha() {
        let color = Color::from_spec(&ColorSpec::rgba(1, 2, 3, 4.0)).unwrap();
        assert_approx_eq!(f32, color.alpha(), 1.0);
    }

    #[test]
    fn test_with_alpha() {
        let color = Color::from_rgb8(255, 0, 0).with_alpha(0.25);
        assert_approx_eq!(f32, color.alpha(), 0.25);
    }

    #[test]
    fn test_display() {
        let color = Color::from_rgb8(10, 20, 30).with_alpha(0.5);
        assert_eq!(color.to_string(), "rgba(10, 20, 30, 0.5)");
    }
}
