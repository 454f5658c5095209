//! Swatch Core Types and Definitions
//!
//! This crate provides the value model shared by the Swatch style-file
//! parser and the style store. It includes:
//!
//! - **Identifiers**: Interned key segments and dotted key paths ([`identifier`] module)
//! - **Values**: Raw value descriptors produced by parsing ([`value`] module)
//! - **Geometry**: Rect, size, point and inset types ([`geometry`] module)
//! - **Colors**: sRGB colors built from color descriptors ([`color::Color`])

pub mod color;
pub mod geometry;
pub mod identifier;
pub mod value;
