//! Swatch - layered style files with typed lookups.
//!
//! A style file externalizes presentation constants: numbers, colors,
//! fonts, geometry and images, grouped under dotted key paths. A
//! [`StyleStore`] loads any number of files in order, later files
//! overriding earlier ones, and hands values back through typed accessors.
//!
//! ```
//! use swatch::{StyleStore, materialize::{DefaultMaterializer, FontFamily}};
//!
//! let mut store = StyleStore::new();
//! store.load("
//!     title {
//!         font = FONT(Avenir-Heavy, 18)
//!         height = #(44)
//!     }
//! ")?;
//! store.load("
//!     title {
//!         height = #(@title.height + 8)
//!     }
//! ")?;
//!
//! assert_eq!(store.number("title.height")?, 52.0);
//!
//! let font = store.font("title.font", &DefaultMaterializer)?;
//! assert_eq!(font.family(), &FontFamily::Named("Avenir-Heavy".to_string()));
//! # Ok::<(), swatch::SwatchError>(())
//! ```

pub mod config;
pub mod materialize;
pub mod resources;

mod error;
mod store;

pub use swatch_core::{color, geometry, identifier, value};
pub use swatch_parser::{FunctionTable, functions};

pub use error::{LookupError, MaterializeError, SwatchError};
pub use store::StyleStore;
