//! The style store: every loaded value, by full key path.

use std::{fs, path::Path, time::Duration};

use indexmap::IndexMap;
use log::{debug, info, trace, warn};

use swatch_core::{
    geometry::{Point, Rect, Size},
    identifier::KeyPath,
    value::{ColorSpec, FontSpec, ImageSpec, RawValue, ValueKind},
};
use swatch_parser::{FunctionTable, Stylesheet};

use crate::{
    config::StoreConfig,
    error::{LookupError, SwatchError},
    materialize::{ImageLoader, Materializer},
    resources::ResourceBundle,
};

/// Mapping from full key path to value, built by loading style files.
///
/// Files are loaded in order and a later file overrides earlier values
/// path by path. A value is replaced whole; nothing inside it is merged.
/// Variables in a file are resolved against the file's own earlier
/// assignments, then against everything already in the store.
///
/// # Example
///
/// ```
/// use swatch::StyleStore;
///
/// let mut store = StyleStore::new();
/// store.load("
///     header {
///         height = #(44)
///     }
///     footer = #(@header.height * 2)
/// ")?;
///
/// assert_eq!(store.number("footer")?, 88.0);
/// # Ok::<(), swatch::SwatchError>(())
/// ```
#[derive(Debug, Default)]
pub struct StyleStore {
    values: IndexMap<KeyPath, RawValue>,
    config: StoreConfig,
    functions: FunctionTable,
}

impl StyleStore {
    /// An empty store with the standard expression functions.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: StoreConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Replaces the functions available to expressions in later loads.
    pub fn with_functions(mut self, functions: FunctionTable) -> Self {
        self.functions = functions;
        self
    }

    /// Mutable access to the expression functions, for registering more.
    pub fn functions_mut(&mut self) -> &mut FunctionTable {
        &mut self.functions
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Parses `source` and merges its values into the store.
    ///
    /// Returns the number of assignments merged. Warnings found while
    /// parsing are logged.
    ///
    /// # Errors
    ///
    /// Returns [`SwatchError::Parse`] with every diagnostic of the file.
    /// A file that fails leaves the store unchanged.
    pub fn load(&mut self, source: &str) -> Result<usize, SwatchError> {
        let sheet = swatch_parser::parse_with_functions(source, &self.values, &self.functions)
            .map_err(|err| SwatchError::new_parse_error(err, source))?;

        for warning in sheet.warnings() {
            warn!(warning:%; "Style file warning");
        }

        Ok(self.merge(sheet))
    }

    /// Reads and loads a style file.
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<usize, SwatchError> {
        let path = path.as_ref();
        info!(path:% = path.display(); "Loading style file");

        let source = fs::read_to_string(path)?;
        let count = self.load(&source)?;

        info!(path:% = path.display(), assignments = count; "Style file loaded");
        Ok(count)
    }

    /// Loads the style called `name` from a resource bundle.
    ///
    /// The configured file extension is appended to `name`.
    pub fn load_style(&mut self, name: &str, bundle: &ResourceBundle) -> Result<usize, SwatchError> {
        let path = bundle
            .find_style(name, self.config.file_extension())
            .ok_or_else(|| SwatchError::StyleNotFound {
                name: name.to_string(),
            })?;
        self.load_file(path)
    }

    fn merge(&mut self, sheet: Stylesheet) -> usize {
        let count = sheet.len();
        for assignment in sheet {
            let (path, value) = assignment.into_parts();
            if self.config.trace_loading() {
                debug!(path:%, value:%; "Merging value");
            }
            self.values.insert(path, value);
        }
        debug!(assignments = count, total = self.values.len(); "Merged style file");
        count
    }

    /// Looks up `path` and checks that its value has the `expected` kind.
    ///
    /// # Errors
    ///
    /// - [`LookupError::InvalidPath`] if `path` is not a dotted key path
    /// - [`LookupError::UndefinedKey`] if nothing is stored at `path`
    /// - [`LookupError::TypeMismatch`] if the value has another kind
    pub fn get(&self, path: &str, expected: ValueKind) -> Result<&RawValue, LookupError> {
        let value = self.lookup(path)?;
        if value.kind() == expected {
            Ok(value)
        } else {
            Err(mismatch(path, expected, value))
        }
    }

    /// The value at an already parsed path.
    pub fn value(&self, path: &KeyPath) -> Option<&RawValue> {
        self.values.get(path)
    }

    /// The value at `path`, whatever its kind.
    pub fn lookup(&self, path: &str) -> Result<&RawValue, LookupError> {
        let key = KeyPath::parse(path)?;
        self.values.get(&key).ok_or_else(|| {
            trace!(path; "Undefined key");
            LookupError::UndefinedKey {
                path: path.to_string(),
            }
        })
    }

    pub fn number(&self, path: &str) -> Result<f64, LookupError> {
        match self.lookup(path)? {
            RawValue::Number(number) => Ok(*number),
            other => Err(mismatch(path, ValueKind::Number, other)),
        }
    }

    /// A number truncated toward zero. Infinities saturate.
    pub fn integer(&self, path: &str) -> Result<i64, LookupError> {
        let number = self.number(path)?;
        if number.is_nan() {
            return Err(out_of_range(path, number, "not a number"));
        }
        Ok(number.trunc() as i64)
    }

    /// A number truncated toward zero; negative numbers become `0`.
    pub fn unsigned_integer(&self, path: &str) -> Result<u64, LookupError> {
        let number = self.number(path)?;
        if number.is_nan() {
            return Err(out_of_range(path, number, "not a number"));
        }
        Ok(number.trunc() as u64)
    }

    /// A number of seconds as a [`Duration`].
    pub fn time_interval(&self, path: &str) -> Result<Duration, LookupError> {
        let seconds = self.number(path)?;
        Duration::try_from_secs_f64(seconds).map_err(|_| {
            out_of_range(
                path,
                seconds,
                "a time interval must be a finite, non-negative number of seconds",
            )
        })
    }

    pub fn rect(&self, path: &str) -> Result<Rect, LookupError> {
        match self.lookup(path)? {
            RawValue::Rect(rect) => Ok(*rect),
            other => Err(mismatch(path, ValueKind::Rect, other)),
        }
    }

    pub fn size(&self, path: &str) -> Result<Size, LookupError> {
        match self.lookup(path)? {
            RawValue::Size(size) => Ok(*size),
            other => Err(mismatch(path, ValueKind::Size, other)),
        }
    }

    pub fn point(&self, path: &str) -> Result<Point, LookupError> {
        match self.lookup(path)? {
            RawValue::Point(point) => Ok(*point),
            other => Err(mismatch(path, ValueKind::Point, other)),
        }
    }

    pub fn font_spec(&self, path: &str) -> Result<&FontSpec, LookupError> {
        match self.lookup(path)? {
            RawValue::Font(spec) => Ok(spec),
            other => Err(mismatch(path, ValueKind::Font, other)),
        }
    }

    pub fn color_spec(&self, path: &str) -> Result<&ColorSpec, LookupError> {
        match self.lookup(path)? {
            RawValue::Color(spec) => Ok(spec),
            other => Err(mismatch(path, ValueKind::Color, other)),
        }
    }

    /// The image descriptor. No image bytes are loaded.
    pub fn image_spec(&self, path: &str) -> Result<&ImageSpec, LookupError> {
        match self.lookup(path)? {
            RawValue::Image(spec) => Ok(spec),
            other => Err(mismatch(path, ValueKind::Image, other)),
        }
    }

    /// Materializes the font at `path`.
    pub fn font<M: Materializer>(
        &self,
        path: &str,
        materializer: &M,
    ) -> Result<M::Font, LookupError> {
        Ok(materializer.font(self.font_spec(path)?))
    }

    /// Materializes the color at `path`, loading its image for patterns.
    pub fn color<M: Materializer>(
        &self,
        path: &str,
        materializer: &M,
        images: &dyn ImageLoader,
    ) -> Result<M::Color, SwatchError> {
        Ok(materializer.color(self.color_spec(path)?, images)?)
    }

    /// Materializes the image at `path`. This is where image bytes are read.
    pub fn image<M: Materializer>(
        &self,
        path: &str,
        materializer: &M,
        images: &dyn ImageLoader,
    ) -> Result<M::Image, SwatchError> {
        Ok(materializer.image(self.image_spec(path)?, images)?)
    }

    pub fn contains(&self, path: &str) -> bool {
        KeyPath::parse(path).is_ok_and(|key| self.values.contains_key(&key))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Every stored value, in the order its path was first defined.
    pub fn entries(&self) -> impl Iterator<Item = (&KeyPath, &RawValue)> {
        self.values.iter()
    }
}

fn mismatch(path: &str, expected: ValueKind, found: &RawValue) -> LookupError {
    LookupError::TypeMismatch {
        path: path.to_string(),
        expected,
        found: found.kind(),
    }
}

fn out_of_range(path: &str, value: f64, reason: &'static str) -> LookupError {
    LookupError::OutOfRange {
        path: path.to_string(),
        value,
        reason,
    }
}
