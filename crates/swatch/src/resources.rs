//! Directory-backed resources: style files and images.
//!
//! A [`ResourceBundle`] searches an ordered list of directories and then,
//! if nothing matched, an optional fallback bundle. An application can put
//! its own overrides in front and keep shipped defaults as the fallback.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use log::trace;

use crate::materialize::{self, ImageLoader};

/// Ordered directories plus an optional fallback bundle.
///
/// # Example
///
/// ```no_run
/// use swatch::resources::ResourceBundle;
///
/// let bundle = ResourceBundle::new(["styles/custom"])
///     .with_fallback(ResourceBundle::new(["styles"]));
/// let source = bundle.read_style("main", "style")?;
/// # Ok::<(), std::io::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ResourceBundle {
    directories: Vec<PathBuf>,
    fallback: Option<Box<ResourceBundle>>,
}

impl ResourceBundle {
    pub fn new<I, P>(directories: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            directories: directories.into_iter().map(Into::into).collect(),
            fallback: None,
        }
    }

    /// Searches `fallback` when none of this bundle's directories match.
    pub fn with_fallback(mut self, fallback: ResourceBundle) -> Self {
        self.fallback = Some(Box::new(fallback));
        self
    }

    pub fn directories(&self) -> &[PathBuf] {
        &self.directories
    }

    pub fn fallback(&self) -> Option<&ResourceBundle> {
        self.fallback.as_deref()
    }

    /// Path of the first file called `file_name`.
    pub fn find(&self, file_name: impl AsRef<Path>) -> Option<PathBuf> {
        let file_name = file_name.as_ref();
        self.directories
            .iter()
            .map(|directory| directory.join(file_name))
            .find(|path| path.is_file())
            .or_else(|| self.fallback.as_ref()?.find(file_name))
    }

    /// Reads the first file called `file_name` as UTF-8 text.
    ///
    /// # Errors
    ///
    /// [`io::ErrorKind::NotFound`] if no directory holds the file, or the
    /// error raised while reading it.
    pub fn read_to_string(&self, file_name: impl AsRef<Path>) -> io::Result<String> {
        let file_name = file_name.as_ref();
        let path = self.find(file_name).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("`{}` not found in resource bundle", file_name.display()),
            )
        })?;
        trace!(path:% = path.display(); "Reading resource");
        fs::read_to_string(path)
    }

    /// Path of the style file `<name>.<extension>`.
    pub fn find_style(&self, name: &str, extension: &str) -> Option<PathBuf> {
        self.find(format!("{name}.{extension}"))
    }

    /// Reads the style file `<name>.<extension>`.
    pub fn read_style(&self, name: &str, extension: &str) -> io::Result<String> {
        self.read_to_string(format!("{name}.{extension}"))
    }
}

impl ImageLoader for ResourceBundle {
    fn load_image(&self, name: &str) -> io::Result<Vec<u8>> {
        match materialize::find_image(&self.directories, name) {
            Some(path) => materialize::read_image(&path),
            None => match &self.fallback {
                Some(fallback) => fallback.load_image(name),
                None => Err(materialize::image_not_found(name)),
            },
        }
    }
}
