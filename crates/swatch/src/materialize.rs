//! Turning value descriptors into runtime objects.
//!
//! Parsing only records what a style file says. A [`Materializer`] builds
//! the objects an application draws with, and an [`ImageLoader`] supplies
//! image bytes by name. Both are traits so a UI toolkit can plug in its own
//! font, color and image types; [`DefaultMaterializer`] and
//! [`DirectoryImageLoader`] are platform-neutral defaults.
//!
//! Image bytes are fetched only here, never while parsing.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use log::trace;

use swatch_core::{
    color::Color,
    geometry::Insets,
    value::{ColorSpec, FontSpec, ImageSpec, TextStyle},
};

use crate::error::MaterializeError;

/// Loads image bytes by name.
pub trait ImageLoader {
    /// Returns the bytes of the image called `name`.
    ///
    /// # Errors
    ///
    /// Returns [`io::ErrorKind::NotFound`] when no image has that name, or
    /// the error raised while reading it.
    fn load_image(&self, name: &str) -> io::Result<Vec<u8>>;
}

impl<L: ImageLoader + ?Sized> ImageLoader for &L {
    fn load_image(&self, name: &str) -> io::Result<Vec<u8>> {
        (**self).load_image(name)
    }
}

/// File names tried, in order, for an image called `name`.
fn image_candidates(name: &str) -> [String; 4] {
    [
        name.to_string(),
        format!("{name}.png"),
        format!("{name}@2x.png"),
        format!("{name}.jpg"),
    ]
}

/// Finds the first image file for `name`, searching each directory in turn.
pub(crate) fn find_image(directories: &[PathBuf], name: &str) -> Option<PathBuf> {
    let candidates = image_candidates(name);
    directories.iter().find_map(|directory| {
        candidates
            .iter()
            .map(|candidate| directory.join(candidate))
            .find(|path| path.is_file())
    })
}

pub(crate) fn image_not_found(name: &str) -> io::Error {
    io::Error::new(io::ErrorKind::NotFound, format!("no image named `{name}`"))
}

/// Reads images from a list of directories.
///
/// For an image `name` each directory is searched for `name`, `name.png`,
/// `name@2x.png` and `name.jpg`, in that order. Earlier directories win.
#[derive(Debug, Clone, Default)]
pub struct DirectoryImageLoader {
    directories: Vec<PathBuf>,
}

impl DirectoryImageLoader {
    pub fn new<I, P>(directories: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            directories: directories.into_iter().map(Into::into).collect(),
        }
    }

    pub fn directories(&self) -> &[PathBuf] {
        &self.directories
    }
}

impl ImageLoader for DirectoryImageLoader {
    fn load_image(&self, name: &str) -> io::Result<Vec<u8>> {
        let path = find_image(&self.directories, name).ok_or_else(|| image_not_found(name))?;
        read_image(&path)
    }
}

pub(crate) fn read_image(path: &Path) -> io::Result<Vec<u8>> {
    trace!(path:% = path.display(); "Reading image");
    fs::read(path)
}

/// Builds runtime fonts, colors and images from descriptors.
pub trait Materializer {
    type Font;
    type Color;
    type Image;

    fn font(&self, spec: &FontSpec) -> Self::Font;

    /// Pattern colors need their image, so this may load bytes.
    fn color(
        &self,
        spec: &ColorSpec,
        images: &dyn ImageLoader,
    ) -> Result<Self::Color, MaterializeError>;

    fn image(
        &self,
        spec: &ImageSpec,
        images: &dyn ImageLoader,
    ) -> Result<Self::Image, MaterializeError>;
}

/// Where a [`Font`] comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum FontFamily {
    /// A font installed under this name.
    Named(String),
    /// The platform's font for a text style.
    System(TextStyle),
}

/// A platform-neutral font: a family and a resolved point size.
#[derive(Debug, Clone, PartialEq)]
pub struct Font {
    family: FontFamily,
    point_size: f64,
}

impl Font {
    pub fn new(family: FontFamily, point_size: f64) -> Self {
        Self { family, point_size }
    }

    pub fn family(&self) -> &FontFamily {
        &self.family
    }

    pub fn point_size(&self) -> f64 {
        self.point_size
    }
}

/// Loaded image bytes plus the resize information from the style.
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    name: String,
    bytes: Vec<u8>,
    cap_insets: Option<Insets>,
}

impl Image {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn cap_insets(&self) -> Option<Insets> {
        self.cap_insets
    }

    /// Resizable images stretch their interior and keep the capped edges.
    pub fn is_resizable(&self) -> bool {
        self.cap_insets.is_some()
    }
}

/// A color: either solid or a tiled pattern image.
#[derive(Debug, Clone, PartialEq)]
pub enum Fill {
    Solid(Color),
    Pattern(Image),
}

impl Fill {
    /// The solid color, if this is not a pattern.
    pub fn as_solid(&self) -> Option<Color> {
        match self {
            Fill::Solid(color) => Some(*color),
            Fill::Pattern(_) => None,
        }
    }
}

/// Produces [`Font`], [`Fill`] and [`Image`] values.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultMaterializer;

impl DefaultMaterializer {
    fn load(
        spec_name: &str,
        cap_insets: Option<Insets>,
        images: &dyn ImageLoader,
    ) -> Result<Image, MaterializeError> {
        let bytes = images
            .load_image(spec_name)
            .map_err(|source| MaterializeError::ImageLoad {
                name: spec_name.to_string(),
                source,
            })?;

        Ok(Image {
            name: spec_name.to_string(),
            bytes,
            cap_insets,
        })
    }
}

impl Materializer for DefaultMaterializer {
    type Font = Font;
    type Color = Fill;
    type Image = Image;

    fn font(&self, spec: &FontSpec) -> Font {
        match spec {
            FontSpec::Named { name, size } => Font::new(FontFamily::Named(name.clone()), *size),
            FontSpec::Preferred(style) => {
                Font::new(FontFamily::System(*style), style.default_point_size())
            }
        }
    }

    fn color(&self, spec: &ColorSpec, images: &dyn ImageLoader) -> Result<Fill, MaterializeError> {
        match spec {
            ColorSpec::PatternImage(name) => Ok(Fill::Pattern(Self::load(name, None, images)?)),
            ColorSpec::Rgba { .. } => {
                let color = Color::from_spec(spec).unwrap_or_default();
                Ok(Fill::Solid(color))
            }
        }
    }

    fn image(&self, spec: &ImageSpec, images: &dyn ImageLoader) -> Result<Image, MaterializeError> {
        Self::load(spec.name(), spec.cap_insets(), images)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use float_cmp::assert_approx_eq;
    use tempfile::tempdir;

    use super::*;

    struct MapLoader(HashMap<&'static str, Vec<u8>>);

    impl ImageLoader for MapLoader {
        fn load_image(&self, name: &str) -> io::Result<Vec<u8>> {
            self.0.get(name).cloned().ok_or_else(|| image_not_found(name))
        }
    }

    #[test]
    fn test_font_named() {
        let font = DefaultMaterializer.font(&FontSpec::named("Avenir-Book", 24.0));

        assert_eq!(font.family(), &FontFamily::Named("Avenir-Book".to_string()));
        assert_approx_eq!(f64, font.point_size(), 24.0);
    }

    #[test]
    fn test_font_text_style_uses_default_size() {
        let font = DefaultMaterializer.font(&FontSpec::Preferred(TextStyle::Caption2));

        assert_eq!(font.family(), &FontFamily::System(TextStyle::Caption2));
        assert_approx_eq!(f64, font.point_size(), 11.0);
    }

    #[test]
    fn test_solid_color_needs_no_images() {
        let loader = MapLoader(HashMap::new());
        let fill = DefaultMaterializer
            .color(&ColorSpec::rgba(10, 20, 30, 0.5), &loader)
            .unwrap();

        let color = fill.as_solid().unwrap();
        assert_eq!(color.to_rgba8().0, 10);
        assert_approx_eq!(f32, color.alpha(), 0.5);
    }

    #[test]
    fn test_pattern_color_loads_image() {
        let loader = MapLoader(HashMap::from([("noise", vec![1, 2, 3])]));
        let fill = DefaultMaterializer
            .color(&ColorSpec::pattern_image("noise"), &loader)
            .unwrap();

        match fill {
            Fill::Pattern(image) => {
                assert_eq!(image.bytes(), &[1, 2, 3]);
                assert!(!image.is_resizable());
            }
            Fill::Solid(_) => panic!("Expected a pattern fill"),
        }
    }

    #[test]
    fn test_image_keeps_cap_insets() {
        let loader = MapLoader(HashMap::from([("button", vec![0])]));
        let spec = ImageSpec::new("button").with_cap_insets(Insets::new(1.0, 2.0, 3.0, 4.0));

        let image = DefaultMaterializer.image(&spec, &loader).unwrap();
        assert!(image.is_resizable());
        assert_eq!(image.cap_insets(), Some(Insets::new(1.0, 2.0, 3.0, 4.0)));
    }

    #[test]
    fn test_missing_image_is_an_error() {
        let loader = MapLoader(HashMap::new());
        let err = DefaultMaterializer
            .image(&ImageSpec::new("ghost"), &loader)
            .unwrap_err();

        let MaterializeError::ImageLoad { name, source } = err;
        assert_eq!(name, "ghost");
        assert_eq!(source.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_directory_loader_candidates() {
        let first = tempdir().unwrap();
        let second = tempdir().unwrap();
        fs::write(second.path().join("logo@2x.png"), b"retina").unwrap();
        fs::write(second.path().join("logo.jpg"), b"jpeg").unwrap();
        fs::write(first.path().join("icon"), b"bare").unwrap();

        let loader = DirectoryImageLoader::new([first.path(), second.path()]);

        assert_eq!(loader.load_image("logo").unwrap(), b"retina");
        assert_eq!(loader.load_image("icon").unwrap(), b"bare");
        assert_eq!(
            loader.load_image("missing").unwrap_err().kind(),
            io::ErrorKind::NotFound
        );
    }

    #[test]
    fn test_directory_loader_prefers_earlier_directory() {
        let first = tempdir().unwrap();
        let second = tempdir().unwrap();
        fs::write(first.path().join("logo.jpg"), b"first").unwrap();
        fs::write(second.path().join("logo.png"), b"second").unwrap();

        let loader = DirectoryImageLoader::new([first.path(), second.path()]);
        assert_eq!(loader.load_image("logo").unwrap(), b"first");
    }
}
