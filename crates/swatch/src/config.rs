//! Configuration types for loading styles.
//!
//! All types implement [`serde::Deserialize`] so a front end can read them
//! from TOML. Every field has a default, so an empty document is a valid
//! configuration.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining store and resource settings.
//! - [`StoreConfig`] - Controls how a [`StyleStore`](crate::StyleStore) loads files.
//! - [`ResourceConfig`] - Directories searched for style files and images.
//!
//! # Example
//!
//! ```
//! # use swatch::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.store().file_extension(), "style");
//! assert!(!config.store().trace_loading());
//! ```

use std::path::PathBuf;

use serde::Deserialize;

use crate::resources::ResourceBundle;

/// Top-level configuration combining store and resource settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Store configuration section.
    #[serde(default)]
    store: StoreConfig,

    /// Resource lookup section.
    #[serde(default)]
    resources: ResourceConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(store: StoreConfig, resources: ResourceConfig) -> Self {
        Self { store, resources }
    }

    /// Returns the store configuration.
    pub fn store(&self) -> &StoreConfig {
        &self.store
    }

    /// Returns the resource configuration.
    pub fn resources(&self) -> &ResourceConfig {
        &self.resources
    }
}

/// Settings that affect how style files are loaded into a store.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Log every merged assignment at debug level.
    #[serde(default)]
    trace_loading: bool,

    /// Extension appended to style names when reading from a bundle.
    #[serde(default = "default_file_extension")]
    file_extension: String,
}

fn default_file_extension() -> String {
    "style".to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            trace_loading: false,
            file_extension: default_file_extension(),
        }
    }
}

impl StoreConfig {
    pub fn new(trace_loading: bool, file_extension: impl Into<String>) -> Self {
        Self {
            trace_loading,
            file_extension: file_extension.into(),
        }
    }

    pub fn trace_loading(&self) -> bool {
        self.trace_loading
    }

    /// Extension without the leading dot, `style` by default.
    pub fn file_extension(&self) -> &str {
        &self.file_extension
    }
}

/// Directories searched, in order, for style files and images.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResourceConfig {
    #[serde(default)]
    directories: Vec<PathBuf>,
}

impl ResourceConfig {
    pub fn new(directories: Vec<PathBuf>) -> Self {
        Self { directories }
    }

    pub fn directories(&self) -> &[PathBuf] {
        &self.directories
    }

    /// Builds a [`ResourceBundle`] over the configured directories.
    pub fn bundle(&self) -> ResourceBundle {
        ResourceBundle::new(self.directories.clone())
    }
}
