//! Command-line argument definitions for the Swatch CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments select the style files to load, the keys to
//! print, the configuration file and logging verbosity.

use clap::Parser;

/// Command-line arguments for the Swatch style tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Style files to load, in order; later files override earlier ones
    #[arg(required_unless_present = "styles", help = "Paths to the style files")]
    pub files: Vec<String>,

    /// Named styles read from the configured resource directories,
    /// loaded before FILES
    #[arg(short, long = "style", value_name = "NAME")]
    pub styles: Vec<String>,

    /// Print only these key paths (repeatable)
    #[arg(short, long = "key", value_name = "PATH")]
    pub keys: Vec<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
