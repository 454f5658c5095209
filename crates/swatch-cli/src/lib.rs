//! Swatch CLI library
//!
//! This module contains the core CLI logic for the Swatch style tool: load
//! style files into one store and print the resulting values.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use log::info;

use swatch::{StyleStore, SwatchError};

/// Run the Swatch CLI application and print the report to stdout.
///
/// # Errors
///
/// Returns `SwatchError` for:
/// - File I/O and configuration errors
/// - Parse errors in any style file
/// - Requested keys that are not defined
pub fn run(args: &Args) -> Result<(), SwatchError> {
    let report = render(args)?;
    print!("{report}");
    Ok(())
}

/// Load everything `args` names and render the report as text.
///
/// Each line reads `path = literal`, with the literal in canonical form.
/// Without `--key`, every entry is listed in first-definition order.
pub fn render(args: &Args) -> Result<String, SwatchError> {
    let app_config = config::load_config(args.config.as_ref())?;
    let mut store = StyleStore::with_config(app_config.store().clone());

    if !args.styles.is_empty() {
        let bundle = app_config.resources().bundle();
        for name in &args.styles {
            info!(name; "Loading named style");
            store.load_style(name, &bundle)?;
        }
    }

    for file in &args.files {
        store.load_file(file)?;
    }

    info!(files = args.files.len(), entries = store.len(); "Styles loaded");

    let mut report = String::new();
    if args.keys.is_empty() {
        for (path, value) in store.entries() {
            report.push_str(&format!("{path} = {value}\n"));
        }
    } else {
        for key in &args.keys {
            let value = store.lookup(key)?;
            report.push_str(&format!("{key} = {value}\n"));
        }
    }

    Ok(report)
}
