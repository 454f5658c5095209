use std::{fs, path::PathBuf};

use tempfile::tempdir;

use swatch_cli::{Args, render};

fn styles_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("styles")
}

/// Collects all .style files from a directory
fn collect_style_files(dir: PathBuf) -> Vec<PathBuf> {
    let mut files = if let Ok(entries) = fs::read_dir(&dir) {
        entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("style")
            })
            .collect()
    } else {
        Vec::new()
    };

    // Sort for consistent test output
    files.sort();
    files
}

fn args(files: &[PathBuf]) -> Args {
    Args {
        files: files
            .iter()
            .map(|path| path.to_string_lossy().to_string())
            .collect(),
        styles: Vec::new(),
        keys: Vec::new(),
        config: None,
        log_level: "off".to_string(),
    }
}

#[test]
fn e2e_smoke_test_sample_styles() {
    let dir = styles_dir();
    let report = render(&args(&[dir.join("base.style"), dir.join("dark.style")]))
        .expect("Sample styles should load");

    assert!(report.contains("mainView.backgroundColor = %(28, 28, 30)\n"));
    assert!(report.contains("mainView.cell.width = #(96)\n"));
    assert!(report.contains("mainView.header.frame = R(16, 0, 288, 44)\n"));
    assert!(report.contains("accentColor = %(28, 28, 30)\n"));
    assert!(report.contains("mainView.cell.background = IMAGE(cell-background, 4, 8, 4, 8)\n"));
}

#[test]
fn e2e_smoke_test_selected_keys() {
    let dir = styles_dir();
    let mut args = args(&[dir.join("base.style")]);
    args.keys = vec![
        "mainView.header.subtitleFont".to_string(),
        "screen.width".to_string(),
    ];

    let report = render(&args).expect("Sample style should load");
    assert_eq!(
        report,
        "mainView.header.subtitleFont = FONT(Subheadline)\nscreen.width = #(320)\n"
    );

    args.keys = vec!["mainView.header.missing".to_string()];
    assert!(render(&args).is_err());
}

#[test]
fn e2e_smoke_test_each_sample_loads_alone() {
    let samples = collect_style_files(styles_dir());
    assert!(!samples.is_empty(), "No sample styles found in styles/");

    // dark.style refers to nothing outside itself, so each file loads alone
    let mut failed = Vec::new();
    for sample in &samples {
        if let Err(err) = render(&args(std::slice::from_ref(sample))) {
            failed.push((sample.clone(), err));
        }
    }

    if !failed.is_empty() {
        for (path, err) in &failed {
            eprintln!("  - {}: {}", path.display(), err);
        }
        panic!("{} sample style(s) failed unexpectedly", failed.len());
    }
}

#[test]
fn e2e_smoke_test_error_styles() {
    let error_styles = collect_style_files(styles_dir().join("errors"));

    assert!(
        !error_styles.is_empty(),
        "No error styles found in styles/errors/"
    );

    let mut unexpectedly_succeeded = Vec::new();

    for path in &error_styles {
        if render(&args(std::slice::from_ref(path))).is_ok() {
            unexpectedly_succeeded.push(path.clone());
        }
    }

    if !unexpectedly_succeeded.is_empty() {
        eprintln!("\nError styles that unexpectedly succeeded:");
        for path in &unexpectedly_succeeded {
            eprintln!("  - {}", path.display());
        }
        panic!(
            "{} error style(s) succeeded unexpectedly",
            unexpectedly_succeeded.len()
        );
    }
}

#[test]
fn e2e_smoke_test_named_styles_from_config() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("config.toml");
    fs::write(
        &config_path,
        format!(
            "[resources]\ndirectories = [{:?}]\n",
            styles_dir().to_string_lossy()
        ),
    )
    .unwrap();

    let overrides = temp_dir.path().join("overrides.style");
    fs::write(&overrides, "screen {\n    width = #(@screen.width * 2)\n}\n").unwrap();

    let mut args = args(&[overrides]);
    args.styles = vec!["base".to_string()];
    args.keys = vec!["screen.width".to_string()];
    args.config = Some(config_path.to_string_lossy().to_string());

    let report = render(&args).expect("Named style and override should load");
    assert_eq!(report, "screen.width = #(640)\n");
}
