//! Integration tests for Configuration System

use crate::integration::test_utils::ENV_MUTEX;
use std::path::Path;
use tempfile::TempDir;
use vimseg::config::{ConfigLoader, ValidationError, WORKSPACE_CONFIG_FILE};
use vimseg::context::EditorMode;
use vimseg::host::snapshot::{SnapshotBuffer, SnapshotHost};
use vimseg::{Context, Fragment, Mode, SegmentName, Segments};

/// Run `f` with no global config and the given environment variables set
fn isolated<T>(vars: &[(&str, &str)], f: impl FnOnce() -> T) -> T {
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    let saved: Vec<(String, Option<std::ffi::OsString>)> = ["HOME", "XDG_CONFIG_HOME"]
        .iter()
        .map(|k| k.to_string())
        .chain(vars.iter().map(|(k, _)| k.to_string()))
        .map(|k| {
            let v = std::env::var_os(&k);
            (k, v)
        })
        .collect();

    std::env::remove_var("HOME");
    std::env::remove_var("XDG_CONFIG_HOME");
    for (key, value) in vars {
        std::env::set_var(key, value);
    }
    let result = f();

    for (key, value) in saved {
        match value {
            Some(v) => std::env::set_var(&key, v),
            None => std::env::remove_var(&key),
        }
    }
    result
}

fn write_workspace_config(root: &Path, contents: &str) {
    std::fs::write(root.join(WORKSPACE_CONFIG_FILE), contents).unwrap();
}

#[test]
fn test_workspace_config_drives_segments() {
    let temp_dir = TempDir::new().unwrap();
    write_workspace_config(
        temp_dir.path(),
        r#"
[segments.file_name]
display_no_file = true
no_file_text = "[scratch]"

[segments.mode.override]
n = "NRM"
"#,
    );
    let config = isolated(&[], || ConfigLoader::load(temp_dir.path())).unwrap();
    assert!(config.validate().is_ok());

    let host = SnapshotHost::single(SnapshotBuffer::new(1, None, &[""]));
    let ctx = Context::current(&host, Mode::Editor(EditorMode::Normal)).unwrap();
    let segments = Segments::new(config.segments);

    assert_eq!(
        segments.evaluate(&host, SegmentName::Mode, &ctx),
        Some(Fragment::text("NRM"))
    );
    let no_file = segments.evaluate(&host, SegmentName::FileName, &ctx).unwrap();
    assert_eq!(no_file.contents(), "[scratch]");
}

#[test]
fn test_environment_overrides_workspace_file() {
    let temp_dir = TempDir::new().unwrap();
    write_workspace_config(
        temp_dir.path(),
        r#"
[segments.position]
gradient = false
"#,
    );
    let config = isolated(&[("VIMSEG__SEGMENTS__POSITION__GRADIENT", "true")], || {
        ConfigLoader::load(temp_dir.path())
    })
    .unwrap();
    assert!(config.segments.position.gradient);
}

#[test]
fn test_invalid_workspace_config_reports_every_problem() {
    let temp_dir = TempDir::new().unwrap();
    write_workspace_config(
        temp_dir.path(),
        r#"
[segments.mode.override]
nope = "?"

[segments.position.position_strings]
all = ""

[logging]
level = "chatty"
"#,
    );
    let config = isolated(&[], || ConfigLoader::load(temp_dir.path())).unwrap();
    let errors = config.validate().unwrap_err();
    assert_eq!(errors.len(), 3);
    assert!(errors
        .iter()
        .any(|e| matches!(e, ValidationError::Logging(msg) if msg.contains("chatty"))));
}

#[test]
fn test_malformed_config_file_is_an_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("broken.toml");
    std::fs::write(&path, "[segments.position]\ngradient = \"sometimes\"\n").unwrap();
    assert!(ConfigLoader::load_from_file(&path).is_err());
}

fn mode_label(segments: &Segments, mode: EditorMode) -> Option<Fragment> {
    let host = SnapshotHost::single(SnapshotBuffer::new(1, Some("a.txt"), &[""]));
    let ctx = Context::current(&host, Mode::Editor(mode)).unwrap();
    segments.evaluate(&host, SegmentName::Mode, &ctx)
}

#[test]
fn test_workspace_mode_overrides_keep_key_case() {
    let temp_dir = TempDir::new().unwrap();
    write_workspace_config(
        temp_dir.path(),
        r#"
[segments.mode.override]
V = "VLINE"
"^V" = "VBLOCK"
"#,
    );
    let config = isolated(&[], || ConfigLoader::load(temp_dir.path())).unwrap();
    assert!(config.validate().is_ok());

    let segments = Segments::new(config.segments);
    assert_eq!(
        mode_label(&segments, EditorMode::VisualLine),
        Some(Fragment::text("VLINE"))
    );
    assert_eq!(
        mode_label(&segments, EditorMode::VisualBlock),
        Some(Fragment::text("VBLOCK"))
    );
    assert_eq!(
        mode_label(&segments, EditorMode::Visual),
        Some(Fragment::text("VISUAL"))
    );
}

#[test]
fn test_explicit_file_distinguishes_mode_case() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("vimseg.toml");
    std::fs::write(
        &path,
        r#"
[segments.mode.override]
v = "vis"
V = "VIS-L"
R = "REPL"
"#,
    )
    .unwrap();
    let config = ConfigLoader::load_from_file(&path).unwrap();
    assert!(config.validate().is_ok());

    let segments = Segments::new(config.segments);
    assert_eq!(mode_label(&segments, EditorMode::Visual), Some(Fragment::text("vis")));
    assert_eq!(
        mode_label(&segments, EditorMode::VisualLine),
        Some(Fragment::text("VIS-L"))
    );
    assert_eq!(mode_label(&segments, EditorMode::Replace), Some(Fragment::text("REPL")));
    assert_eq!(
        mode_label(&segments, EditorMode::Prompt),
        Some(Fragment::text("PROMPT"))
    );
}

#[test]
fn test_environment_mode_override_beats_workspace_file() {
    let temp_dir = TempDir::new().unwrap();
    write_workspace_config(
        temp_dir.path(),
        r#"
[segments.mode.override]
n = "W-NORM"
V = "W-LINE"
"#,
    );
    let config = isolated(&[("VIMSEG__SEGMENTS__MODE__OVERRIDE__N", "E-NORM")], || {
        ConfigLoader::load(temp_dir.path())
    })
    .unwrap();

    let segments = Segments::new(config.segments);
    assert_eq!(
        mode_label(&segments, EditorMode::Normal),
        Some(Fragment::text("E-NORM"))
    );
    assert_eq!(
        mode_label(&segments, EditorMode::VisualLine),
        Some(Fragment::text("W-LINE"))
    );
}
