//! The bundled demo session, loaded from disk the way the CLI loads it

use crate::integration::test_utils::{demo_snapshot_path, ENV_MUTEX};
use vimseg::cli::{Cli, Commands, RunContext};
use vimseg::context::{BufNr, EditorMode, TabNr};
use vimseg::fanout::Lister;
use vimseg::{Context, Fragment, Mode, SegmentName, Segments, SnapshotHost};

fn demo() -> (SnapshotHost, Context) {
    let host = SnapshotHost::load(demo_snapshot_path()).unwrap();
    let ctx = Context::current(&host, Mode::Editor(EditorMode::Normal)).unwrap();
    (host, ctx)
}

#[test]
fn test_demo_current_context() {
    let (_, ctx) = demo();
    assert_eq!(ctx.bufnr, BufNr(1));
    assert_eq!(ctx.tabnr, Some(TabNr(1)));
}

#[test]
fn test_demo_file_segments() {
    let (host, ctx) = demo();
    let segments = Segments::default();
    let eval = |name| segments.evaluate(&host, name, &ctx).map(|f: Fragment| f.contents());

    assert_eq!(eval(SegmentName::FileDirectory), Some("src/".to_string()));
    assert_eq!(eval(SegmentName::FileName), Some("lib.rs".to_string()));
    assert_eq!(eval(SegmentName::FileType), Some("rust".to_string()));
    assert_eq!(eval(SegmentName::ModifiedIndicator), Some("+".to_string()));
    assert_eq!(eval(SegmentName::TrailingWhitespace), Some("2".to_string()));
    assert_eq!(eval(SegmentName::Position), Some("All".to_string()));
    assert_eq!(eval(SegmentName::ColCurrent), Some("9".to_string()));
    assert_eq!(eval(SegmentName::PasteIndicator), None);
    assert_eq!(eval(SegmentName::ModifiedBuffers), Some("+ 1".to_string()));
}

#[test]
fn test_demo_listed_window_titles() {
    let (host, ctx) = demo();
    let segments = Segments::default();
    let listed = segments.evaluate_listed(&host, Lister::Auto, SegmentName::WindowTitle, &ctx);

    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].fragment, None);
    assert_eq!(listed[1].fragment, Some(Fragment::text(":grep todo")));
    assert_eq!(listed[1].mode(), Mode::NotCurrent);
}

#[test]
fn test_cli_render_json() {
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    let snapshot = demo_snapshot_path();
    let temp = tempfile::tempdir().unwrap();
    let cli = <Cli as clap::Parser>::try_parse_from([
        "vimseg",
        "--workspace",
        temp.path().to_str().unwrap(),
        "render",
        "--snapshot",
        snapshot.to_str().unwrap(),
        "--format",
        "json",
        "file_name",
        "branch",
    ])
    .unwrap();
    let context = RunContext::new(cli.workspace.clone(), cli.config.clone()).unwrap();

    let output = context.execute(&cli.command).unwrap();
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(value[0]["fragment"], "lib.rs");
    assert!(value[1]["fragment"].is_null());
}

#[test]
fn test_cli_rejects_unknown_segment() {
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    let temp = tempfile::tempdir().unwrap();
    let context = RunContext::new(temp.path().to_path_buf(), None).unwrap();
    let command = Commands::Render {
        snapshot: demo_snapshot_path(),
        mode: "n".to_string(),
        format: vimseg::cli::OutputFormat::Text,
        segments: vec!["clock".to_string()],
    };
    let err = context.execute(&command).unwrap_err();
    assert_eq!(err.to_string(), "Unknown segment: clock");
}

#[test]
fn test_cli_list_text_table() {
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    let temp = tempfile::tempdir().unwrap();
    let context = RunContext::new(temp.path().to_path_buf(), None).unwrap();
    let command = Commands::List {
        snapshot: demo_snapshot_path(),
        lister: "tabs".to_string(),
        mode: "n".to_string(),
        format: vimseg::cli::OutputFormat::Text,
        segment: "file_name".to_string(),
    };
    let output = context.execute(&command).unwrap();
    assert!(output.contains("lib.rs"));
    assert!(output.contains("todo.md"));
    assert!(output.contains("1.001"));
}
