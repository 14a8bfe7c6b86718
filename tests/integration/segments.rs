//! Segment output through the evaluator

use std::collections::HashMap;
use vimseg::config::SegmentOptions;
use vimseg::context::EditorMode;
use vimseg::host::snapshot::{SnapshotBuffer, SnapshotHost};
use vimseg::host::{Cursor, OptionValue};
use vimseg::segments::LinePercentOptions;
use vimseg::{Context, Fragment, Mode, SegmentName, Segments};

fn hundred_lines() -> SnapshotHost {
    let lines: Vec<String> = (1..=100).map(|i| format!("line {}", i)).collect();
    let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
    SnapshotHost::single(SnapshotBuffer::new(1, Some("/w/long.txt"), &refs))
}

#[test]
fn test_line_percent_gradient_at_half() {
    let mut host = hundred_lines();
    host.window_mut(1000).unwrap().cursor = Cursor { line: 50, column: 0 };
    let options = SegmentOptions {
        line_percent: LinePercentOptions { gradient: true },
        ..SegmentOptions::default()
    };
    let segments = Segments::new(options);
    let ctx = Context::current(&host, Mode::Editor(EditorMode::Normal)).unwrap();

    let fragment = segments.evaluate(&host, SegmentName::LinePercent, &ctx).unwrap();
    let part = &fragment.parts().unwrap()[0];
    assert_eq!(part.contents, "50");
    assert_eq!(part.gradient_level, Some(50.0));

    let plain = Segments::default();
    assert_eq!(
        plain.evaluate(&host, SegmentName::LinePercent, &ctx),
        Some(Fragment::text("50"))
    );
}

#[test]
fn test_mode_override_falls_back_to_default_table() {
    let host = hundred_lines();
    let mut options = SegmentOptions::default();
    options.mode.overrides = HashMap::from([("i".to_string(), "INS".to_string())]);
    let segments = Segments::new(options);

    let insert = Context::current(&host, Mode::Editor(EditorMode::Insert)).unwrap();
    let normal = insert.with_mode(Mode::Editor(EditorMode::Normal));
    assert_eq!(
        segments.evaluate(&host, SegmentName::Mode, &insert),
        Some(Fragment::text("INS"))
    );
    assert_eq!(
        segments.evaluate(&host, SegmentName::Mode, &normal),
        Some(Fragment::text("NORMAL"))
    );
    assert_eq!(
        segments.evaluate(&host, SegmentName::Mode, &normal.with_mode(Mode::NotCurrent)),
        None
    );
}

#[test]
fn test_indicators_follow_options() {
    let mut host = hundred_lines();
    host.options
        .insert("paste".to_string(), OptionValue::from(true));
    host.buffer_mut(1)
        .unwrap()
        .options
        .insert("readonly".to_string(), OptionValue::from(true));
    let segments = Segments::default();
    let ctx = Context::current(&host, Mode::Editor(EditorMode::Normal)).unwrap();

    assert_eq!(
        segments.evaluate(&host, SegmentName::PasteIndicator, &ctx),
        Some(Fragment::text("PASTE"))
    );
    assert_eq!(
        segments.evaluate(&host, SegmentName::ReadonlyIndicator, &ctx),
        Some(Fragment::text("\u{e0a2}"))
    );
    assert_eq!(segments.evaluate(&host, SegmentName::ModifiedIndicator, &ctx), None);
}

#[test]
fn test_segments_never_mutate_context() {
    let host = hundred_lines();
    let segments = Segments::default();
    let ctx = Context::current(&host, Mode::Editor(EditorMode::Visual)).unwrap();
    let before = ctx.clone();
    for name in SegmentName::ALL {
        segments.evaluate(&host, name, &ctx);
    }
    assert_eq!(ctx, before);
}
