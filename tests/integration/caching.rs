//! Cache behavior observed through the evaluator

use crate::integration::test_utils::{buffers_host, tabbed_host};
use std::cell::Cell;
use std::sync::Arc;
use vimseg::cache::{FocusGatedCache, FocusLookup, MutationKeyedCache};
use vimseg::context::{BufNr, EditorMode, WindowId};
use vimseg::host::snapshot::{SnapshotBuffer, SnapshotHost, SnapshotText};
use vimseg::host::Viewport;
use vimseg::{Context, Fragment, Mode, SegmentName, Segments};

#[test]
fn test_mutation_cache_computes_once_per_counter() {
    let cache: MutationKeyedCache<BufNr, String> = MutationKeyedCache::new();
    let calls = Cell::new(0);
    let compute = |label: &str| {
        calls.set(calls.get() + 1);
        label.to_string()
    };

    let first = cache.get_or_compute(BufNr(1), 3, || compute("a"));
    let again = cache.get_or_compute(BufNr(1), 3, || compute("b"));
    assert_eq!(calls.get(), 1);
    assert!(Arc::ptr_eq(&first, &again));

    let next = cache.get_or_compute(BufNr(1), 4, || compute("c"));
    assert_eq!(calls.get(), 2);
    assert_eq!(next.as_str(), "c");
}

#[test]
fn test_focus_gate_never_calls_compute_when_unfocused() {
    let cache: FocusGatedCache<u32> = FocusGatedCache::new();
    let window = Some(WindowId(7));
    let a = cache.guarded(window, true, || 1);
    assert_eq!(a, FocusLookup::Computed(Arc::new(1)));

    let stale = cache.guarded(window, false, || panic!("compute must not run"));
    assert_eq!(stale.value(), Some(&1));
    assert_eq!(
        cache.guarded(Some(WindowId(8)), false, || panic!("compute must not run")),
        FocusLookup::Unseen
    );
}

#[test]
fn test_trailing_whitespace_tracks_change_tick() {
    let mut host = SnapshotHost::single(SnapshotBuffer::new(1, Some("/w/a.txt"), &["ok", "bad "]));
    let segments = Segments::default();
    let ctx = Context::current(&host, Mode::Editor(EditorMode::Insert)).unwrap();

    let contents = |host: &SnapshotHost| {
        segments
            .evaluate(host, SegmentName::TrailingWhitespace, &ctx)
            .map(|f| f.contents())
    };
    assert_eq!(contents(&host), Some("2".to_string()));

    host.buffer_mut(1).unwrap().set_line(1, SnapshotText::from("bad"));
    assert_eq!(contents(&host), None);

    host.buffer_mut(1).unwrap().set_line(0, SnapshotText::from("ok\t"));
    assert_eq!(contents(&host), Some("1".to_string()));
    assert_eq!(
        segments.caches().trailing_whitespace.stored_counter(&BufNr(1)),
        Some(3)
    );
}

#[test]
fn test_position_frozen_for_other_tabs() {
    let mut host = tabbed_host(2, 1);
    for buffer in host.buffers.iter_mut() {
        buffer.lines = (1..=100).map(|i| SnapshotText::Text(format!("{}", i))).collect();
    }
    host.window_mut(1001).unwrap().viewport = Some(Viewport { first: 61, last: 100 });
    let segments = Segments::default();
    let focused = Context::current(&host, Mode::Editor(EditorMode::Normal)).unwrap();

    assert_eq!(
        segments.evaluate(&host, SegmentName::Position, &focused),
        Some(Fragment::text("Bot"))
    );

    host.window_mut(1001).unwrap().viewport = Some(Viewport { first: 1, last: 40 });
    let listed = segments.evaluate_listed(
        &host,
        vimseg::fanout::Lister::Tabs,
        SegmentName::Position,
        &focused,
    );
    assert_eq!(listed.len(), 2);
    // the current tab counts as focused and is refreshed
    assert_eq!(listed[0].mode(), Mode::Tab);
    assert_eq!(listed[0].fragment, Some(Fragment::text("Top")));
    // tab 2's window was never focused
    assert_eq!(listed[1].mode(), Mode::NotCurrent);
    assert_eq!(listed[1].fragment, None);

    // scrolled again while unfocused: the last focused value is kept
    host.window_mut(1001).unwrap().viewport = Some(Viewport { first: 61, last: 100 });
    assert_eq!(
        segments.evaluate(&host, SegmentName::Position, &focused.with_mode(Mode::NotCurrent)),
        Some(Fragment::text("Top"))
    );
}

#[test]
fn test_virtcol_refreshes_while_focused() {
    let mut host = buffers_host(&[1]);
    let segments = Segments::default();
    let ctx = Context::current(&host, Mode::Editor(EditorMode::Normal)).unwrap();

    host.window_mut(1001).unwrap().virtual_column = Some(4);
    let first = segments.evaluate(&host, SegmentName::VirtcolCurrent, &ctx).unwrap();
    host.window_mut(1001).unwrap().virtual_column = Some(12);
    let second = segments.evaluate(&host, SegmentName::VirtcolCurrent, &ctx).unwrap();

    assert_eq!(first.contents(), "4");
    assert_eq!(second.contents(), "12");
}

#[test]
fn test_absent_file_name_writes_no_cache() {
    let host = SnapshotHost::single(SnapshotBuffer::new(1, None, &["text"]));
    let segments = Segments::default();
    let ctx = Context::current(&host, Mode::Editor(EditorMode::Normal)).unwrap();

    for _ in 0..2 {
        assert_eq!(segments.evaluate(&host, SegmentName::FileName, &ctx), None);
        assert_eq!(segments.evaluate(&host, SegmentName::FileDirectory, &ctx), None);
        assert_eq!(segments.evaluate(&host, SegmentName::Branch, &ctx), None);
    }
    let caches = segments.caches();
    assert!(caches.trailing_whitespace.is_empty());
    assert!(caches.file_size.is_empty());
    assert!(caches.position.is_empty());
    assert!(caches.virtcol_current.is_empty());
}
