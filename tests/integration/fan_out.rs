//! Fan-out ordering, weights and lister selection

use crate::integration::test_utils::{buffers_host, tabbed_host};
use vimseg::context::{BufNr, EditorMode, TabNr};
use vimseg::fanout::{fan_out_auto, fan_out_buffers, fan_out_tabs, FanOutEntry, Lister};
use vimseg::host::snapshot::{SnapshotBuffer, SnapshotTab};
use vimseg::{Context, Mode};

fn modes(entries: &[FanOutEntry]) -> Vec<Mode> {
    entries.iter().map(|e| e.overrides.mode).collect()
}

fn weights(entries: &[FanOutEntry]) -> Vec<f64> {
    entries
        .iter()
        .map(|e| (e.overrides.priority_multiplier * 1000.0).round() / 1000.0)
        .collect()
}

#[test]
fn test_tab_fan_out_weights_and_modes() {
    let host = tabbed_host(3, 2);
    let base = Context::current(&host, Mode::Editor(EditorMode::Normal)).unwrap();

    let entries = fan_out_tabs(&host, &base);
    let tabs: Vec<Option<TabNr>> = entries.iter().map(|e| e.context.tabnr).collect();
    assert_eq!(tabs, vec![Some(TabNr(1)), Some(TabNr(2)), Some(TabNr(3))]);
    assert_eq!(weights(&entries), vec![1.001, 1.000, 1.001]);
    assert_eq!(modes(&entries), vec![Mode::NotCurrent, Mode::Tab, Mode::NotCurrent]);
}

#[test]
fn test_fan_out_leaves_base_context_untouched() {
    let host = tabbed_host(3, 2);
    let base = Context::current(&host, Mode::Editor(EditorMode::Insert)).unwrap();
    let before = base.clone();

    let entries = fan_out_tabs(&host, &base);
    assert_eq!(base, before);
    for entry in &entries {
        assert_eq!(entry.context.mode, Mode::Editor(EditorMode::Insert));
        assert_eq!(entry.context.priority_multiplier, 1.0);
    }
}

#[test]
fn test_auto_uses_buffers_with_single_tab() {
    let mut host = buffers_host(&[1, 2, 3]);
    host.tabs.push(SnapshotTab {
        number: 1,
        window: host.current_window,
    });
    let base = Context::current(&host, Mode::Editor(EditorMode::Normal)).unwrap();

    let auto = fan_out_auto(&host, &base);
    assert_eq!(auto, fan_out_buffers(&host, &base));
    assert_eq!(modes(&auto), vec![Mode::Buf, Mode::NotCurrent, Mode::NotCurrent]);
    let buffers: Vec<BufNr> = auto.iter().map(|e| e.context.bufnr).collect();
    assert_eq!(buffers, vec![BufNr(1), BufNr(2), BufNr(3)]);
    assert_eq!(weights(&auto), vec![1.000, 1.001, 1.002]);
}

#[test]
fn test_auto_uses_tabs_with_two_tabs() {
    let mut host = tabbed_host(2, 1);
    for n in 3..=6 {
        host.buffers.push(SnapshotBuffer::new(n, None, &[""]));
    }
    let base = Context::current(&host, Mode::Editor(EditorMode::Normal)).unwrap();

    let auto = fan_out_auto(&host, &base);
    assert_eq!(auto, fan_out_tabs(&host, &base));
    assert_eq!(auto.len(), 2);
    assert_eq!(modes(&auto), vec![Mode::Tab, Mode::NotCurrent]);
}

#[test]
fn test_buffer_fan_out_keeps_host_order() {
    let host = buffers_host(&[7, 2, 5]);
    let base = Context::current(&host, Mode::Editor(EditorMode::Normal)).unwrap();

    let entries = fan_out_buffers(&host, &base);
    let buffers: Vec<BufNr> = entries.iter().map(|e| e.context.bufnr).collect();
    assert_eq!(buffers, vec![BufNr(7), BufNr(2), BufNr(5)]);
    assert_eq!(weights(&entries), vec![1.000, 1.005, 1.002]);
    assert!(entries.iter().all(|e| e.context.window.is_none()));
}

#[test]
fn test_tab_fan_out_empty_without_tab_support() {
    let host = buffers_host(&[1, 2]);
    let base = Context::current(&host, Mode::Editor(EditorMode::Normal)).unwrap();
    assert!(fan_out_tabs(&host, &base).is_empty());
    assert_eq!(Lister::Auto.fan_out(&host, &base).len(), 2);
}

#[test]
fn test_lister_names() {
    assert_eq!("tablister".parse::<Lister>().unwrap(), Lister::Tabs);
    assert_eq!("buffers".parse::<Lister>().unwrap(), Lister::Buffers);
    assert!("windows".parse::<Lister>().is_err());
}
