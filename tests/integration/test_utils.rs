//! Shared test utilities for integration tests
//!
//! Builds snapshot hosts for the common session shapes used across the suite.

use std::path::PathBuf;
use std::sync::Mutex;
use vimseg::host::snapshot::{SnapshotBuffer, SnapshotHost, SnapshotTab, SnapshotWindow};

/// Serializes access to HOME / XDG_CONFIG_HOME across tests
pub static ENV_MUTEX: Mutex<()> = Mutex::new(());

/// One window per buffer number, window handles `1000 + n`; the first buffer is current
pub fn buffers_host(numbers: &[u32]) -> SnapshotHost {
    let mut host = SnapshotHost::single(SnapshotBuffer::new(
        numbers[0],
        Some(&format!("/work/file{}.txt", numbers[0])),
        &["first line"],
    ));
    host.windows.clear();
    host.buffers.clear();
    for &n in numbers {
        host.buffers.push(SnapshotBuffer::new(
            n,
            Some(&format!("/work/file{}.txt", n)),
            &["first line"],
        ));
    }
    host.windows
        .push(SnapshotWindow::new(1000 + numbers[0] as u64, 1, numbers[0]));
    host.current_window = 1000 + numbers[0] as u64;
    host
}

/// `tab_count` tab pages, tab `n` showing buffer `n` in window `1000 + n`
pub fn tabbed_host(tab_count: u32, current_tab: u32) -> SnapshotHost {
    let numbers: Vec<u32> = (1..=tab_count).collect();
    let mut host = buffers_host(&numbers);
    host.windows.clear();
    for n in 1..=tab_count {
        host.windows.push(SnapshotWindow::new(1000 + n as u64, 1, n));
        host.tabs.push(SnapshotTab {
            number: n,
            window: 1000 + n as u64,
        });
    }
    host.current_tab = Some(current_tab);
    host.current_window = 1000 + current_tab as u64;
    host
}

pub fn demo_snapshot_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("demos")
        .join("session.json")
}
