//! Segment Caches
//!
//! Two caches keep expensive per-redraw queries off the hot path:
//! [`MutationKeyedCache`] for whole-buffer scans keyed on the buffer's change
//! tick, and [`FocusGatedCache`] for per-window values that are only refreshed
//! while the window has focus.
//!
//! Caches are explicit objects owned by the caller (normally one
//! [`SegmentCaches`] per process) rather than hidden module state.

pub mod focus;
pub mod mutation;

pub use focus::{FocusGatedCache, FocusLookup};
pub use mutation::MutationKeyedCache;

use crate::context::BufNr;
use crate::fragment::Fragment;

/// Cached segment result; `None` is a cached absence
pub type CachedFragment = Option<Fragment>;

/// The caches used by the built-in segments
#[derive(Debug, Default)]
pub struct SegmentCaches {
    pub trailing_whitespace: MutationKeyedCache<BufNr, CachedFragment>,
    pub file_size: FocusGatedCache<CachedFragment>,
    pub position: FocusGatedCache<CachedFragment>,
    pub virtcol_current: FocusGatedCache<CachedFragment>,
}

impl SegmentCaches {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop everything cached for a wiped-out buffer
    pub fn forget_buffer(&self, bufnr: BufNr) {
        self.trailing_whitespace.invalidate(&bufnr);
    }
}
