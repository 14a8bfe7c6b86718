//! Cache refreshed only while its window has focus.

use crate::context::WindowId;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::trace;

/// Outcome of a focus-gated lookup
#[derive(Debug, PartialEq)]
pub enum FocusLookup<V> {
    /// Computed now, the window has focus
    Computed(Arc<V>),
    /// Last value computed while the window had focus
    Stale(Arc<V>),
    /// The window has never been computed while focused
    Unseen,
}

impl<V> FocusLookup<V> {
    pub fn value(&self) -> Option<&V> {
        match self {
            FocusLookup::Computed(v) | FocusLookup::Stale(v) => Some(v),
            FocusLookup::Unseen => None,
        }
    }

    pub fn into_value(self) -> Option<Arc<V>> {
        match self {
            FocusLookup::Computed(v) | FocusLookup::Stale(v) => Some(v),
            FocusLookup::Unseen => None,
        }
    }
}

/// Per-window cache keyed by stable window identity
///
/// Windows without an identity share the `None` slot.
pub struct FocusGatedCache<V> {
    entries: Mutex<HashMap<Option<WindowId>, Arc<V>>>,
}

impl<V> Default for FocusGatedCache<V> {
    fn default() -> Self {
        FocusGatedCache {
            entries: Mutex::new(HashMap::new()),
        }
    }
}

impl<V> fmt::Debug for FocusGatedCache<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FocusGatedCache")
            .field("windows", &self.entries.lock().len())
            .finish()
    }
}

impl<V> FocusGatedCache<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recompute and store when focused; otherwise return the stored value
    /// without calling `compute`.
    pub fn guarded<F>(&self, window: Option<WindowId>, is_focused: bool, compute: F) -> FocusLookup<V>
    where
        F: FnOnce() -> V,
    {
        if !is_focused {
            return match self.entries.lock().get(&window) {
                Some(value) => FocusLookup::Stale(Arc::clone(value)),
                None => {
                    trace!(?window, "focus cache has no value for unfocused window");
                    FocusLookup::Unseen
                }
            };
        }

        let value = Arc::new(compute());
        self.entries.lock().insert(window, Arc::clone(&value));
        FocusLookup::Computed(value)
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}
