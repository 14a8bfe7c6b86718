//! Cache keyed by a host-supplied mutation counter.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;
use tracing::trace;

struct CacheEntry<V> {
    counter: u64,
    value: Arc<V>,
}

/// Per-key cache invalidated by a strictly increasing counter
///
/// An entry is valid while the counter it was computed at equals the
/// counter supplied at lookup. Entries live until [`invalidate`] is called;
/// the key space is bounded by the buffers seen during the session.
///
/// [`invalidate`]: MutationKeyedCache::invalidate
pub struct MutationKeyedCache<K, V> {
    entries: Mutex<HashMap<K, CacheEntry<V>>>,
}

impl<K, V> Default for MutationKeyedCache<K, V> {
    fn default() -> Self {
        MutationKeyedCache {
            entries: Mutex::new(HashMap::new()),
        }
    }
}

impl<K, V> fmt::Debug for MutationKeyedCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MutationKeyedCache")
            .field("entries", &self.entries.lock().len())
            .finish()
    }
}

impl<K, V> MutationKeyedCache<K, V>
where
    K: Eq + Hash + fmt::Debug,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the value stored for `key` at `counter`, computing and storing
    /// it first if the entry is missing or was computed at another counter.
    ///
    /// `compute` runs without the cache lock held.
    pub fn get_or_compute<F>(&self, key: K, counter: u64, compute: F) -> Arc<V>
    where
        F: FnOnce() -> V,
    {
        {
            let entries = self.entries.lock();
            if let Some(entry) = entries.get(&key).filter(|e| e.counter == counter) {
                trace!(?key, counter, "mutation cache hit");
                return Arc::clone(&entry.value);
            }
        }

        trace!(?key, counter, "mutation cache miss");
        let value = Arc::new(compute());
        self.entries.lock().insert(
            key,
            CacheEntry {
                counter,
                value: Arc::clone(&value),
            },
        );
        value
    }

    /// Counter the stored entry for `key` was computed at
    pub fn stored_counter(&self, key: &K) -> Option<u64> {
        self.entries.lock().get(key).map(|e| e.counter)
    }

    /// Remove the entry for `key`; returns whether one existed
    pub fn invalidate(&self, key: &K) -> bool {
        self.entries.lock().remove(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}
