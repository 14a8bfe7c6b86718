//! Property-based tests for the segment caches

use proptest::prelude::*;
use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::Arc;
use vimseg::cache::{FocusGatedCache, MutationKeyedCache};
use vimseg::context::{BufNr, WindowId};

/// compute runs exactly once per (buffer, distinct consecutive counter), and
/// a repeated counter returns the stored Arc
#[test]
fn test_mutation_cache_compute_count_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &proptest::collection::vec((0u32..4, 0u64..3), 1..60),
            |calls| {
                let cache: MutationKeyedCache<BufNr, (u32, u64)> = MutationKeyedCache::new();
                let computed = RefCell::new(0usize);
                let mut last_seen: HashMap<u32, (u64, Arc<(u32, u64)>)> = HashMap::new();
                let mut expected = 0usize;

                for (buffer, counter) in calls {
                    let value = cache.get_or_compute(BufNr(buffer), counter, || {
                        *computed.borrow_mut() += 1;
                        (buffer, counter)
                    });
                    match last_seen.get(&buffer) {
                        Some((stored, previous)) if *stored == counter => {
                            prop_assert!(Arc::ptr_eq(previous, &value));
                        }
                        _ => expected += 1,
                    }
                    prop_assert_eq!(*value, (buffer, counter));
                    last_seen.insert(buffer, (counter, value));
                }

                prop_assert_eq!(*computed.borrow(), expected);
                prop_assert_eq!(cache.len(), last_seen.len());
                Ok(())
            },
        )
        .unwrap();
}

/// Unfocused lookups always return the value of the latest focused lookup
#[test]
fn test_focus_cache_staleness_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &proptest::collection::vec((0i64..3, any::<bool>(), any::<u16>()), 1..60),
            |calls| {
                let cache: FocusGatedCache<u16> = FocusGatedCache::new();
                let mut latest: HashMap<i64, u16> = HashMap::new();

                for (window, focused, fresh) in calls {
                    let lookup = cache.guarded(Some(WindowId(window)), focused, || fresh);
                    if focused {
                        latest.insert(window, fresh);
                        prop_assert_eq!(lookup.value(), Some(&fresh));
                    } else {
                        prop_assert_eq!(lookup.value(), latest.get(&window));
                    }
                }
                Ok(())
            },
        )
        .unwrap();
}
