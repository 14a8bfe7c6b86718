//! Property-based tests for fan-out ordering and weights

use proptest::prelude::*;
use vimseg::context::{BufNr, BufferHandle, BufferInfo, EditorMode};
use vimseg::fanout::{fan_out, PRIORITY_STEP};
use vimseg::{Context, Mode};

fn buffer(n: u32) -> BufferInfo {
    BufferInfo {
        handle: BufferHandle(n as u64),
        number: BufNr(n),
    }
}

#[test]
fn test_buffer_fan_out_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &(proptest::collection::btree_set(1u32..500, 1..20), any::<prop::sample::Index>()),
            |(numbers, pick)| {
                let items: Vec<BufferInfo> = numbers.iter().copied().map(buffer).collect();
                let current = items[pick.index(items.len())].clone();
                let base = Context::for_buffer_only(current.clone(), Mode::Editor(EditorMode::Normal));

                let entries = fan_out(&base, &items, &current);
                prop_assert_eq!(entries.len(), items.len());

                let mut current_count = 0;
                for (entry, item) in entries.iter().zip(&items) {
                    prop_assert_eq!(entry.context.bufnr, item.number);
                    let distance = item.number.0.abs_diff(current.number.0) as f64;
                    let expected = 1.0 + PRIORITY_STEP * distance;
                    prop_assert!((entry.overrides.priority_multiplier - expected).abs() < 1e-9);
                    if entry.overrides.mode == Mode::Buf {
                        current_count += 1;
                        prop_assert_eq!(item.number, current.number);
                    } else {
                        prop_assert_eq!(entry.overrides.mode, Mode::NotCurrent);
                    }
                }
                prop_assert_eq!(current_count, 1);
                Ok(())
            },
        )
        .unwrap();
}
