//! Trailing whitespace detection.
//!
//! Scanning the whole buffer on every redraw is too slow in insert mode, so
//! results are cached per buffer on its change tick.

use crate::cache::{CachedFragment, MutationKeyedCache};
use crate::context::{BufNr, BufferHandle, Context};
use crate::error::HostError;
use crate::fragment::{Fragment, SegmentPart};
use crate::host::Host;
use crate::segments::absorb;
use crate::text::ends_with_whitespace;
use tracing::debug;

const SEGMENT: &str = "trailing_whitespace";

/// 1-based number of the first line whose last character is a space or tab.
///
/// Lines the host cannot decode are checked in their transliterated form.
pub fn first_trailing_whitespace(
    host: &dyn Host,
    buffer: BufferHandle,
) -> Result<Option<usize>, HostError> {
    let count = host.line_count(buffer)?;
    for index in 0..count {
        let line = match host.buffer_line(buffer, index) {
            Ok(line) => line,
            Err(HostError::Decode { .. }) => {
                debug!(line = index + 1, "undecodable line, checking transliterated form");
                host.buffer_line_transliterated(buffer, index)?
            }
            Err(e) => return Err(e),
        };
        if ends_with_whitespace(&line) {
            return Ok(Some(index + 1));
        }
    }
    Ok(None)
}

/// Line number of the first trailing whitespace, cached on the change tick
pub fn trailing_whitespace(
    host: &dyn Host,
    ctx: &Context,
    cache: &MutationKeyedCache<BufNr, CachedFragment>,
) -> Option<Fragment> {
    let tick = absorb(SEGMENT, host.changedtick(ctx.buffer))?;
    let cached = cache.get_or_compute(ctx.bufnr, tick, || {
        let line = absorb(SEGMENT, first_trailing_whitespace(host, ctx.buffer))??;
        Some(Fragment::part(
            SegmentPart::new(line.to_string()).with_groups(["trailing_whitespace", "warning"]),
        ))
    });
    (*cached).clone()
}
