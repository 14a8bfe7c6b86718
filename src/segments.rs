//! Segment Functions
//!
//! Leaf queries that turn a [`Context`] into a fragment. Every segment takes
//! the context by reference, never fails, and returns `None` when the data
//! it needs is missing. Host failures are logged and absorbed here so that
//! nothing above a segment has to handle them.

pub mod file;
pub mod indicators;
pub mod mode;
pub mod position;
pub mod vcs;
pub mod whitespace;
pub mod window;

pub use file::{
    file_directory, file_encoding, file_format, file_name, file_size, file_type,
    FileDirectoryOptions, FileNameOptions, FileSizeOptions,
};
pub use indicators::{
    modified_indicator, paste_indicator, readonly_indicator, ModifiedIndicatorOptions,
    PasteIndicatorOptions, ReadonlyIndicatorOptions,
};
pub use mode::{mode, visual_range, ModeOptions};
pub use position::{
    col_current, line_count, line_current, line_percent, position, virtcol_current,
    LinePercentOptions, PositionOptions, PositionStrings, VirtcolOptions,
};
pub use vcs::{branch, file_vcs_status, BranchOptions};
pub use whitespace::trailing_whitespace;
pub use window::{modified_buffers, tabnr, window_title, ModifiedBuffersOptions, TabnrOptions};

use crate::cache::{CachedFragment, FocusGatedCache};
use crate::context::Context;
use crate::error::HostError;
use crate::fragment::Fragment;
use crate::host::Host;
use crate::text::transliterate;
use tracing::debug;

/// Divider group for the file metadata segments
pub const BACKGROUND_DIVIDER: &str = "background:divider";

/// Turn a host failure into an absent segment
pub(crate) fn absorb<T>(segment: &'static str, result: Result<T, HostError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            debug!(segment, error = %e, "host query failed, segment left empty");
            None
        }
    }
}

/// Decoded name of the context's buffer; `None` for unnamed buffers
pub(crate) fn buffer_name(host: &dyn Host, ctx: &Context, segment: &'static str) -> Option<String> {
    absorb(segment, host.buffer_name(ctx.buffer))?
        .filter(|name| !name.is_empty())
        .map(|name| transliterate(&name))
}

/// Run `compute` through a focus-gated cache keyed by the context's window.
///
/// A window never computed while focused yields an absent fragment.
pub(crate) fn focus_gated<F>(
    cache: &FocusGatedCache<CachedFragment>,
    ctx: &Context,
    compute: F,
) -> Option<Fragment>
where
    F: FnOnce() -> CachedFragment,
{
    cache
        .guarded(ctx.window_id, ctx.mode.is_focused(), compute)
        .into_value()
        .and_then(|value| (*value).clone())
}
