//! Segment Evaluator
//!
//! Binds segment names to their functions, options and caches so a renderer
//! only deals in names and contexts. Listed evaluation runs a fan-out first
//! and evaluates once per derived context.

use crate::cache::SegmentCaches;
use crate::config::SegmentOptions;
use crate::context::{BufNr, Context, Mode};
use crate::error::SegmentError;
use crate::fanout::Lister;
use crate::fragment::Fragment;
use crate::host::{Host, VcsBackend};
use crate::segments;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::trace;

/// Every built-in segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentName {
    Mode,
    VisualRange,
    ModifiedIndicator,
    ReadonlyIndicator,
    PasteIndicator,
    FileDirectory,
    FileName,
    FileSize,
    FileFormat,
    FileEncoding,
    FileType,
    WindowTitle,
    LinePercent,
    Position,
    LineCurrent,
    LineCount,
    ColCurrent,
    VirtcolCurrent,
    ModifiedBuffers,
    Branch,
    FileVcsStatus,
    TrailingWhitespace,
    Tabnr,
}

impl SegmentName {
    pub const ALL: [SegmentName; 23] = [
        SegmentName::Mode,
        SegmentName::VisualRange,
        SegmentName::ModifiedIndicator,
        SegmentName::ReadonlyIndicator,
        SegmentName::PasteIndicator,
        SegmentName::FileDirectory,
        SegmentName::FileName,
        SegmentName::FileSize,
        SegmentName::FileFormat,
        SegmentName::FileEncoding,
        SegmentName::FileType,
        SegmentName::WindowTitle,
        SegmentName::LinePercent,
        SegmentName::Position,
        SegmentName::LineCurrent,
        SegmentName::LineCount,
        SegmentName::ColCurrent,
        SegmentName::VirtcolCurrent,
        SegmentName::ModifiedBuffers,
        SegmentName::Branch,
        SegmentName::FileVcsStatus,
        SegmentName::TrailingWhitespace,
        SegmentName::Tabnr,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SegmentName::Mode => "mode",
            SegmentName::VisualRange => "visual_range",
            SegmentName::ModifiedIndicator => "modified_indicator",
            SegmentName::ReadonlyIndicator => "readonly_indicator",
            SegmentName::PasteIndicator => "paste_indicator",
            SegmentName::FileDirectory => "file_directory",
            SegmentName::FileName => "file_name",
            SegmentName::FileSize => "file_size",
            SegmentName::FileFormat => "file_format",
            SegmentName::FileEncoding => "file_encoding",
            SegmentName::FileType => "file_type",
            SegmentName::WindowTitle => "window_title",
            SegmentName::LinePercent => "line_percent",
            SegmentName::Position => "position",
            SegmentName::LineCurrent => "line_current",
            SegmentName::LineCount => "line_count",
            SegmentName::ColCurrent => "col_current",
            SegmentName::VirtcolCurrent => "virtcol_current",
            SegmentName::ModifiedBuffers => "modified_buffers",
            SegmentName::Branch => "branch",
            SegmentName::FileVcsStatus => "file_vcs_status",
            SegmentName::TrailingWhitespace => "trailing_whitespace",
            SegmentName::Tabnr => "tabnr",
        }
    }
}

impl fmt::Display for SegmentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SegmentName {
    type Err = SegmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SegmentName::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| SegmentError::UnknownSegment(s.to_string()))
    }
}

/// One fan-out replica's result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListedFragment {
    /// Derived context with the fan-out overrides applied
    pub context: Context,
    pub fragment: Option<Fragment>,
}

impl ListedFragment {
    pub fn mode(&self) -> Mode {
        self.context.mode
    }

    pub fn priority_multiplier(&self) -> f64 {
        self.context.priority_multiplier
    }
}

/// Segment options, caches and the optional VCS backend for one session
pub struct Segments {
    options: SegmentOptions,
    caches: SegmentCaches,
    vcs: Option<Box<dyn VcsBackend>>,
}

impl Segments {
    pub fn new(options: SegmentOptions) -> Self {
        Self {
            options,
            caches: SegmentCaches::new(),
            vcs: None,
        }
    }

    /// Enable the `branch` and `file_vcs_status` segments
    pub fn with_vcs(mut self, vcs: Box<dyn VcsBackend>) -> Self {
        self.vcs = Some(vcs);
        self
    }

    pub fn options(&self) -> &SegmentOptions {
        &self.options
    }

    pub fn caches(&self) -> &SegmentCaches {
        &self.caches
    }

    /// Drop cached state for a buffer the host has wiped out
    pub fn forget_buffer(&self, bufnr: BufNr) {
        self.caches.forget_buffer(bufnr);
    }

    /// Evaluate one segment against a context
    pub fn evaluate(&self, host: &dyn Host, name: SegmentName, ctx: &Context) -> Option<Fragment> {
        trace!(segment = %name, bufnr = %ctx.bufnr, mode = %ctx.mode, "evaluating segment");
        let options = &self.options;
        let caches = &self.caches;
        match name {
            SegmentName::Mode => segments::mode(ctx, &options.mode),
            SegmentName::VisualRange => segments::visual_range(host, ctx),
            SegmentName::ModifiedIndicator => {
                segments::modified_indicator(host, ctx, &options.modified_indicator)
            }
            SegmentName::ReadonlyIndicator => {
                segments::readonly_indicator(host, ctx, &options.readonly_indicator)
            }
            SegmentName::PasteIndicator => segments::paste_indicator(host, &options.paste_indicator),
            SegmentName::FileDirectory => {
                segments::file_directory(host, ctx, &options.file_directory)
            }
            SegmentName::FileName => segments::file_name(host, ctx, &options.file_name),
            SegmentName::FileSize => {
                segments::file_size(host, ctx, &options.file_size, &caches.file_size)
            }
            SegmentName::FileFormat => segments::file_format(host, ctx),
            SegmentName::FileEncoding => segments::file_encoding(host, ctx),
            SegmentName::FileType => segments::file_type(host, ctx),
            SegmentName::WindowTitle => segments::window_title(host, ctx),
            SegmentName::LinePercent => segments::line_percent(host, ctx, &options.line_percent),
            SegmentName::Position => {
                segments::position(host, ctx, &options.position, &caches.position)
            }
            SegmentName::LineCurrent => segments::line_current(host, ctx),
            SegmentName::LineCount => segments::line_count(host, ctx),
            SegmentName::ColCurrent => segments::col_current(host, ctx),
            SegmentName::VirtcolCurrent => segments::virtcol_current(
                host,
                ctx,
                &options.virtcol_current,
                &caches.virtcol_current,
            ),
            SegmentName::ModifiedBuffers => {
                segments::modified_buffers(host, &options.modified_buffers)
            }
            SegmentName::Branch => {
                segments::branch(host, ctx, self.vcs.as_deref()?, &options.branch)
            }
            SegmentName::FileVcsStatus => {
                segments::file_vcs_status(host, ctx, self.vcs.as_deref()?)
            }
            SegmentName::TrailingWhitespace => {
                segments::trailing_whitespace(host, ctx, &caches.trailing_whitespace)
            }
            SegmentName::Tabnr => segments::tabnr(host, ctx, &options.tabnr),
        }
    }

    /// Fan `base` out with `lister` and evaluate `name` once per replica, in
    /// fan-out order.
    pub fn evaluate_listed(
        &self,
        host: &dyn Host,
        lister: Lister,
        name: SegmentName,
        base: &Context,
    ) -> Vec<ListedFragment> {
        lister
            .fan_out(host, base)
            .iter()
            .map(|entry| {
                let context = entry.applied();
                let fragment = self.evaluate(host, name, &context);
                ListedFragment { context, fragment }
            })
            .collect()
    }
}

impl Default for Segments {
    fn default() -> Self {
        Self::new(SegmentOptions::default())
    }
}
