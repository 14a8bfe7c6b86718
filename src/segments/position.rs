//! Cursor and viewport position segments.

use crate::cache::{CachedFragment, FocusGatedCache};
use crate::context::Context;
use crate::fragment::{Fragment, SegmentPart};
use crate::host::Host;
use crate::segments::{absorb, focus_gated};
use crate::text::round_percent;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinePercentOptions {
    #[serde(default)]
    pub gradient: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionStrings {
    #[serde(default = "default_top")]
    pub top: String,
    #[serde(default = "default_bottom")]
    pub bottom: String,
    #[serde(default = "default_all")]
    pub all: String,
}

fn default_top() -> String {
    "Top".to_string()
}

fn default_bottom() -> String {
    "Bot".to_string()
}

fn default_all() -> String {
    "All".to_string()
}

impl Default for PositionStrings {
    fn default() -> Self {
        Self {
            top: default_top(),
            bottom: default_bottom(),
            all: default_all(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PositionOptions {
    #[serde(default)]
    pub position_strings: PositionStrings,
    #[serde(default)]
    pub gradient: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VirtcolOptions {
    /// Gradient from the virtual column relative to `textwidth`
    #[serde(default = "default_virtcol_gradient")]
    pub gradient: bool,
}

fn default_virtcol_gradient() -> bool {
    true
}

impl Default for VirtcolOptions {
    fn default() -> Self {
        Self {
            gradient: default_virtcol_gradient(),
        }
    }
}

/// Text alone, or a gradient part carrying the numeric level
fn with_gradient(contents: String, level: f64, gradient: bool, groups: [&str; 2]) -> Fragment {
    if !gradient {
        return Fragment::Text(contents);
    }
    Fragment::part(
        SegmentPart::new(contents)
            .with_groups(groups)
            .with_gradient(level),
    )
}

/// Cursor line as a percentage of the buffer
pub fn line_percent(host: &dyn Host, ctx: &Context, options: &LinePercentOptions) -> Option<Fragment> {
    let cursor = absorb("line_percent", host.cursor(ctx.window?))?;
    let line_last = absorb("line_percent", host.line_count(ctx.buffer))?;
    if line_last == 0 {
        return None;
    }
    let percentage = cursor.line as f64 * 100.0 / line_last as f64;
    Some(with_gradient(
        round_percent(percentage).to_string(),
        percentage,
        options.gradient,
        ["line_percent_gradient", "line_percent"],
    ))
}

/// Viewport position: `Top`, `Bot`, `All` or a percentage
pub fn position(
    host: &dyn Host,
    ctx: &Context,
    options: &PositionOptions,
    cache: &FocusGatedCache<CachedFragment>,
) -> Option<Fragment> {
    focus_gated(cache, ctx, || {
        let line_last = absorb("position", host.line_count(ctx.buffer))?;
        let viewport = absorb("position", host.viewport(ctx.window?))?;
        let strings = &options.position_strings;

        let (percentage, content) = if viewport.first == 1 && viewport.last == line_last {
            (0.0, strings.all.clone())
        } else if viewport.first == 1 {
            (0.0, strings.top.clone())
        } else if viewport.last == line_last {
            (100.0, strings.bottom.clone())
        } else {
            let hidden = (line_last + viewport.first).saturating_sub(viewport.last);
            let percentage = viewport.first as f64 * 100.0 / hidden.max(1) as f64;
            (percentage, format!("{}%", round_percent(percentage)))
        };

        Some(with_gradient(
            content,
            percentage,
            options.gradient,
            ["position_gradient", "position"],
        ))
    })
}

pub fn line_current(host: &dyn Host, ctx: &Context) -> Option<Fragment> {
    let cursor = absorb("line_current", host.cursor(ctx.window?))?;
    Some(Fragment::Text(cursor.line.to_string()))
}

pub fn line_count(host: &dyn Host, ctx: &Context) -> Option<Fragment> {
    let count = absorb("line_count", host.line_count(ctx.buffer))?;
    Some(Fragment::Text(count.to_string()))
}

/// 1-based cursor column
pub fn col_current(host: &dyn Host, ctx: &Context) -> Option<Fragment> {
    let cursor = absorb("col_current", host.cursor(ctx.window?))?;
    Some(Fragment::Text((cursor.column + 1).to_string()))
}

/// Virtual column, refreshed only while the window has focus
pub fn virtcol_current(
    host: &dyn Host,
    ctx: &Context,
    options: &VirtcolOptions,
    cache: &FocusGatedCache<CachedFragment>,
) -> Option<Fragment> {
    focus_gated(cache, ctx, || {
        let col = absorb("virtcol_current", host.virtual_column(ctx.window?))?;
        let mut part =
            SegmentPart::new(col.to_string()).with_groups(["virtcol_current", "col_current"]);
        if options.gradient {
            let textwidth = host
                .buffer_option(ctx.buffer, "textwidth")
                .ok()
                .and_then(|v| v.as_number())
                .unwrap_or(0);
            let level = if textwidth > 0 {
                (col as f64 * 100.0 / textwidth as f64).min(100.0)
            } else {
                0.0
            };
            part.highlight_group
                .insert(0, "virtcol_current_gradient".to_string());
            part = part.with_gradient(level);
        }
        Some(Fragment::part(part))
    })
}
