//! Context Fan-Out
//!
//! Replicates one segment request across every open tab page or buffer.
//! Each replica carries a derived context plus the overrides the renderer
//! applies: the `tab`/`buf`/`nc` mode tag and a priority multiplier that
//! grows with distance from the current item, so far-away replicas are
//! truncated first.
//!
//! Output order is the host's enumeration order, never re-sorted.

use crate::context::{BufferInfo, Context, Mode, TabInfo};
use crate::error::SegmentError;
use crate::host::Host;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::debug;

/// Multiplier step per item of distance from the current item
pub const PRIORITY_STEP: f64 = 0.001;

/// Overrides attached to a fan-out replica
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContextOverrides {
    pub mode: Mode,
    pub priority_multiplier: f64,
}

/// One replica: the derived context and its overrides
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FanOutEntry {
    pub context: Context,
    pub overrides: ContextOverrides,
}

impl FanOutEntry {
    /// The derived context with the overrides applied
    pub fn applied(&self) -> Context {
        Context {
            mode: self.overrides.mode,
            priority_multiplier: self.overrides.priority_multiplier,
            ..self.context.clone()
        }
    }
}

/// Something a context can be fanned out over
pub trait FanOutItem {
    /// Mode tag for the current item
    const CURRENT_MODE: Mode;

    /// Stable 1-based ordinal (tab or buffer number)
    fn ordinal(&self) -> u32;

    fn is_same(&self, other: &Self) -> bool;

    /// Copy of `base` located on this item
    fn locate(&self, base: &Context) -> Context;
}

impl FanOutItem for TabInfo {
    const CURRENT_MODE: Mode = Mode::Tab;

    fn ordinal(&self) -> u32 {
        self.number.0
    }

    fn is_same(&self, other: &Self) -> bool {
        self.handle == other.handle
    }

    fn locate(&self, base: &Context) -> Context {
        base.with_tab(self)
    }
}

impl FanOutItem for BufferInfo {
    const CURRENT_MODE: Mode = Mode::Buf;

    fn ordinal(&self) -> u32 {
        self.number.0
    }

    fn is_same(&self, other: &Self) -> bool {
        self.handle == other.handle
    }

    fn locate(&self, base: &Context) -> Context {
        base.with_buffer(self)
    }
}

/// `1 + 0.001 * |ordinal - current|`
pub fn priority_multiplier(ordinal: u32, current: u32) -> f64 {
    1.0 + PRIORITY_STEP * f64::from(ordinal.abs_diff(current))
}

/// Derive one context per item, in `items` order.
///
/// The derived contexts keep the base mode and multiplier; the replica's
/// mode tag and multiplier live in its [`ContextOverrides`].
pub fn fan_out<I: FanOutItem>(base: &Context, items: &[I], current: &I) -> Vec<FanOutEntry> {
    items
        .iter()
        .map(|item| FanOutEntry {
            context: item.locate(base),
            overrides: ContextOverrides {
                mode: if item.is_same(current) {
                    I::CURRENT_MODE
                } else {
                    Mode::NotCurrent
                },
                priority_multiplier: priority_multiplier(item.ordinal(), current.ordinal()),
            },
        })
        .collect()
}

/// Fan out over every tab page; empty when the host cannot list them
pub fn fan_out_tabs(host: &dyn Host, base: &Context) -> Vec<FanOutEntry> {
    let listed = host
        .tabpages()
        .and_then(|tabs| Ok((tabs, host.current_tabpage()?)));
    match listed {
        Ok((tabs, current)) => fan_out(base, &tabs, &current),
        Err(e) => {
            debug!(error = %e, "tab fan-out unavailable");
            Vec::new()
        }
    }
}

/// Fan out over every buffer; empty when the host cannot list them
pub fn fan_out_buffers(host: &dyn Host, base: &Context) -> Vec<FanOutEntry> {
    let listed = host
        .buffers()
        .and_then(|buffers| Ok((buffers, host.current_buffer()?)));
    match listed {
        Ok((buffers, current)) => fan_out(base, &buffers, &current),
        Err(e) => {
            debug!(error = %e, "buffer fan-out unavailable");
            Vec::new()
        }
    }
}

/// Tab fan-out when more than one tab page is open, buffer fan-out otherwise
pub fn fan_out_auto(host: &dyn Host, base: &Context) -> Vec<FanOutEntry> {
    let tab_count = host.tabpages().map(|tabs| tabs.len()).unwrap_or(0);
    if tab_count > 1 {
        fan_out_tabs(host, base)
    } else {
        fan_out_buffers(host, base)
    }
}

/// Which fan-out a lister segment uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Lister {
    Tabs,
    Buffers,
    Auto,
}

impl Lister {
    pub fn fan_out(self, host: &dyn Host, base: &Context) -> Vec<FanOutEntry> {
        match self {
            Lister::Tabs => fan_out_tabs(host, base),
            Lister::Buffers => fan_out_buffers(host, base),
            Lister::Auto => fan_out_auto(host, base),
        }
    }
}

impl FromStr for Lister {
    type Err = SegmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tabs" | "tablister" => Ok(Lister::Tabs),
            "buffers" | "bufferlister" => Ok(Lister::Buffers),
            "auto" | "tabbuflister" => Ok(Lister::Auto),
            other => Err(SegmentError::UnknownLister(other.to_string())),
        }
    }
}
