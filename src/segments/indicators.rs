//! Flag indicators: modified, read-only and paste.

use crate::context::Context;
use crate::fragment::Fragment;
use crate::host::Host;
use crate::segments::absorb;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModifiedIndicatorOptions {
    #[serde(default = "default_modified_text")]
    pub text: String,
}

/// Defaults to the powerline lock glyph (U+E0A2)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadonlyIndicatorOptions {
    #[serde(default = "default_readonly_text")]
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PasteIndicatorOptions {
    #[serde(default = "default_paste_text")]
    pub text: String,
}

fn default_modified_text() -> String {
    "+".to_string()
}

fn default_readonly_text() -> String {
    "\u{e0a2}".to_string()
}

fn default_paste_text() -> String {
    "PASTE".to_string()
}

impl Default for ModifiedIndicatorOptions {
    fn default() -> Self {
        Self {
            text: default_modified_text(),
        }
    }
}

impl Default for ReadonlyIndicatorOptions {
    fn default() -> Self {
        Self {
            text: default_readonly_text(),
        }
    }
}

impl Default for PasteIndicatorOptions {
    fn default() -> Self {
        Self {
            text: default_paste_text(),
        }
    }
}

fn flag(set: bool, text: &str) -> Option<Fragment> {
    set.then(|| Fragment::text(text))
}

pub fn modified_indicator(
    host: &dyn Host,
    ctx: &Context,
    options: &ModifiedIndicatorOptions,
) -> Option<Fragment> {
    let value = absorb("modified_indicator", host.buffer_option(ctx.buffer, "modified"))?;
    flag(value.is_set(), &options.text)
}

pub fn readonly_indicator(
    host: &dyn Host,
    ctx: &Context,
    options: &ReadonlyIndicatorOptions,
) -> Option<Fragment> {
    let value = absorb("readonly_indicator", host.buffer_option(ctx.buffer, "readonly"))?;
    flag(value.is_set(), &options.text)
}

/// Global `paste` flag; the context is irrelevant
pub fn paste_indicator(host: &dyn Host, options: &PasteIndicatorOptions) -> Option<Fragment> {
    let value = absorb("paste_indicator", host.global_option("paste"))?;
    flag(value.is_set(), &options.text)
}
