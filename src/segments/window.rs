//! Window title, tab number and buffer list segments.

use crate::context::Context;
use crate::fragment::Fragment;
use crate::host::Host;
use crate::segments::absorb;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TabnrOptions {
    /// Also show the number of the current tab page
    #[serde(default)]
    pub show_current: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModifiedBuffersOptions {
    #[serde(default = "default_modified_text")]
    pub text: String,
    #[serde(default = "default_join_str")]
    pub join_str: String,
}

fn default_modified_text() -> String {
    "+ ".to_string()
}

fn default_join_str() -> String {
    ",".to_string()
}

impl Default for ModifiedBuffersOptions {
    fn default() -> Self {
        Self {
            text: default_modified_text(),
            join_str: default_join_str(),
        }
    }
}

/// The window's `quickfix_title` variable
pub fn window_title(host: &dyn Host, ctx: &Context) -> Option<Fragment> {
    absorb("window_title", host.window_var(ctx.window?, "quickfix_title"))?.map(Fragment::Text)
}

/// Tab page number of the context
pub fn tabnr(host: &dyn Host, ctx: &Context, options: &TabnrOptions) -> Option<Fragment> {
    let tabnr = ctx.tabnr?;
    if !options.show_current {
        if let Ok(current) = host.current_tabpage() {
            if current.number == tabnr {
                return None;
            }
        }
    }
    Some(Fragment::Text(tabnr.to_string()))
}

/// Numbers of all modified buffers
pub fn modified_buffers(host: &dyn Host, options: &ModifiedBuffersOptions) -> Option<Fragment> {
    let buffers = absorb("modified_buffers", host.buffers())?;
    let modified: Vec<String> = buffers
        .iter()
        .filter(|buffer| {
            host.buffer_option(buffer.handle, "modified")
                .map(|v| v.is_set())
                .unwrap_or(false)
        })
        .map(|buffer| buffer.number.to_string())
        .collect();
    if modified.is_empty() {
        return None;
    }
    Some(Fragment::Text(format!(
        "{}{}",
        options.text,
        modified.join(&options.join_str)
    )))
}
