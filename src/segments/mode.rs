//! Mode and visual selection segments.

use crate::context::{Context, EditorMode, Mode};
use crate::fragment::Fragment;
use crate::host::Host;
use crate::segments::absorb;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Options for the `mode` segment
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModeOptions {
    /// Labels keyed by mode code, e.g. `{ n = "NORM" }`
    #[serde(default, rename = "override")]
    pub overrides: HashMap<String, String>,
}

/// Built-in label for a mode
pub fn default_label(mode: EditorMode) -> &'static str {
    match mode {
        EditorMode::Normal => "NORMAL",
        EditorMode::OperatorPending => "N·OPER",
        EditorMode::Visual => "VISUAL",
        EditorMode::VisualLine => "V·LINE",
        EditorMode::VisualBlock => "V·BLCK",
        EditorMode::Select => "SELECT",
        EditorMode::SelectLine => "S·LINE",
        EditorMode::SelectBlock => "S·BLCK",
        EditorMode::Insert => "INSERT",
        EditorMode::Replace => "REPLACE",
        EditorMode::VirtualReplace => "V·RPLCE",
        EditorMode::Command => "COMMND",
        EditorMode::VimEx => "VIM EX",
        EditorMode::Ex => "EX",
        EditorMode::Prompt => "PROMPT",
        EditorMode::More => "MORE",
        EditorMode::Confirm => "CONFIRM",
        EditorMode::Shell => "SHELL",
    }
}

/// Override label if one is configured for this mode, else the built-in one
pub fn label(mode: EditorMode, overrides: &HashMap<String, String>) -> &str {
    overrides
        .get(mode.code())
        .map(String::as_str)
        .unwrap_or_else(|| default_label(mode))
}

/// Current editor mode; absent for fan-out tags
pub fn mode(ctx: &Context, options: &ModeOptions) -> Option<Fragment> {
    let mode = ctx.mode.editor_mode()?;
    Some(Fragment::text(label(mode, &options.overrides)))
}

/// Size of the visual selection, like `showcmd`
pub fn visual_range(host: &dyn Host, ctx: &Context) -> Option<Fragment> {
    let mode = match ctx.mode {
        Mode::Editor(mode) if mode.is_visual() => mode,
        _ => return None,
    };
    let selection = absorb("visual_range", host.visual_selection(ctx.window?))?;
    let rows = selection.end.line.abs_diff(selection.start.line) + 1;
    let cols = selection
        .end
        .virtual_column
        .abs_diff(selection.start.virtual_column)
        + 1;

    let text = if mode == EditorMode::VisualBlock {
        format!("{} × {}", rows, cols)
    } else if mode == EditorMode::VisualLine || rows > 1 {
        format!("{} rows", rows)
    } else {
        format!("{} cols", cols)
    };
    Some(Fragment::Text(text))
}
