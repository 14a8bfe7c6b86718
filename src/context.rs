//! Evaluation Context
//!
//! The bundle of editor-state identifiers a segment is evaluated against.
//! Contexts are plain data: they hold host handles by value and are copied,
//! never mutated in place, when a fan-out derives one per tab or buffer.

use crate::error::{HostError, SegmentError};
use crate::host::Host;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Buffer number as shown by the editor (1-based, stable for the buffer's lifetime)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BufNr(pub u32);

/// Window number within its tab page (1-based, changes when windows move)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WinNr(pub u32);

/// Tab page number (1-based)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TabNr(pub u32);

/// Stable window identity that survives window handle churn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WindowId(pub i64);

/// Opaque host handle for a buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BufferHandle(pub u64);

/// Opaque host handle for a window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WindowHandle(pub u64);

/// Opaque host handle for a tab page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TabHandle(pub u64);

impl fmt::Display for BufNr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for WinNr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for TabNr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A buffer as enumerated by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BufferInfo {
    pub handle: BufferHandle,
    pub number: BufNr,
}

/// A window as enumerated by the host, with the buffer it displays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowInfo {
    pub handle: WindowHandle,
    pub number: WinNr,
    pub window_id: Option<WindowId>,
    pub buffer: BufferInfo,
}

/// A tab page as enumerated by the host, with its current window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabInfo {
    pub handle: TabHandle,
    pub number: TabNr,
    pub window: WindowInfo,
}

/// Real editor input modes, keyed by the editor's `mode()` code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditorMode {
    Normal,
    OperatorPending,
    Visual,
    VisualLine,
    VisualBlock,
    Select,
    SelectLine,
    SelectBlock,
    Insert,
    Replace,
    VirtualReplace,
    Command,
    VimEx,
    Ex,
    Prompt,
    More,
    Confirm,
    Shell,
}

impl EditorMode {
    pub const ALL: [EditorMode; 18] = [
        EditorMode::Normal,
        EditorMode::OperatorPending,
        EditorMode::Visual,
        EditorMode::VisualLine,
        EditorMode::VisualBlock,
        EditorMode::Select,
        EditorMode::SelectLine,
        EditorMode::SelectBlock,
        EditorMode::Insert,
        EditorMode::Replace,
        EditorMode::VirtualReplace,
        EditorMode::Command,
        EditorMode::VimEx,
        EditorMode::Ex,
        EditorMode::Prompt,
        EditorMode::More,
        EditorMode::Confirm,
        EditorMode::Shell,
    ];

    /// The editor's mode code (`^V` and `^S` stand for the control characters)
    pub fn code(self) -> &'static str {
        match self {
            EditorMode::Normal => "n",
            EditorMode::OperatorPending => "no",
            EditorMode::Visual => "v",
            EditorMode::VisualLine => "V",
            EditorMode::VisualBlock => "^V",
            EditorMode::Select => "s",
            EditorMode::SelectLine => "S",
            EditorMode::SelectBlock => "^S",
            EditorMode::Insert => "i",
            EditorMode::Replace => "R",
            EditorMode::VirtualReplace => "Rv",
            EditorMode::Command => "c",
            EditorMode::VimEx => "cv",
            EditorMode::Ex => "ce",
            EditorMode::Prompt => "r",
            EditorMode::More => "rm",
            EditorMode::Confirm => "r?",
            EditorMode::Shell => "!",
        }
    }

    pub fn is_visual(self) -> bool {
        matches!(
            self,
            EditorMode::Visual | EditorMode::VisualLine | EditorMode::VisualBlock
        )
    }
}

impl FromStr for EditorMode {
    type Err = SegmentError;

    fn from_str(code: &str) -> Result<Self, Self::Err> {
        EditorMode::ALL
            .iter()
            .copied()
            .find(|mode| mode.code() == code)
            .ok_or_else(|| SegmentError::UnknownMode(code.to_string()))
    }
}

/// Mode tag carried by a context
///
/// Besides real editor modes, fan-outs tag contexts with `tab` (current tab
/// page), `buf` (current buffer) or `nc` (not current).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Mode {
    Editor(EditorMode),
    Tab,
    Buf,
    NotCurrent,
}

impl Mode {
    pub fn code(self) -> &'static str {
        match self {
            Mode::Editor(mode) => mode.code(),
            Mode::Tab => "tab",
            Mode::Buf => "buf",
            Mode::NotCurrent => "nc",
        }
    }

    /// Whether the context describes the window that currently has focus.
    pub fn is_focused(self) -> bool {
        !matches!(self, Mode::NotCurrent)
    }

    pub fn editor_mode(self) -> Option<EditorMode> {
        match self {
            Mode::Editor(mode) => Some(mode),
            _ => None,
        }
    }
}

impl FromStr for Mode {
    type Err = SegmentError;

    fn from_str(code: &str) -> Result<Self, Self::Err> {
        match code {
            "tab" => Ok(Mode::Tab),
            "buf" => Ok(Mode::Buf),
            "nc" => Ok(Mode::NotCurrent),
            other => other.parse().map(Mode::Editor),
        }
    }
}

impl TryFrom<String> for Mode {
    type Error = SegmentError;

    fn try_from(code: String) -> Result<Self, Self::Error> {
        code.parse()
    }
}

impl From<Mode> for String {
    fn from(mode: Mode) -> Self {
        mode.code().to_string()
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

fn default_priority_multiplier() -> f64 {
    1.0
}

/// Where a segment is being evaluated
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Context {
    pub buffer: BufferHandle,
    pub bufnr: BufNr,
    pub window: Option<WindowHandle>,
    pub winnr: Option<WinNr>,
    pub window_id: Option<WindowId>,
    pub tabpage: Option<TabHandle>,
    pub tabnr: Option<TabNr>,
    pub mode: Mode,
    #[serde(default = "default_priority_multiplier")]
    pub priority_multiplier: f64,
}

impl Context {
    /// Context for a buffer with no window or tab page attached
    pub fn for_buffer_only(buffer: BufferInfo, mode: Mode) -> Self {
        Context {
            buffer: buffer.handle,
            bufnr: buffer.number,
            window: None,
            winnr: None,
            window_id: None,
            tabpage: None,
            tabnr: None,
            mode,
            priority_multiplier: default_priority_multiplier(),
        }
    }

    /// Context for a window (and the buffer it shows)
    pub fn for_window(window: WindowInfo, mode: Mode) -> Self {
        Context::for_buffer_only(window.buffer, mode).with_window(window)
    }

    /// Base context for the current tab page, window and buffer.
    ///
    /// Hosts without tab page objects leave `tabpage`/`tabnr` unset.
    pub fn current(host: &dyn Host, mode: Mode) -> Result<Self, HostError> {
        let window = host.current_window()?;
        let context = Context::for_window(window, mode);
        match host.current_tabpage() {
            Ok(tab) => Ok(Context {
                tabpage: Some(tab.handle),
                tabnr: Some(tab.number),
                ..context
            }),
            Err(HostError::Unsupported(_)) => Ok(context),
            Err(e) => Err(e),
        }
    }

    /// Copy with the window, window id and buffer replaced
    pub fn with_window(&self, window: WindowInfo) -> Self {
        Context {
            window: Some(window.handle),
            winnr: Some(window.number),
            window_id: window.window_id,
            buffer: window.buffer.handle,
            bufnr: window.buffer.number,
            ..self.clone()
        }
    }

    /// Copy located in `tab`: tab page, its current window and that window's buffer
    pub fn with_tab(&self, tab: &TabInfo) -> Self {
        Context {
            tabpage: Some(tab.handle),
            tabnr: Some(tab.number),
            ..self.with_window(tab.window)
        }
    }

    /// Copy located on `buffer` alone; window fields are cleared
    pub fn with_buffer(&self, buffer: &BufferInfo) -> Self {
        Context {
            window: None,
            winnr: None,
            window_id: None,
            buffer: buffer.handle,
            bufnr: buffer.number,
            ..self.clone()
        }
    }

    pub fn with_mode(&self, mode: Mode) -> Self {
        Context {
            mode,
            ..self.clone()
        }
    }
}
