//! Host Interface
//!
//! The editor's scripting surface and the VCS backend, as seen by segments.
//! Both are external collaborators; this module only fixes their contract.

pub mod snapshot;

pub use snapshot::SnapshotHost;

use crate::context::{BufferHandle, BufferInfo, TabInfo, WindowHandle, WindowInfo};
use crate::error::HostError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Value of an editor option
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Number(i64),
    Text(String),
}

impl OptionValue {
    /// Numeric truthiness, the way the editor evaluates `&option`
    pub fn is_set(&self) -> bool {
        match self {
            OptionValue::Number(n) => *n != 0,
            OptionValue::Text(s) => s.trim().parse::<i64>().map(|n| n != 0).unwrap_or(false),
        }
    }

    pub fn as_number(&self) -> Option<i64> {
        match self {
            OptionValue::Number(n) => Some(*n),
            OptionValue::Text(s) => s.trim().parse().ok(),
        }
    }

    pub fn as_text(&self) -> String {
        match self {
            OptionValue::Number(n) => n.to_string(),
            OptionValue::Text(s) => s.clone(),
        }
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        OptionValue::Number(value as i64)
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        OptionValue::Text(value.to_string())
    }
}

/// Cursor position: 1-based line, 0-based byte column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cursor {
    pub line: usize,
    pub column: usize,
}

/// First and last line visible in a window (`line('w0')`, `line('w$')`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub first: usize,
    pub last: usize,
}

/// A visual selection endpoint: 1-based line and virtual column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionPoint {
    pub line: usize,
    pub virtual_column: usize,
}

/// Visual selection from its start (`getpos('v')`) to the cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub start: SelectionPoint,
    pub end: SelectionPoint,
}

/// Editor state queried by segments
pub trait Host {
    fn current_buffer(&self) -> Result<BufferInfo, HostError>;
    fn current_window(&self) -> Result<WindowInfo, HostError>;
    /// Fails with `HostError::Unsupported` on hosts without tab page objects.
    fn current_tabpage(&self) -> Result<TabInfo, HostError>;

    /// Tab pages in host enumeration order
    fn tabpages(&self) -> Result<Vec<TabInfo>, HostError>;
    /// Buffers in host enumeration order
    fn buffers(&self) -> Result<Vec<BufferInfo>, HostError>;

    /// Raw buffer name; `None` for unnamed buffers
    fn buffer_name(&self, buffer: BufferHandle) -> Result<Option<Vec<u8>>, HostError>;
    fn line_count(&self, buffer: BufferHandle) -> Result<usize, HostError>;
    /// Line `index` (0-based). Fails with `HostError::Decode` when the line is
    /// not representable in the processing encoding.
    fn buffer_line(&self, buffer: BufferHandle, index: usize) -> Result<String, HostError>;
    /// Printable rendering of line `index`, usable when `buffer_line` fails
    fn buffer_line_transliterated(
        &self,
        buffer: BufferHandle,
        index: usize,
    ) -> Result<String, HostError>;
    /// Mutation counter; strictly increases on every content change
    fn changedtick(&self, buffer: BufferHandle) -> Result<u64, HostError>;
    /// Size of the buffer in bytes, `line2byte(line('$') + 1) - 1`
    fn byte_count(&self, buffer: BufferHandle) -> Result<i64, HostError>;

    fn buffer_option(&self, buffer: BufferHandle, name: &str) -> Result<OptionValue, HostError>;
    fn global_option(&self, name: &str) -> Result<OptionValue, HostError>;

    fn window_var(&self, window: WindowHandle, name: &str) -> Result<Option<String>, HostError>;
    fn cursor(&self, window: WindowHandle) -> Result<Cursor, HostError>;
    fn viewport(&self, window: WindowHandle) -> Result<Viewport, HostError>;
    fn virtual_column(&self, window: WindowHandle) -> Result<usize, HostError>;
    fn visual_selection(&self, window: WindowHandle) -> Result<Selection, HostError>;

    fn working_directory(&self) -> Option<PathBuf>;

    fn home_directory(&self) -> Option<PathBuf> {
        directories::BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf())
    }
}

/// A repository detected for a file
pub trait Repository {
    /// Repository root
    fn directory(&self) -> &Path;
    fn branch(&self) -> String;
    /// Short status flags for a path relative to `directory()`
    fn status(&self, relative_path: &Path) -> Option<String>;
    /// Whole working tree status; non-blank means dirty
    fn tree_status(&self) -> Option<String>;
}

/// Repository detection
pub trait VcsBackend {
    fn guess(&self, path: &Path) -> Option<Box<dyn Repository>>;
}
