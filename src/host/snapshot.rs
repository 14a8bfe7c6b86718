//! In-memory host built from a session snapshot file (JSON or TOML).

use crate::context::{
    BufNr, BufferHandle, BufferInfo, TabHandle, TabInfo, TabNr, WinNr, WindowHandle, WindowId,
    WindowInfo,
};
use crate::error::{HostError, SegmentError};
use crate::host::{Cursor, Host, OptionValue, Selection, Viewport};
use crate::text::transliterate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Text that may not be valid UTF-8: a string or a raw byte array
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SnapshotText {
    Text(String),
    Bytes(Vec<u8>),
}

impl SnapshotText {
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            SnapshotText::Text(s) => s.as_bytes(),
            SnapshotText::Bytes(b) => b,
        }
    }
}

impl From<&str> for SnapshotText {
    fn from(value: &str) -> Self {
        SnapshotText::Text(value.to_string())
    }
}

fn default_changedtick() -> u64 {
    1
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotBuffer {
    pub number: u32,
    #[serde(default)]
    pub name: Option<SnapshotText>,
    #[serde(default)]
    pub lines: Vec<SnapshotText>,
    #[serde(default = "default_changedtick")]
    pub changedtick: u64,
    #[serde(default)]
    pub options: HashMap<String, OptionValue>,
}

impl SnapshotBuffer {
    pub fn new(number: u32, name: Option<&str>, lines: &[&str]) -> Self {
        SnapshotBuffer {
            number,
            name: name.map(SnapshotText::from),
            lines: lines.iter().map(|l| SnapshotText::from(*l)).collect(),
            changedtick: default_changedtick(),
            options: HashMap::new(),
        }
    }

    /// Replace line `index` and bump the change tick
    pub fn set_line(&mut self, index: usize, text: SnapshotText) {
        if index < self.lines.len() {
            self.lines[index] = text;
        } else {
            self.lines.push(text);
        }
        self.changedtick += 1;
    }

    fn info(&self) -> BufferInfo {
        BufferInfo {
            handle: BufferHandle(self.number as u64),
            number: BufNr(self.number),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotWindow {
    pub handle: u64,
    pub number: u32,
    #[serde(default)]
    pub window_id: Option<i64>,
    pub buffer: u32,
    #[serde(default = "default_cursor")]
    pub cursor: Cursor,
    #[serde(default)]
    pub viewport: Option<Viewport>,
    #[serde(default)]
    pub virtual_column: Option<usize>,
    #[serde(default)]
    pub selection: Option<Selection>,
    #[serde(default)]
    pub vars: HashMap<String, String>,
}

fn default_cursor() -> Cursor {
    Cursor { line: 1, column: 0 }
}

impl SnapshotWindow {
    pub fn new(handle: u64, number: u32, buffer: u32) -> Self {
        SnapshotWindow {
            handle,
            number,
            window_id: Some(handle as i64),
            buffer,
            cursor: default_cursor(),
            viewport: None,
            virtual_column: None,
            selection: None,
            vars: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotTab {
    pub number: u32,
    /// Handle of the tab's current window
    pub window: u64,
}

/// Host backed by an editor-state snapshot
///
/// An empty `tabs` list models a host without tab page objects.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotHost {
    pub current_window: u64,
    #[serde(default)]
    pub current_tab: Option<u32>,
    #[serde(default)]
    pub cwd: Option<PathBuf>,
    #[serde(default)]
    pub home: Option<PathBuf>,
    #[serde(default)]
    pub buffers: Vec<SnapshotBuffer>,
    #[serde(default)]
    pub windows: Vec<SnapshotWindow>,
    #[serde(default)]
    pub tabs: Vec<SnapshotTab>,
    #[serde(default)]
    pub options: HashMap<String, OptionValue>,
}

impl SnapshotHost {
    /// Single window showing buffer 1, no tab pages
    pub fn single(buffer: SnapshotBuffer) -> Self {
        let window = SnapshotWindow::new(1000, 1, buffer.number);
        SnapshotHost {
            current_window: window.handle,
            current_tab: None,
            cwd: None,
            home: None,
            buffers: vec![buffer],
            windows: vec![window],
            tabs: Vec::new(),
            options: HashMap::new(),
        }
    }

    pub fn from_json_str(input: &str) -> Result<Self, SegmentError> {
        let host: SnapshotHost = serde_json::from_str(input)?;
        host.check()?;
        Ok(host)
    }

    pub fn from_toml_str(input: &str) -> Result<Self, SegmentError> {
        let host: SnapshotHost = toml::from_str(input)?;
        host.check()?;
        Ok(host)
    }

    /// Load a snapshot, choosing the format by file extension (`.toml` or JSON)
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SegmentError> {
        let path = path.as_ref();
        let input = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Self::from_toml_str(&input),
            _ => Self::from_json_str(&input),
        }
    }

    /// Reject snapshots whose windows and tabs point at nothing
    fn check(&self) -> Result<(), SegmentError> {
        if self.window(WindowHandle(self.current_window)).is_err() {
            return Err(SegmentError::Snapshot(format!(
                "current window {} is not defined",
                self.current_window
            )));
        }
        for window in &self.windows {
            if self.buffer_by_number(window.buffer).is_none() {
                return Err(SegmentError::Snapshot(format!(
                    "window {} shows undefined buffer {}",
                    window.handle, window.buffer
                )));
            }
        }
        for tab in &self.tabs {
            if self.window(WindowHandle(tab.window)).is_err() {
                return Err(SegmentError::Snapshot(format!(
                    "tab {} points at undefined window {}",
                    tab.number, tab.window
                )));
            }
        }
        Ok(())
    }

    pub fn buffer_mut(&mut self, number: u32) -> Option<&mut SnapshotBuffer> {
        self.buffers.iter_mut().find(|b| b.number == number)
    }

    pub fn window_mut(&mut self, handle: u64) -> Option<&mut SnapshotWindow> {
        self.windows.iter_mut().find(|w| w.handle == handle)
    }

    fn buffer_by_number(&self, number: u32) -> Option<&SnapshotBuffer> {
        self.buffers.iter().find(|b| b.number == number)
    }

    fn buffer(&self, handle: BufferHandle) -> Result<&SnapshotBuffer, HostError> {
        self.buffers
            .iter()
            .find(|b| b.number as u64 == handle.0)
            .ok_or(HostError::NoSuchBuffer(BufNr(handle.0 as u32)))
    }

    fn window(&self, handle: WindowHandle) -> Result<&SnapshotWindow, HostError> {
        self.windows
            .iter()
            .find(|w| w.handle == handle.0)
            .ok_or(HostError::NoSuchWindow(handle))
    }

    fn window_info(&self, window: &SnapshotWindow) -> Result<WindowInfo, HostError> {
        let buffer = self
            .buffer_by_number(window.buffer)
            .ok_or(HostError::NoSuchBuffer(BufNr(window.buffer)))?;
        Ok(WindowInfo {
            handle: WindowHandle(window.handle),
            number: WinNr(window.number),
            window_id: window.window_id.map(WindowId),
            buffer: buffer.info(),
        })
    }

    fn tab_info(&self, tab: &SnapshotTab) -> Result<TabInfo, HostError> {
        let window = self.window(WindowHandle(tab.window))?;
        Ok(TabInfo {
            handle: TabHandle(tab.number as u64),
            number: TabNr(tab.number),
            window: self.window_info(window)?,
        })
    }

    fn line_bytes(&self, buffer: BufferHandle, index: usize) -> Result<&[u8], HostError> {
        let buf = self.buffer(buffer)?;
        match buf.lines.get(index) {
            Some(line) => Ok(line.as_bytes()),
            None if index == 0 => Ok(&[][..]),
            None => Err(HostError::Other(format!(
                "line {} out of range for buffer {}",
                index + 1,
                buf.number
            ))),
        }
    }
}

impl Host for SnapshotHost {
    fn current_buffer(&self) -> Result<BufferInfo, HostError> {
        Ok(self.current_window()?.buffer)
    }

    fn current_window(&self) -> Result<WindowInfo, HostError> {
        let window = self.window(WindowHandle(self.current_window))?;
        self.window_info(window)
    }

    fn current_tabpage(&self) -> Result<TabInfo, HostError> {
        if self.tabs.is_empty() {
            return Err(HostError::Unsupported("tab pages"));
        }
        let tab = match self.current_tab {
            Some(number) => self
                .tabs
                .iter()
                .find(|t| t.number == number)
                .ok_or(HostError::NoSuchTab(TabNr(number)))?,
            None => self
                .tabs
                .iter()
                .find(|t| t.window == self.current_window)
                .unwrap_or(&self.tabs[0]),
        };
        self.tab_info(tab)
    }

    fn tabpages(&self) -> Result<Vec<TabInfo>, HostError> {
        if self.tabs.is_empty() {
            return Err(HostError::Unsupported("tab pages"));
        }
        self.tabs.iter().map(|t| self.tab_info(t)).collect()
    }

    fn buffers(&self) -> Result<Vec<BufferInfo>, HostError> {
        Ok(self.buffers.iter().map(SnapshotBuffer::info).collect())
    }

    fn buffer_name(&self, buffer: BufferHandle) -> Result<Option<Vec<u8>>, HostError> {
        Ok(self
            .buffer(buffer)?
            .name
            .as_ref()
            .map(|n| n.as_bytes().to_vec())
            .filter(|n| !n.is_empty()))
    }

    fn line_count(&self, buffer: BufferHandle) -> Result<usize, HostError> {
        Ok(self.buffer(buffer)?.lines.len().max(1))
    }

    fn buffer_line(&self, buffer: BufferHandle, index: usize) -> Result<String, HostError> {
        let bytes = self.line_bytes(buffer, index)?;
        String::from_utf8(bytes.to_vec()).map_err(|_| HostError::Decode {
            buffer: BufNr(buffer.0 as u32),
            line: index + 1,
        })
    }

    fn buffer_line_transliterated(
        &self,
        buffer: BufferHandle,
        index: usize,
    ) -> Result<String, HostError> {
        Ok(transliterate(self.line_bytes(buffer, index)?))
    }

    fn changedtick(&self, buffer: BufferHandle) -> Result<u64, HostError> {
        Ok(self.buffer(buffer)?.changedtick)
    }

    fn byte_count(&self, buffer: BufferHandle) -> Result<i64, HostError> {
        let buf = self.buffer(buffer)?;
        if buf.lines.is_empty() {
            return Ok(-1);
        }
        Ok(buf
            .lines
            .iter()
            .map(|l| l.as_bytes().len() as i64 + 1)
            .sum())
    }

    fn buffer_option(&self, buffer: BufferHandle, name: &str) -> Result<OptionValue, HostError> {
        self.buffer(buffer)?
            .options
            .get(name)
            .cloned()
            .ok_or_else(|| HostError::MissingOption(name.to_string()))
    }

    fn global_option(&self, name: &str) -> Result<OptionValue, HostError> {
        self.options
            .get(name)
            .cloned()
            .ok_or_else(|| HostError::MissingOption(name.to_string()))
    }

    fn window_var(&self, window: WindowHandle, name: &str) -> Result<Option<String>, HostError> {
        Ok(self.window(window)?.vars.get(name).cloned())
    }

    fn cursor(&self, window: WindowHandle) -> Result<Cursor, HostError> {
        Ok(self.window(window)?.cursor)
    }

    fn viewport(&self, window: WindowHandle) -> Result<Viewport, HostError> {
        let win = self.window(window)?;
        match win.viewport {
            Some(viewport) => Ok(viewport),
            None => {
                let last = self.line_count(BufferHandle(win.buffer as u64))?;
                Ok(Viewport { first: 1, last })
            }
        }
    }

    fn virtual_column(&self, window: WindowHandle) -> Result<usize, HostError> {
        let win = self.window(window)?;
        Ok(win.virtual_column.unwrap_or(win.cursor.column + 1))
    }

    fn visual_selection(&self, window: WindowHandle) -> Result<Selection, HostError> {
        self.window(window)?
            .selection
            .ok_or_else(|| HostError::Other("no visual selection".to_string()))
    }

    fn working_directory(&self) -> Option<PathBuf> {
        self.cwd.clone()
    }

    fn home_directory(&self) -> Option<PathBuf> {
        self.home.clone()
    }
}
