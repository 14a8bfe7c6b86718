//! File path, size and buffer metadata segments.

use crate::cache::{CachedFragment, FocusGatedCache};
use crate::context::Context;
use crate::fragment::{Fragment, SegmentPart};
use crate::host::Host;
use crate::segments::{absorb, buffer_name, focus_gated, BACKGROUND_DIVIDER};
use crate::text::humanize_bytes;
use serde::{Deserialize, Serialize};
use std::path::{Path, MAIN_SEPARATOR};

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileDirectoryOptions {
    /// Shorten `$HOME` to `~/`
    #[serde(default = "default_true")]
    pub shorten_user: bool,
    /// Shorten the working directory to `./`
    #[serde(default = "default_true")]
    pub shorten_cwd: bool,
    /// Shorten `/home/user/` to `~user/`
    #[serde(default)]
    pub shorten_home: bool,
}

impl Default for FileDirectoryOptions {
    fn default() -> Self {
        Self {
            shorten_user: true,
            shorten_cwd: true,
            shorten_home: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileNameOptions {
    #[serde(default)]
    pub display_no_file: bool,
    #[serde(default = "default_no_file_text")]
    pub no_file_text: String,
}

fn default_no_file_text() -> String {
    "[No file]".to_string()
}

impl Default for FileNameOptions {
    fn default() -> Self {
        Self {
            display_no_file: false,
            no_file_text: default_no_file_text(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileSizeOptions {
    #[serde(default = "default_suffix")]
    pub suffix: String,
    /// SI prefixes (kB, MB) instead of binary ones (KiB, MiB)
    #[serde(default)]
    pub si_prefix: bool,
}

fn default_suffix() -> String {
    "B".to_string()
}

impl Default for FileSizeOptions {
    fn default() -> Self {
        Self {
            suffix: default_suffix(),
            si_prefix: false,
        }
    }
}

/// Reduce `name` relative to the working directory, else to `~`.
fn reduce_path(
    name: &str,
    cwd: Option<&Path>,
    home: Option<&Path>,
    options: &FileDirectoryOptions,
) -> String {
    let path = Path::new(name);
    if options.shorten_cwd {
        if let Some(relative) = cwd.and_then(|cwd| path.strip_prefix(cwd).ok()) {
            if !relative.as_os_str().is_empty() {
                return relative.to_string_lossy().into_owned();
            }
        }
    }
    if options.shorten_user {
        if let Some(relative) = home.and_then(|home| path.strip_prefix(home).ok()) {
            if relative.as_os_str().is_empty() {
                return "~".to_string();
            }
            return format!("~{}{}", MAIN_SEPARATOR, relative.to_string_lossy());
        }
    }
    name.to_string()
}

/// Head component of a path; `.` for a bare file name
fn head(path: &str) -> String {
    match Path::new(path).parent() {
        Some(parent) if parent.as_os_str().is_empty() => ".".to_string(),
        Some(parent) => parent.to_string_lossy().into_owned(),
        None => path.to_string(),
    }
}

/// Directory of the buffer's file, with a trailing separator
pub fn file_directory(
    host: &dyn Host,
    ctx: &Context,
    options: &FileDirectoryOptions,
) -> Option<Fragment> {
    let name = buffer_name(host, ctx, "file_directory")?;
    let cwd = host.working_directory();
    let home = host.home_directory();
    let mut directory = head(&reduce_path(&name, cwd.as_deref(), home.as_deref(), options));
    if directory.is_empty() {
        return None;
    }
    if options.shorten_home {
        if let Some(rest) = directory.strip_prefix("/home/") {
            directory = format!("~{}", rest);
        }
    }
    if !directory.ends_with(MAIN_SEPARATOR) {
        directory.push(MAIN_SEPARATOR);
    }
    Some(Fragment::Text(directory))
}

/// Tail component of the buffer's file path
pub fn file_name(host: &dyn Host, ctx: &Context, options: &FileNameOptions) -> Option<Fragment> {
    let Some(name) = buffer_name(host, ctx, "file_name") else {
        return options.display_no_file.then(|| {
            Fragment::part(
                SegmentPart::new(options.no_file_text.clone())
                    .with_groups(["file_name_no_file", "file_name"]),
            )
        });
    };
    let base = Path::new(&name)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or(name);
    Some(Fragment::Text(base))
}

/// Buffer size in bytes, refreshed only while the window has focus
pub fn file_size(
    host: &dyn Host,
    ctx: &Context,
    options: &FileSizeOptions,
    cache: &FocusGatedCache<CachedFragment>,
) -> Option<Fragment> {
    focus_gated(cache, ctx, || {
        let size = absorb("file_size", host.byte_count(ctx.buffer))?.max(0) as u64;
        Some(Fragment::Text(humanize_bytes(
            size,
            &options.suffix,
            options.si_prefix,
        )))
    })
}

fn option_segment(
    host: &dyn Host,
    ctx: &Context,
    segment: &'static str,
    option: &str,
) -> Option<Fragment> {
    let value = absorb(segment, host.buffer_option(ctx.buffer, option))?.as_text();
    if value.is_empty() {
        return None;
    }
    Some(Fragment::part(
        SegmentPart::new(value)
            .with_groups([segment])
            .with_divider(BACKGROUND_DIVIDER),
    ))
}

/// Line ending type (`fileformat`)
pub fn file_format(host: &dyn Host, ctx: &Context) -> Option<Fragment> {
    option_segment(host, ctx, "file_format", "fileformat")
}

/// File encoding (`fileencoding`)
pub fn file_encoding(host: &dyn Host, ctx: &Context) -> Option<Fragment> {
    option_segment(host, ctx, "file_encoding", "fileencoding")
}

/// File type (`filetype`)
pub fn file_type(host: &dyn Host, ctx: &Context) -> Option<Fragment> {
    option_segment(host, ctx, "file_type", "filetype")
}
