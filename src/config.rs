//! Configuration System
//!
//! Layered configuration for segment options and logging: built-in defaults,
//! a global file, a per-workspace file and environment overrides, merged with
//! the `config` crate. Tests included.

use crate::context::EditorMode;
use crate::logging::{LoggingConfig, LOG_LEVELS};
use crate::segments::{
    BranchOptions, FileDirectoryOptions, FileNameOptions, FileSizeOptions, LinePercentOptions,
    ModeOptions, ModifiedBuffersOptions, ModifiedIndicatorOptions, PasteIndicatorOptions,
    PositionOptions, ReadonlyIndicatorOptions, TabnrOptions, VirtcolOptions,
};
use serde::{Deserialize, Serialize};

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;
pub use sources::workspace_file::WORKSPACE_CONFIG_FILE;

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VimsegConfig {
    /// Per-segment options
    #[serde(default)]
    pub segments: SegmentOptions,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Options for every configurable segment, keyed by segment name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SegmentOptions {
    #[serde(default)]
    pub mode: ModeOptions,
    #[serde(default)]
    pub modified_indicator: ModifiedIndicatorOptions,
    #[serde(default)]
    pub readonly_indicator: ReadonlyIndicatorOptions,
    #[serde(default)]
    pub paste_indicator: PasteIndicatorOptions,
    #[serde(default)]
    pub file_directory: FileDirectoryOptions,
    #[serde(default)]
    pub file_name: FileNameOptions,
    #[serde(default)]
    pub file_size: FileSizeOptions,
    #[serde(default)]
    pub line_percent: LinePercentOptions,
    #[serde(default)]
    pub position: PositionOptions,
    #[serde(default)]
    pub virtcol_current: VirtcolOptions,
    #[serde(default)]
    pub modified_buffers: ModifiedBuffersOptions,
    #[serde(default)]
    pub branch: BranchOptions,
    #[serde(default)]
    pub tabnr: TabnrOptions,
}

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    Segment(String, String),
    Logging(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Segment(name, msg) => {
                write!(f, "Segment '{}': {}", name, msg)
            }
            ValidationError::Logging(msg) => {
                write!(f, "Logging: {}", msg)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

impl SegmentOptions {
    fn validate(&self, errors: &mut Vec<ValidationError>) {
        let mut codes: Vec<&String> = self.mode.overrides.keys().collect();
        codes.sort();
        for code in codes {
            if code.parse::<EditorMode>().is_err() {
                errors.push(ValidationError::Segment(
                    "mode".to_string(),
                    format!("Unknown mode code '{}' in override table", code),
                ));
            }
        }

        let strings = &self.position.position_strings;
        for (key, value) in [
            ("top", &strings.top),
            ("bottom", &strings.bottom),
            ("all", &strings.all),
        ] {
            if value.is_empty() {
                errors.push(ValidationError::Segment(
                    "position".to_string(),
                    format!("Position string '{}' cannot be empty", key),
                ));
            }
        }

        if self.modified_buffers.join_str.is_empty() {
            errors.push(ValidationError::Segment(
                "modified_buffers".to_string(),
                "join_str cannot be empty".to_string(),
            ));
        }
    }
}

impl VimsegConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        self.segments.validate(&mut errors);

        if !LOG_LEVELS.contains(&self.logging.level.as_str()) {
            errors.push(ValidationError::Logging(format!(
                "Unknown level '{}' (expected one of {})",
                self.logging.level,
                LOG_LEVELS.join(", ")
            )));
        }
        if self.logging.format != "json" && self.logging.format != "text" {
            errors.push(ValidationError::Logging(format!(
                "Unknown format '{}' (expected json or text)",
                self.logging.format
            )));
        }
        if !["stderr", "stdout", "file"].contains(&self.logging.output.as_str()) {
            errors.push(ValidationError::Logging(format!(
                "Unknown output '{}' (expected stderr, stdout or file)",
                self.logging.output
            )));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
