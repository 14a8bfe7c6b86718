//! Error types for segment evaluation.
//!
//! Host failures never reach the renderer: segment functions absorb them into
//! an absent fragment. `SegmentError` covers the outer surfaces (evaluator
//! lookup, configuration, snapshots, CLI).

use crate::context::{BufNr, TabNr, WindowHandle};
use thiserror::Error;

/// Failures reported by the host scripting surface
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HostError {
    #[error("Host capability unavailable: {0}")]
    Unsupported(&'static str),

    #[error("Buffer not found: {0}")]
    NoSuchBuffer(BufNr),

    #[error("Window not found: {0:?}")]
    NoSuchWindow(WindowHandle),

    #[error("Tab page not found: {0}")]
    NoSuchTab(TabNr),

    #[error("Option not set: {0}")]
    MissingOption(String),

    #[error("Line {line} of buffer {buffer} is not representable in the processing encoding")]
    Decode { buffer: BufNr, line: usize },

    #[error("Host error: {0}")]
    Other(String),
}

/// Evaluator, configuration and snapshot errors
#[derive(Debug, Error)]
pub enum SegmentError {
    #[error("Unknown segment: {0}")]
    UnknownSegment(String),

    #[error("Unknown lister: {0} (must be 'tabs', 'buffers' or 'auto')")]
    UnknownLister(String),

    #[error("Unknown mode code: {0}")]
    UnknownMode(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Snapshot error: {0}")]
    Snapshot(String),

    #[error("Host error: {0}")]
    Host(#[from] HostError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<config::ConfigError> for SegmentError {
    fn from(err: config::ConfigError) -> Self {
        SegmentError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for SegmentError {
    fn from(err: serde_json::Error) -> Self {
        SegmentError::Snapshot(err.to_string())
    }
}

impl From<toml::de::Error> for SegmentError {
    fn from(err: toml::de::Error) -> Self {
        SegmentError::Snapshot(err.to_string())
    }
}
