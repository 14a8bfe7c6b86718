//! vimseg: Status-Line Segment Evaluation
//!
//! Segment functions for an editor status line, the caches that keep them
//! cheap on every redraw (change-tick keyed and focus gated), and the context
//! fan-out that replicates a segment across tab pages or buffers.

pub mod cache;
pub mod cli;
pub mod config;
pub mod context;
pub mod error;
pub mod evaluator;
pub mod fanout;
pub mod fragment;
pub mod host;
pub mod logging;
pub mod segments;
pub mod text;

pub use context::{Context, Mode};
pub use error::{HostError, SegmentError};
pub use evaluator::{ListedFragment, SegmentName, Segments};
pub use fragment::{Fragment, SegmentPart};
pub use host::{Host, SnapshotHost};
