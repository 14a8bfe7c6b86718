//! CLI parse: clap types for vimseg. No behavior; definitions only.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// vimseg - inspect status-line segments against an editor snapshot
#[derive(Parser)]
#[command(name = "vimseg")]
#[command(about = "Evaluate status-line segments against an editor session snapshot")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root directory (searched for .vimseg.toml)
    #[arg(long, global = true, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (default: off)
    #[arg(long, global = true, default_value = "false")]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    /// Log output (stderr, stdout, file)
    #[arg(long, global = true)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Evaluate segments against the snapshot's current window
    Render {
        /// Session snapshot (.json or .toml)
        #[arg(long)]
        snapshot: PathBuf,
        /// Editor mode code of the current window
        #[arg(long, default_value = "n")]
        mode: String,
        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
        /// Segment names, e.g. file_name position
        #[arg(required = true)]
        segments: Vec<String>,
    },
    /// Fan one segment out over tab pages or buffers
    List {
        /// Session snapshot (.json or .toml)
        #[arg(long)]
        snapshot: PathBuf,
        /// Fan-out: auto, tabs or buffers
        #[arg(long, default_value = "auto")]
        lister: String,
        /// Editor mode code of the current window
        #[arg(long, default_value = "n")]
        mode: String,
        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
        /// Segment name
        segment: String,
    },
    /// Load and validate configuration
    CheckConfig,
}
