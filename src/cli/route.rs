//! CLI route: single route table and run context. Dispatches to the evaluator and presentation.

use crate::cli::parse::{Commands, OutputFormat};
use crate::cli::presentation::{
    format_check_result, format_listed_json, format_listed_text, format_rendered_json,
    format_rendered_text, RenderedSegment,
};
use crate::config::{ConfigLoader, VimsegConfig};
use crate::context::{Context, Mode};
use crate::error::SegmentError;
use crate::evaluator::{SegmentName, Segments};
use crate::fanout::Lister;
use crate::host::SnapshotHost;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Runtime context for CLI execution: loaded configuration and where it came from.
pub struct RunContext {
    config: VimsegConfig,
    config_source: String,
}

impl RunContext {
    /// Load configuration from an explicit file or the workspace layers
    pub fn new(workspace_root: PathBuf, config_path: Option<PathBuf>) -> Result<Self, SegmentError> {
        let (config, config_source) = match config_path {
            Some(ref cfg_path) => (
                ConfigLoader::load_from_file(cfg_path)?,
                cfg_path.display().to_string(),
            ),
            None => (
                ConfigLoader::load(&workspace_root)?,
                format!("layered, workspace {}", workspace_root.display()),
            ),
        };
        Ok(Self {
            config,
            config_source,
        })
    }

    pub fn config(&self) -> &VimsegConfig {
        &self.config
    }

    pub fn execute(&self, command: &Commands) -> Result<String, SegmentError> {
        match command {
            Commands::Render {
                snapshot,
                mode,
                format,
                segments,
            } => self.render(snapshot, mode, *format, segments),
            Commands::List {
                snapshot,
                lister,
                mode,
                format,
                segment,
            } => self.list(snapshot, lister, mode, *format, segment),
            Commands::CheckConfig => self.check_config(),
        }
    }

    fn current_context(&self, snapshot: &Path, mode: &str) -> Result<(SnapshotHost, Context), SegmentError> {
        let host = SnapshotHost::load(snapshot)?;
        let mode: Mode = mode.parse()?;
        let context = Context::current(&host, mode)?;
        debug!(snapshot = %snapshot.display(), bufnr = %context.bufnr, "snapshot loaded");
        Ok((host, context))
    }

    fn render(
        &self,
        snapshot: &Path,
        mode: &str,
        format: OutputFormat,
        names: &[String],
    ) -> Result<String, SegmentError> {
        let names = names
            .iter()
            .map(|name| name.parse::<SegmentName>())
            .collect::<Result<Vec<_>, _>>()?;
        let (host, context) = self.current_context(snapshot, mode)?;
        let segments = Segments::new(self.config.segments.clone());

        let rows: Vec<RenderedSegment> = names
            .into_iter()
            .map(|segment| RenderedSegment {
                segment,
                fragment: segments.evaluate(&host, segment, &context),
            })
            .collect();
        info!(count = rows.len(), "segments rendered");

        match format {
            OutputFormat::Text => Ok(format_rendered_text(&rows)),
            OutputFormat::Json => format_rendered_json(&rows),
        }
    }

    fn list(
        &self,
        snapshot: &Path,
        lister: &str,
        mode: &str,
        format: OutputFormat,
        name: &str,
    ) -> Result<String, SegmentError> {
        let segment: SegmentName = name.parse()?;
        let lister: Lister = lister.parse()?;
        let (host, context) = self.current_context(snapshot, mode)?;
        let segments = Segments::new(self.config.segments.clone());

        let rows = segments.evaluate_listed(&host, lister, segment, &context);
        info!(count = rows.len(), ?lister, "segment listed");

        match format {
            OutputFormat::Text => Ok(format_listed_text(segment, &rows)),
            OutputFormat::Json => format_listed_json(segment, &rows),
        }
    }

    fn check_config(&self) -> Result<String, SegmentError> {
        let result = self.config.validate();
        let report = format_check_result(&self.config_source, &result);
        match result {
            Ok(()) => Ok(report),
            Err(_) => Err(SegmentError::Config(report)),
        }
    }
}
