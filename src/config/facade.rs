//! Config facade: the single entry point for loading [`VimsegConfig`].

use crate::config::merge::merge_policy::builder_with_defaults;
use crate::config::merge::mode_overrides;
use crate::config::sources::{env, global_file, workspace_file};
use crate::config::VimsegConfig;
use crate::error::SegmentError;
use config::File;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Loads configuration from the layered sources
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for a workspace.
    ///
    /// Precedence (lowest to highest): defaults, global file, workspace file
    /// `<root>/.vimseg.toml`, `VIMSEG__*` environment variables. Mode override
    /// keys keep their case.
    pub fn load(workspace_root: &Path) -> Result<VimsegConfig, SegmentError> {
        let builder = builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = workspace_file::add_to_builder(builder, workspace_root)?;
        let builder = env::add_to_builder(builder);

        let mut config: VimsegConfig = builder.build()?.try_deserialize()?;
        let files: Vec<PathBuf> = [
            global_file::global_config_path(),
            Some(workspace_file::workspace_config_path(workspace_root)),
        ]
        .into_iter()
        .flatten()
        .filter(|path| path.exists())
        .collect();
        mode_overrides::restore_case(&mut config, &files, env::mode_overrides())?;
        debug!(workspace = %workspace_root.display(), "configuration loaded");
        Ok(config)
    }

    /// Load one explicit file over the defaults, skipping the other layers
    pub fn load_from_file(path: &Path) -> Result<VimsegConfig, SegmentError> {
        if !path.exists() {
            return Err(SegmentError::Config(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
        let mut config: VimsegConfig = builder_with_defaults()?
            .add_source(File::from(path))
            .build()?
            .try_deserialize()?;
        mode_overrides::restore_case(&mut config, &[path.to_path_buf()], HashMap::new())?;
        Ok(config)
    }

    /// Location of the global config file, if one can be determined
    pub fn xdg_config_path() -> Option<PathBuf> {
        global_file::global_config_path()
    }

    /// Built-in defaults only
    pub fn default() -> VimsegConfig {
        VimsegConfig::default()
    }
}
