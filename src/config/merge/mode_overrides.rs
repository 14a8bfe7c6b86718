//! Case-preserving merge of the `segments.mode.override` table.
//!
//! The `config` crate folds every key to lowercase, but mode codes are case
//! sensitive (`v`/`V`, `r`/`R`, `^V`/`^S`). The table is rebuilt from the raw
//! layers in the same precedence order and replaces the folded one.

use crate::config::VimsegConfig;
use crate::error::SegmentError;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

const TABLE_PATH: [&str; 3] = ["segments", "mode", "override"];

/// Override table of one config file with its keys untouched.
///
/// Returns `None` for formats other than TOML and JSON.
pub fn read_file(path: &Path) -> Result<Option<HashMap<String, String>>, SegmentError> {
    let extension = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase());
    let invalid = |e: &dyn std::fmt::Display| {
        SegmentError::Config(format!("Failed to read {}: {}", path.display(), e))
    };

    match extension.as_deref() {
        Some("toml") | None => {
            let contents = std::fs::read_to_string(path)?;
            let root = toml::Value::Table(
                toml::from_str::<toml::Table>(&contents).map_err(|e| invalid(&e))?,
            );
            let table = TABLE_PATH
                .iter()
                .try_fold(&root, |node, key| node.get(*key))
                .and_then(toml::Value::as_table);
            Ok(Some(
                table
                    .map(|t| {
                        t.iter()
                            .map(|(code, label)| (code.clone(), toml_label(label)))
                            .collect()
                    })
                    .unwrap_or_default(),
            ))
        }
        Some("json") => {
            let contents = std::fs::read_to_string(path)?;
            let root: serde_json::Value =
                serde_json::from_str(&contents).map_err(|e| invalid(&e))?;
            let table = TABLE_PATH
                .iter()
                .try_fold(&root, |node, key| node.get(*key))
                .and_then(serde_json::Value::as_object);
            Ok(Some(
                table
                    .map(|t| {
                        t.iter()
                            .map(|(code, label)| (code.clone(), json_label(label)))
                            .collect()
                    })
                    .unwrap_or_default(),
            ))
        }
        Some(_) => Ok(None),
    }
}

fn toml_label(value: &toml::Value) -> String {
    value
        .as_str()
        .map(str::to_string)
        .unwrap_or_else(|| value.to_string())
}

fn json_label(value: &serde_json::Value) -> String {
    value
        .as_str()
        .map(str::to_string)
        .unwrap_or_else(|| value.to_string())
}

/// Merge the override tables of `files` (lowest precedence first), then `env`.
///
/// `None` when one of the files cannot be read raw.
pub fn merge_layers(
    files: &[PathBuf],
    env: HashMap<String, String>,
) -> Result<Option<HashMap<String, String>>, SegmentError> {
    let mut merged = HashMap::new();
    for path in files {
        match read_file(path)? {
            Some(table) => merged.extend(table),
            None => {
                debug!(
                    config_path = %path.display(),
                    "Mode override keys keep the config crate's lowercase folding"
                );
                return Ok(None);
            }
        }
    }
    merged.extend(env);
    Ok(Some(merged))
}

/// Replace the folded override table of `config` with the case-preserving one
pub fn restore_case(
    config: &mut VimsegConfig,
    files: &[PathBuf],
    env: HashMap<String, String>,
) -> Result<(), SegmentError> {
    if let Some(overrides) = merge_layers(files, env)? {
        config.segments.mode.overrides = overrides;
    }
    Ok(())
}
