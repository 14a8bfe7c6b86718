//! Environment source: `VIMSEG__SEGMENTS__POSITION__GRADIENT=true`.

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::Environment;
use std::collections::HashMap;

pub const ENV_PREFIX: &str = "VIMSEG";
pub const ENV_SEPARATOR: &str = "__";

pub fn add_to_builder(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
    builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .separator(ENV_SEPARATOR)
            .try_parsing(true),
    )
}

/// Mode labels set through `VIMSEG__SEGMENTS__MODE__OVERRIDE__<CODE>`.
///
/// Variable names cannot carry the case of a mode code, so codes are
/// lowercased like every other environment key.
pub fn mode_overrides() -> HashMap<String, String> {
    mode_overrides_from(
        std::env::vars_os()
            .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?))),
    )
}

fn mode_overrides_from(vars: impl IntoIterator<Item = (String, String)>) -> HashMap<String, String> {
    let prefix = format!("{0}{1}SEGMENTS{1}MODE{1}OVERRIDE{1}", ENV_PREFIX, ENV_SEPARATOR);
    vars.into_iter()
        .filter_map(|(key, value)| {
            let code = key.to_uppercase().strip_prefix(&prefix)?.to_lowercase();
            (!code.is_empty()).then_some((code, value))
        })
        .collect()
}
