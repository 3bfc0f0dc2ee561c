//! Host side of the generator interface.
//!
//! Resolves a generator from the registry, prepares the settings values it
//! is run with, and collects the primitives it emits.

use std::path::Path;
use std::sync::Arc;
use tpgkit_core::{Result, Toolpath, TpgError};
use tpgkit_settings::SettingsValues;
use tpgkit_tpg::{Tpg, TpgRegistry};
use tracing::info;

/// Generator matching an id or a name
pub fn resolve(registry: &TpgRegistry, key: &str) -> Result<Arc<dyn Tpg>> {
    registry
        .resolve(key)
        .ok_or_else(|| TpgError::other(format!("No TPG matches '{}'", key)))
}

/// Settings values for `tpg`: loaded from `path` when given, with defaults
/// filled in for anything the file leaves out.
pub fn prepare_settings(tpg: &dyn Tpg, path: Option<&Path>) -> Result<SettingsValues> {
    let schema = tpg.describe_settings()?;
    let mut values = match path {
        Some(path) => SettingsValues::load_from_file(path)?,
        None => SettingsValues::new(),
    };
    values.add_defaults(schema);
    if values.selected_action().is_none() {
        if let Some(first) = schema.actions().next() {
            values.set_action(schema, first)?;
        }
    }
    Ok(values)
}

/// Run `action` (or the selected action) on a fresh toolpath
pub fn run_action(
    tpg: &dyn Tpg,
    settings: &SettingsValues,
    action: Option<&str>,
) -> Result<Toolpath> {
    let action = action
        .or_else(|| settings.selected_action())
        .unwrap_or("default");
    let mut toolpath = Toolpath::new();
    tpg.run(settings, &mut toolpath, action)?;
    info!(
        "{} '{}' produced {} primitive(s)",
        tpg.describe().name,
        action,
        toolpath.len()
    );
    Ok(toolpath)
}
