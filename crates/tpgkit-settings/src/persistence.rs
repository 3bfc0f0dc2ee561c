//! Settings persistence
//!
//! Loads and saves [`SettingsValues`] as JSON or TOML, chosen by file
//! extension, and resolves a per-generator values file under the platform
//! configuration directory.

use crate::values::SettingsValues;
use std::path::{Path, PathBuf};
use tpgkit_core::{Result, TpgError};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Json,
    Toml,
}

fn format_of(path: &Path) -> Result<Format> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Ok(Format::Json),
        Some("toml") => Ok(Format::Toml),
        _ => Err(TpgError::UnsupportedFormat(format!(
            "{} (settings file must be .json or .toml)",
            path.display()
        ))),
    }
}

impl SettingsValues {
    /// Load values from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let format = format_of(path)?;
        let content = std::fs::read_to_string(path)?;
        let values = match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };
        debug!("Loaded settings values from {}", path.display());
        Ok(values)
    }

    /// Save values to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let content = match format_of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };
        std::fs::write(path, content)?;
        debug!("Saved settings values to {}", path.display());
        Ok(())
    }
}

/// Stores one values file per tool path generator, keyed by its id
#[derive(Debug, Clone)]
pub struct SettingsPersistence {
    base_dir: PathBuf,
}

impl SettingsPersistence {
    /// Persistence rooted at `<config dir>/tpgkit/tpg`
    pub fn new() -> Result<Self> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| TpgError::other("No configuration directory on this platform"))?;
        Ok(Self::with_base_dir(config_dir.join("tpgkit").join("tpg")))
    }

    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn values_path(&self, tpg_id: &str) -> PathBuf {
        self.base_dir.join(format!("{}.json", tpg_id))
    }

    /// Values saved for `tpg_id`, or `None` if nothing was saved yet
    pub fn load(&self, tpg_id: &str) -> Result<Option<SettingsValues>> {
        let path = self.values_path(tpg_id);
        if !path.exists() {
            return Ok(None);
        }
        SettingsValues::load_from_file(&path).map(Some)
    }

    pub fn save(&self, tpg_id: &str, values: &SettingsValues) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.base_dir)?;
        let path = self.values_path(tpg_id);
        values.save_to_file(&path)?;
        Ok(path)
    }
}
