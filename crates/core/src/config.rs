//! Application configuration handling.

use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::rubric::RubricVariant;
use crate::storage::GameStore;

/// Settings read from the user config file, with `PLAYLEDGER_*` environment
/// overrides layered on top.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directory holding the persisted game collection.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Directory snapshot exports are written to.
    #[serde(default = "default_export_dir")]
    pub export_dir: PathBuf,
    /// Which built-in rubric this deployment evaluates against.
    #[serde(default)]
    pub rubric: RubricVariant,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            export_dir: default_export_dir(),
            rubric: RubricVariant::default(),
        }
    }
}

impl AppConfig {
    /// Load the user config file (if present) plus environment overrides.
    pub fn load() -> Result<Self> {
        Self::load_from(config_path())
    }

    /// Load from an explicit path; missing files yield the defaults.
    pub fn load_from(path: impl Into<PathBuf>) -> Result<Self> {
        let settings = ::config::Config::builder()
            .add_source(::config::File::from(path.into()).required(false))
            .add_source(::config::Environment::with_prefix("PLAYLEDGER"))
            .build()
            .context("failed to read configuration")?;
        settings
            .try_deserialize()
            .context("invalid configuration")
    }
}

fn default_data_dir() -> PathBuf {
    GameStore::default_root()
}

fn default_export_dir() -> PathBuf {
    dirs::download_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Path of the user config file under the platform config directory.
pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("playledger")
        .join("config.toml")
}

/// Write a default config file on first run so the settings are
/// discoverable. Existing files are left alone.
pub fn ensure_default_config() -> Result<()> {
    ensure_default_config_at(config_path())
}

/// [`ensure_default_config`] with an explicit target path.
pub fn ensure_default_config_at(path: impl Into<PathBuf>) -> Result<()> {
    let path = path.into();
    if path.exists() {
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let defaults = AppConfig::default();
    let contents = format!(
        "# PlayLedger configuration.\n\
         \n\
         # Where the game collection is stored.\n\
         data_dir = \"{}\"\n\
         \n\
         # Where exports land.\n\
         export_dir = \"{}\"\n\
         \n\
         # Rubric revision: \"standard\" (8 criteria, watch list) or\n\
         # \"extended\" (10 criteria).\n\
         rubric = \"standard\"\n",
        defaults.data_dir.display(),
        defaults.export_dir.display()
    );
    fs::write(&path, contents).with_context(|| format!("failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_yields_defaults() -> Result<()> {
        let dir = tempdir()?;
        let config = AppConfig::load_from(dir.path().join("absent.toml"))?;
        assert_eq!(config.rubric, RubricVariant::Standard);
        assert_eq!(config.data_dir, default_data_dir());
        Ok(())
    }

    #[test]
    fn file_settings_are_applied() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "data_dir = \"/tmp/ledger\"\nrubric = \"extended\"\n",
        )?;
        let config = AppConfig::load_from(&path)?;
        assert_eq!(config.data_dir, PathBuf::from("/tmp/ledger"));
        assert_eq!(config.rubric, RubricVariant::Extended);
        assert_eq!(config.export_dir, default_export_dir());
        Ok(())
    }

    #[test]
    fn default_config_is_written_once() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("nested").join("config.toml");
        ensure_default_config_at(&path)?;
        assert!(path.exists());
        let written = fs::read_to_string(&path)?;
        assert!(written.contains("rubric = \"standard\""));

        // A second call must not clobber user edits.
        fs::write(&path, "rubric = \"extended\"\n")?;
        ensure_default_config_at(&path)?;
        assert!(fs::read_to_string(&path)?.contains("extended"));
        Ok(())
    }
}
