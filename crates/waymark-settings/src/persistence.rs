//! Settings Persistence
//!
//! Locates the per-user config file and loads or saves `EditorConfig`.

use std::path::{Path, PathBuf};

use crate::config::EditorConfig;
use crate::error::{SettingsError, SettingsResult};

const APP_DIR: &str = "waymark";
const CONFIG_FILE: &str = "config.toml";

/// Settings persistence layer
#[derive(Debug, Clone)]
pub struct SettingsPersistence {
    path: PathBuf,
    config: EditorConfig,
}

impl SettingsPersistence {
    /// Persistence bound to an explicit file, starting from defaults
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            config: EditorConfig::default(),
        }
    }

    /// Persistence bound to `<config dir>/waymark/config.toml`
    pub fn in_config_dir() -> SettingsResult<Self> {
        Ok(Self::at(Self::default_path()?))
    }

    /// Platform config file location
    pub fn default_path() -> SettingsResult<PathBuf> {
        let base = dirs::config_dir().ok_or_else(|| {
            SettingsError::ConfigDirectory("no platform config directory".to_string())
        })?;
        Ok(base.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Load the file if it exists, otherwise keep defaults
    pub fn load_or_default(mut self) -> SettingsResult<Self> {
        if self.path.exists() {
            self.config = EditorConfig::load_from_file(&self.path)?;
            tracing::info!("Loaded settings from {}", self.path.display());
        } else {
            tracing::debug!("No settings at {}, using defaults", self.path.display());
        }
        Ok(self)
    }

    /// Write the current config, creating parent directories
    pub fn save(&self) -> SettingsResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                SettingsError::ConfigDirectory(format!("{}: {}", parent.display(), e))
            })?;
        }
        self.config.save_to_file(&self.path)?;
        tracing::info!("Saved settings to {}", self.path.display());
        Ok(())
    }

    /// Get reference to config
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Get mutable reference to config
    pub fn config_mut(&mut self) -> &mut EditorConfig {
        &mut self.config
    }

    /// File this persistence reads and writes
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let persistence = SettingsPersistence::at(dir.path().join("absent.toml"))
            .load_or_default()
            .unwrap();
        assert_eq!(persistence.config(), &EditorConfig::default());
    }

    #[test]
    fn test_save_creates_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("waymark").join("config.toml");

        let mut persistence = SettingsPersistence::at(&path);
        persistence.config_mut().map.zoom = 9;
        persistence.save().unwrap();
        assert!(path.exists());

        let reloaded = SettingsPersistence::at(&path).load_or_default().unwrap();
        assert_eq!(reloaded.config().map.zoom, 9);
    }

    #[test]
    fn test_default_path_shape() {
        if let Ok(path) = SettingsPersistence::default_path() {
            assert!(path.ends_with("waymark/config.toml"));
        }
    }
}
