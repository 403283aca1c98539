//! Platform settings persisted as TOML

use skillup_core::{Error, Result};
use skillup_types::PlatformSettings;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Settings file on disk
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    /// Store backed by `path`; the file need not exist yet
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the settings file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the saved settings, or the defaults when nothing was saved
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(&self) -> Result<PlatformSettings> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => {
                let settings = toml::from_str(&contents)?;
                debug!(path = %self.path.display(), "loaded settings");
                Ok(settings)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(PlatformSettings::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Write `settings`, replacing the file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save(&self, settings: &PlatformSettings) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let contents = toml::to_string_pretty(settings)?;
        fs::write(&self.path, contents)?;
        info!(path = %self.path.display(), "settings saved");
        Ok(())
    }

    /// Drop the saved settings and return the defaults
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be removed.
    pub fn reset(&self) -> Result<PlatformSettings> {
        match fs::remove_file(&self.path) {
            Ok(()) => info!(path = %self.path.display(), "settings reset"),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(Error::Io(e)),
        }
        Ok(PlatformSettings::default())
    }
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use skillup_types::LogLevel;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let store = SettingsStore::new(dir.path().join("settings.toml"));
        assert_eq!(store.load().unwrap(), PlatformSettings::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let store = SettingsStore::new(dir.path().join("nested").join("settings.toml"));

        let mut settings = PlatformSettings::default();
        settings.general.site_name = "SkillUp Staging".to_string();
        settings.system.log_level = LogLevel::Debug;
        store.save(&settings).unwrap();

        assert_eq!(store.load().unwrap(), settings);
        assert_eq!(store.reset().unwrap(), PlatformSettings::default());
        assert!(!store.path().exists());
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.toml");
        fs::write(&path, "general = 42").unwrap();
        assert!(SettingsStore::new(path).load().is_err());
    }
}
