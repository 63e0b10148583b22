//! Persisted light/dark preference.
//!
//! Stored as `theme = "dark"` in `settings.toml` under the user config dir.
//! Failing to read or write it only costs the preference: callers always get
//! a usable theme back and search keeps working.

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use atomicwrites::{AtomicFile, OverwriteBehavior};
use log::warn;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct Settings {
    #[serde(default)]
    theme: Theme,
}

/// Location of the settings file, if the platform has a config dir.
#[derive(Debug, Clone)]
pub struct ThemeStore {
    path: Option<PathBuf>,
}

impl ThemeStore {
    pub fn open() -> Self {
        Self {
            path: dirs::config_dir().map(|dir| dir.join("menufind").join("settings.toml")),
        }
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// Saved theme, or the default when there is none or it can't be read.
    pub fn load(&self) -> Theme {
        match self.try_load() {
            Ok(theme) => theme.unwrap_or_default(),
            Err(e) => {
                warn!("Ignoring saved theme: {e:#}");
                Theme::default()
            }
        }
    }

    /// Save `theme`, logging instead of failing.
    pub fn save(&self, theme: Theme) {
        if let Err(e) = self.try_save(theme) {
            warn!("Failed to save theme: {e:#}");
        }
    }

    fn try_load(&self) -> Result<Option<Theme>> {
        let Some(path) = &self.path else {
            return Ok(None);
        };
        if !path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let settings: Settings =
            toml::from_str(&contents).with_context(|| format!("Invalid {}", path.display()))?;
        Ok(Some(settings.theme))
    }

    fn try_save(&self, theme: Theme) -> Result<()> {
        let path = self.path.as_ref().context("No config directory")?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let contents = toml::to_string(&Settings { theme })?;
        AtomicFile::new(path, OverwriteBehavior::AllowOverwrite)
            .write(|f| {
                f.write_all(contents.as_bytes())?;
                f.flush()
            })
            .map_err(|err| anyhow::anyhow!("Failed to write {}: {err}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_means_light() {
        let dir = tempfile::tempdir().unwrap();
        let store = ThemeStore::at(dir.path().join("settings.toml"));
        assert_eq!(store.load(), Theme::Light);
    }

    #[test]
    fn saved_theme_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.toml");
        let store = ThemeStore::at(&path);

        store.save(Theme::Dark);

        assert_eq!(store.load(), Theme::Dark);
        assert_eq!(fs::read_to_string(&path).unwrap().trim(), r#"theme = "dark""#);
    }

    #[test]
    fn garbage_settings_fall_back_to_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        fs::write(&path, "theme = 42").unwrap();

        assert_eq!(ThemeStore::at(&path).load(), Theme::Light);
    }

    #[test]
    fn unwritable_location_does_not_panic() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, "").unwrap();

        let store = ThemeStore::at(blocker.join("settings.toml"));
        store.save(Theme::Dark);
        assert_eq!(store.load(), Theme::Light);
    }

    #[test]
    fn failed_save_leaves_no_partial_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        fs::create_dir(&path).unwrap();

        ThemeStore::at(&path).save(Theme::Dark);

        let entries: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(entries, vec!["settings.toml"]);
        assert!(path.is_dir());
    }

    #[test]
    fn toggling_flips() {
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
    }
}
