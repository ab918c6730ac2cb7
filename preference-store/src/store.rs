use std::path::{Path, PathBuf};

use quality_selector::UserPreference;

use crate::error::PreferenceError;
use crate::paths;

/// File-backed store for [`UserPreference`].
#[derive(Debug, Clone)]
pub struct PreferenceStore {
    path: PathBuf,
}

impl PreferenceStore {
    /// Store at the default XDG location.
    pub fn open_default() -> Result<Self, PreferenceError> {
        Ok(Self {
            path: paths::preferences_path()?,
        })
    }

    /// Store at a specific path.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Load the persisted preference.
    pub fn load(&self) -> Result<UserPreference, PreferenceError> {
        if !self.path.exists() {
            return Err(PreferenceError::NotFound(self.path.display().to_string()));
        }
        let content = std::fs::read_to_string(&self.path)?;
        let preference: UserPreference = toml::from_str(&content)?;
        Ok(preference)
    }

    /// Load the persisted preference, falling back to defaults.
    ///
    /// A missing file is expected on first run; anything else is logged.
    pub fn load_or_default(&self) -> UserPreference {
        match self.load() {
            Ok(preference) => preference,
            Err(PreferenceError::NotFound(_)) => UserPreference::default(),
            Err(e) => {
                tracing::warn!("Could not load preferences ({}), using defaults", e);
                UserPreference::default()
            }
        }
    }

    /// Save the preference, creating the parent directory if needed.
    pub fn save(&self, preference: &UserPreference) -> Result<(), PreferenceError> {
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let content = toml::to_string_pretty(preference)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quality_selector::QualityPriority;

    #[test]
    fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = PreferenceStore::at(dir.path().join("preferences.toml"));

        let preference = UserPreference {
            priority: QualityPriority::Bandwidth,
            data_saver: true,
            auto_enabled: false,
        };
        store.save(&preference).unwrap();

        assert!(store.exists());
        assert_eq!(store.load().unwrap(), preference);
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = PreferenceStore::at(dir.path().join("preferences.toml"));

        assert!(matches!(
            store.load(),
            Err(PreferenceError::NotFound(_))
        ));
        assert_eq!(store.load_or_default(), UserPreference::default());
    }

    #[test]
    fn test_corrupt_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.toml");
        std::fs::write(&path, "priority = 42\n").unwrap();

        let store = PreferenceStore::at(&path);
        assert!(matches!(store.load(), Err(PreferenceError::TomlParse(_))));
        assert_eq!(store.load_or_default(), UserPreference::default());
    }

    #[test]
    fn test_save_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let store = PreferenceStore::at(dir.path().join("nested/player/preferences.toml"));

        store.save(&UserPreference::default()).unwrap();
        assert!(store.exists());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.toml");
        std::fs::write(&path, "data_saver = true\n").unwrap();

        let loaded = PreferenceStore::at(&path).load().unwrap();
        assert!(loaded.data_saver);
        assert_eq!(loaded.priority, QualityPriority::Balanced);
        assert!(loaded.auto_enabled);
    }
}
