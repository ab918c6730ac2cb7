use std::path::PathBuf;

use crate::error::PreferenceError;

/// Get XDG config directory for the player
/// Returns ~/.config/interview-player or $XDG_CONFIG_HOME/interview-player
pub fn config_dir() -> Result<PathBuf, PreferenceError> {
    dirs::config_dir()
        .map(|p| p.join("interview-player"))
        .ok_or(PreferenceError::NoConfigDir)
}

/// Get default preference file path
/// Returns ~/.config/interview-player/preferences.toml
pub fn preferences_path() -> Result<PathBuf, PreferenceError> {
    Ok(config_dir()?.join("preferences.toml"))
}
