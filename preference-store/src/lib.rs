//! Preference Store
//!
//! Best-effort TOML persistence of playback preferences under the XDG
//! config directory. Load failures never propagate to playback: callers use
//! [`PreferenceStore::load_or_default`] and fall back to defaults.

mod error;
mod paths;
mod store;

pub use error::PreferenceError;
pub use paths::{config_dir, preferences_path};
pub use store::PreferenceStore;
