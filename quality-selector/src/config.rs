//! Selector configuration and user preferences

use serde::{Deserialize, Serialize};

/// Priority mode for combining condition scores
///
/// Determines how much weight network, device, and buffer conditions carry
/// when picking a tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum QualityPriority {
    /// Favor the highest sustainable picture quality
    Quality,

    /// Even split between network, device, and buffer health
    #[default]
    Balanced,

    /// Favor smooth playback on weak devices
    Performance,

    /// Favor network headroom, react to bandwidth first
    Bandwidth,
}

/// User-controlled playback preferences
///
/// Mutated by UI actions and persisted externally; loaded at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPreference {
    /// Priority mode for score weighting
    #[serde(default)]
    pub priority: QualityPriority,

    /// Scale scores down to conserve data
    #[serde(default)]
    pub data_saver: bool,

    /// Let the selector own tier selection
    #[serde(default = "default_auto_enabled")]
    pub auto_enabled: bool,
}

fn default_auto_enabled() -> bool {
    true
}

impl Default for UserPreference {
    fn default() -> Self {
        Self {
            priority: QualityPriority::Balanced,
            data_saver: false,
            auto_enabled: default_auto_enabled(),
        }
    }
}

/// Quality selector configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectorConfig {
    /// Maximum accepted quality changes per rolling 60s window (default: 6)
    #[serde(default = "default_max_changes_per_minute")]
    pub max_changes_per_minute: u32,

    /// Network sample ring buffer capacity (default: 20)
    #[serde(default = "default_sample_capacity")]
    pub sample_capacity: usize,

    /// Newest-sample age beyond which the window scores neutral (default: 30)
    #[serde(default = "default_sample_max_age_secs")]
    pub sample_max_age_secs: u64,

    /// Evaluation cadence for the external scheduler (default: 5)
    #[serde(default = "default_evaluation_interval_secs")]
    pub evaluation_interval_secs: u64,

    /// Delay before evaluation resumes after the tab becomes visible (default: 2000)
    #[serde(default = "default_visibility_resume_delay_ms")]
    pub visibility_resume_delay_ms: u64,

    /// Score multiplier applied when data saver is enabled (default: 0.7)
    #[serde(default = "default_data_saver_factor")]
    pub data_saver_factor: f64,
}

fn default_max_changes_per_minute() -> u32 {
    6
}

fn default_sample_capacity() -> usize {
    20
}

fn default_sample_max_age_secs() -> u64 {
    30
}

fn default_evaluation_interval_secs() -> u64 {
    5
}

fn default_visibility_resume_delay_ms() -> u64 {
    2000
}

fn default_data_saver_factor() -> f64 {
    0.7
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            max_changes_per_minute: default_max_changes_per_minute(),
            sample_capacity: default_sample_capacity(),
            sample_max_age_secs: default_sample_max_age_secs(),
            evaluation_interval_secs: default_evaluation_interval_secs(),
            visibility_resume_delay_ms: default_visibility_resume_delay_ms(),
            data_saver_factor: default_data_saver_factor(),
        }
    }
}
