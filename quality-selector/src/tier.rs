//! Quality tier table
//!
//! Tiers are ordered from lowest to highest quality. The ordering is
//! significant: it drives tier comparisons and the forced drop to the
//! lowest tier when playback is backgrounded.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SelectorError;

/// A discrete named video quality profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum QualityTier {
    #[serde(rename = "240p")]
    Q240p,
    #[serde(rename = "360p")]
    Q360p,
    #[serde(rename = "480p")]
    Q480p,
    #[serde(rename = "720p")]
    Q720p,
    #[serde(rename = "1080p")]
    Q1080p,
}

/// Fixed media attributes for a quality tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierProfile {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Target video bitrate in bits per second
    pub video_bitrate_bps: u32,
    /// Framerate in fps
    pub framerate: u32,
    /// Audio bitrate in bits per second
    pub audio_bitrate_bps: u32,
}

impl QualityTier {
    /// All tiers, lowest quality first.
    pub const ALL: [QualityTier; 5] = [
        QualityTier::Q240p,
        QualityTier::Q360p,
        QualityTier::Q480p,
        QualityTier::Q720p,
        QualityTier::Q1080p,
    ];

    /// Media attributes for this tier.
    pub fn profile(self) -> TierProfile {
        match self {
            QualityTier::Q240p => TierProfile {
                width: 426,
                height: 240,
                video_bitrate_bps: 400_000,
                framerate: 15,
                audio_bitrate_bps: 64_000,
            },
            QualityTier::Q360p => TierProfile {
                width: 640,
                height: 360,
                video_bitrate_bps: 800_000,
                framerate: 24,
                audio_bitrate_bps: 96_000,
            },
            QualityTier::Q480p => TierProfile {
                width: 854,
                height: 480,
                video_bitrate_bps: 1_200_000,
                framerate: 30,
                audio_bitrate_bps: 128_000,
            },
            QualityTier::Q720p => TierProfile {
                width: 1280,
                height: 720,
                video_bitrate_bps: 2_500_000,
                framerate: 30,
                audio_bitrate_bps: 128_000,
            },
            QualityTier::Q1080p => TierProfile {
                width: 1920,
                height: 1080,
                video_bitrate_bps: 4_500_000,
                framerate: 30,
                audio_bitrate_bps: 192_000,
            },
        }
    }

    /// UI label for this tier ("720p").
    pub fn label(self) -> &'static str {
        match self {
            QualityTier::Q240p => "240p",
            QualityTier::Q360p => "360p",
            QualityTier::Q480p => "480p",
            QualityTier::Q720p => "720p",
            QualityTier::Q1080p => "1080p",
        }
    }

    /// Lowest quality tier.
    pub fn lowest() -> QualityTier {
        QualityTier::Q240p
    }

    /// Highest quality tier.
    pub fn highest() -> QualityTier {
        QualityTier::Q1080p
    }

    /// Next tier up, if any.
    pub fn higher(self) -> Option<QualityTier> {
        match self {
            QualityTier::Q240p => Some(QualityTier::Q360p),
            QualityTier::Q360p => Some(QualityTier::Q480p),
            QualityTier::Q480p => Some(QualityTier::Q720p),
            QualityTier::Q720p => Some(QualityTier::Q1080p),
            QualityTier::Q1080p => None,
        }
    }

    /// Next tier down, if any.
    pub fn lower(self) -> Option<QualityTier> {
        match self {
            QualityTier::Q1080p => Some(QualityTier::Q720p),
            QualityTier::Q720p => Some(QualityTier::Q480p),
            QualityTier::Q480p => Some(QualityTier::Q360p),
            QualityTier::Q360p => Some(QualityTier::Q240p),
            QualityTier::Q240p => None,
        }
    }
}

impl fmt::Display for QualityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for QualityTier {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        QualityTier::ALL
            .iter()
            .find(|t| t.label().eq_ignore_ascii_case(s))
            .copied()
            .ok_or_else(|| SelectorError::InvalidTier(s.to_string()))
    }
}

/// What the user can select: a concrete tier, or automatic selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TierChoice {
    /// The selector owns tier selection
    Auto,
    /// A user-pinned tier
    Fixed(QualityTier),
}

impl fmt::Display for TierChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TierChoice::Auto => f.write_str("auto"),
            TierChoice::Fixed(tier) => tier.fmt(f),
        }
    }
}

impl FromStr for TierChoice {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("auto") {
            Ok(TierChoice::Auto)
        } else {
            Ok(TierChoice::Fixed(s.parse()?))
        }
    }
}
