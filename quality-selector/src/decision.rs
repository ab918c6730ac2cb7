//! Decision types emitted by the selector

use serde::Serialize;

use crate::tier::TierChoice;

/// What triggered a decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DecisionReason {
    /// Direct user action
    Manual,
    /// Periodic evaluation of measured conditions
    Adaptive,
    /// Playback moved to a hidden tab
    Background,
}

/// A tier selection the host should apply to the video sink.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QualityDecision {
    /// The chosen tier, or a return to automatic selection
    pub choice: TierChoice,
    pub reason: DecisionReason,
    /// Combined score behind an adaptive choice; absent for manual and
    /// background decisions
    pub score: Option<f64>,
}

impl QualityDecision {
    pub(crate) fn adaptive(choice: TierChoice, score: f64) -> Self {
        Self {
            choice,
            reason: DecisionReason::Adaptive,
            score: Some(score),
        }
    }

    pub(crate) fn manual(choice: TierChoice) -> Self {
        Self {
            choice,
            reason: DecisionReason::Manual,
            score: None,
        }
    }

    pub(crate) fn background(choice: TierChoice) -> Self {
        Self {
            choice,
            reason: DecisionReason::Background,
            score: None,
        }
    }
}
