//! Adaptive Quality Selection for Interview Playback
//!
//! This crate provides the decision core for adaptive video quality control.
//! It scores periodic network, device, and buffer measurements and decides
//! when the active quality tier should change.
//!
//! # Components
//!
//! - [`tier`]: The ordered quality tier table and per-tier media attributes
//! - [`config`]: Selector configuration and user preferences
//! - [`sample`]: Measurement types and the bounded network sample window
//! - [`score`]: Step-function scoring and score-to-tier mapping
//! - [`limiter`]: Rate limiting of accepted quality changes
//! - [`selector`]: The quality selector state machine
//!
//! The selector only emits decisions; applying a tier to the actual media
//! pipeline is the host's responsibility, reported back via
//! [`QualitySelector::complete_change`].

mod config;
mod decision;
mod error;
mod limiter;
mod sample;
mod score;
mod selector;
mod tier;

pub use config::{QualityPriority, SelectorConfig, UserPreference};
pub use decision::{DecisionReason, QualityDecision};
pub use error::SelectorError;
pub use limiter::ChangeRateLimiter;
pub use sample::{
    BufferCondition, DeviceCondition, NetworkAverages, NetworkSample, SampleWindow,
};
pub use score::{evaluate_scores, tier_for_score, ScoreBreakdown, ScoreWeights, NEUTRAL_SCORE};
pub use selector::{QualitySelector, SelectorState};
pub use tier::{QualityTier, TierChoice, TierProfile};
