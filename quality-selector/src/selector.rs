//! Quality selector state machine
//!
//! Owns the current tier, scores incoming measurements on demand, and
//! decides when the tier should change. The selector is single-threaded and
//! driven entirely by its caller: an external scheduler invokes
//! [`QualitySelector::evaluate`] on a fixed cadence, the sampler feeds
//! [`QualitySelector::record_network_sample`] from its own timer, and UI
//! callbacks land in [`QualitySelector::set_manual_quality`].
//!
//! Only one change may be in flight at a time. Evaluation runs synchronously
//! inside `evaluate`, so the observable states are `Idle` and `Changing`;
//! requests that arrive while a change is in flight are dropped, never
//! queued.

use std::time::{Duration, Instant};

use crate::config::{QualityPriority, SelectorConfig, UserPreference};
use crate::decision::{DecisionReason, QualityDecision};
use crate::error::SelectorError;
use crate::limiter::ChangeRateLimiter;
use crate::sample::{BufferCondition, DeviceCondition, NetworkSample, SampleWindow};
use crate::score;
use crate::tier::{QualityTier, TierChoice};

/// Observable selector state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorState {
    /// No change in flight
    Idle,
    /// A decision was accepted and awaits the sink's apply outcome
    Changing {
        pending: QualityTier,
        reason: DecisionReason,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Visibility {
    Visible,
    Hidden,
    /// Visible again, but still inside the resume delay
    Resuming { until: Instant },
}

/// Adaptive quality selector.
#[derive(Debug)]
pub struct QualitySelector {
    config: SelectorConfig,
    priority: QualityPriority,
    data_saver: bool,
    auto_enabled: bool,
    current_tier: QualityTier,
    state: SelectorState,
    window: SampleWindow,
    device: Option<DeviceCondition>,
    limiter: ChangeRateLimiter,
    visibility: Visibility,
    reeval_requested: bool,
}

impl QualitySelector {
    /// Create a selector from configuration and the loaded user preference.
    ///
    /// Playback starts at the lowest tier; the first evaluation steps up
    /// once conditions support it.
    pub fn new(config: SelectorConfig, preference: UserPreference) -> Self {
        let limiter = ChangeRateLimiter::new(config.max_changes_per_minute);
        let window = SampleWindow::new(config.sample_capacity);
        Self {
            priority: preference.priority,
            data_saver: preference.data_saver,
            auto_enabled: preference.auto_enabled,
            current_tier: QualityTier::lowest(),
            state: SelectorState::Idle,
            window,
            device: None,
            limiter,
            visibility: Visibility::Visible,
            reeval_requested: false,
            config,
        }
    }

    /// Feed a bandwidth measurement into the sample window.
    ///
    /// Invalid samples (negative or non-finite bandwidth) are dropped.
    pub fn record_network_sample(&mut self, sample: NetworkSample) {
        self.window.push(sample);
    }

    /// Replace the cached device capability reading.
    pub fn update_device_condition(&mut self, condition: DeviceCondition) {
        self.device = Some(condition);
    }

    /// Score current conditions and decide whether the tier should change.
    ///
    /// Returns `None` when auto mode is disabled, playback is backgrounded
    /// or still inside the visibility resume delay, a change is in flight,
    /// the computed tier equals the current one, or the rate limit would be
    /// violated. A returned decision means a change is now in flight; the
    /// host must apply it and report back via [`Self::complete_change`].
    pub fn evaluate(
        &mut self,
        now: Instant,
        buffer: Option<BufferCondition>,
    ) -> Option<QualityDecision> {
        if !self.auto_enabled {
            return None;
        }
        match self.visibility {
            Visibility::Hidden => return None,
            Visibility::Resuming { until } => {
                if now < until {
                    return None;
                }
                self.visibility = Visibility::Visible;
            }
            Visibility::Visible => {}
        }
        if matches!(self.state, SelectorState::Changing { .. }) {
            return None;
        }

        self.reeval_requested = false;

        let max_age = Duration::from_secs(self.config.sample_max_age_secs);
        let averages = self.window.fresh_averages(now, max_age);
        let scores = score::evaluate_scores(
            averages.as_ref(),
            self.device.as_ref(),
            buffer.as_ref(),
            self.priority,
            self.data_saver,
            self.config.data_saver_factor,
        );
        let target = score::tier_for_score(scores.combined);

        tracing::debug!(
            "Evaluation: network={:.2} device={:.2} buffer={:.2} combined={:.2} -> {}",
            scores.network,
            scores.device,
            scores.buffer,
            scores.combined,
            target
        );

        if target == self.current_tier {
            return None;
        }
        if !self.limiter.try_acquire(now) {
            tracing::debug!(
                "Tier change {} -> {} dropped by rate limit",
                self.current_tier,
                target
            );
            return None;
        }

        self.state = SelectorState::Changing {
            pending: target,
            reason: DecisionReason::Adaptive,
        };
        Some(QualityDecision::adaptive(
            TierChoice::Fixed(target),
            scores.combined,
        ))
    }

    /// Request a user-driven tier change, bypassing scoring.
    ///
    /// A concrete tier disables auto mode, obeys the rate limit, and enters
    /// the changing state like any other accepted decision. `Auto`
    /// re-enables automatic selection without touching the active tier; the
    /// next evaluation takes over.
    pub fn set_manual_quality(
        &mut self,
        now: Instant,
        choice: TierChoice,
    ) -> Result<QualityDecision, SelectorError> {
        match choice {
            TierChoice::Auto => {
                self.auto_enabled = true;
                self.reeval_requested = true;
                Ok(QualityDecision::manual(TierChoice::Auto))
            }
            TierChoice::Fixed(tier) => {
                if matches!(self.state, SelectorState::Changing { .. }) {
                    return Err(SelectorError::ChangeInFlight);
                }
                if !self.limiter.try_acquire(now) {
                    return Err(SelectorError::RateLimited);
                }
                self.auto_enabled = false;
                self.state = SelectorState::Changing {
                    pending: tier,
                    reason: DecisionReason::Manual,
                };
                Ok(QualityDecision::manual(TierChoice::Fixed(tier)))
            }
        }
    }

    /// Parse a UI label ("720p", "auto") and request the change.
    pub fn set_manual_quality_label(
        &mut self,
        now: Instant,
        label: &str,
    ) -> Result<QualityDecision, SelectorError> {
        let choice: TierChoice = label.parse()?;
        self.set_manual_quality(now, choice)
    }

    /// Report the video sink's apply outcome for the in-flight change.
    ///
    /// On success the pending tier becomes current; on refusal the previous
    /// tier is retained. Returns the newly current tier when the change was
    /// applied, `None` otherwise (including when no change was in flight).
    pub fn complete_change(&mut self, applied: bool) -> Option<QualityTier> {
        let SelectorState::Changing { pending, reason } = self.state else {
            return None;
        };
        self.state = SelectorState::Idle;
        if applied {
            tracing::info!(
                "Quality change applied: {} -> {} ({:?})",
                self.current_tier,
                pending,
                reason
            );
            self.current_tier = pending;
            Some(pending)
        } else {
            tracing::warn!(
                "Video sink refused tier {}; staying at {}",
                pending,
                self.current_tier
            );
            None
        }
    }

    /// Change the priority mode. Requests a re-evaluation when auto mode is
    /// active; never changes the tier directly.
    pub fn set_priority(&mut self, priority: QualityPriority) {
        self.priority = priority;
        if self.auto_enabled {
            self.reeval_requested = true;
        }
    }

    /// Toggle data saver. Requests a re-evaluation when auto mode is active.
    pub fn set_data_saver(&mut self, enabled: bool) {
        self.data_saver = enabled;
        if self.auto_enabled {
            self.reeval_requested = true;
        }
    }

    /// Enable or disable automatic selection.
    pub fn set_auto_enabled(&mut self, enabled: bool) {
        self.auto_enabled = enabled;
        self.reeval_requested = enabled;
    }

    /// Force a drop toward the lowest tier because playback left the
    /// foreground. Bypasses scoring and the rate limiter; evaluation stays
    /// suspended until [`Self::on_visibility_visible`].
    ///
    /// Returns `None` when already at the lowest tier or while another
    /// change is in flight (requests are dropped, not queued).
    pub fn on_visibility_hidden(&mut self) -> Option<QualityDecision> {
        self.visibility = Visibility::Hidden;
        if matches!(self.state, SelectorState::Changing { .. }) {
            return None;
        }
        let lowest = QualityTier::lowest();
        if self.current_tier == lowest {
            return None;
        }
        self.state = SelectorState::Changing {
            pending: lowest,
            reason: DecisionReason::Background,
        };
        Some(QualityDecision::background(TierChoice::Fixed(lowest)))
    }

    /// Resume normal evaluation after the configured delay.
    pub fn on_visibility_visible(&mut self, now: Instant) {
        if self.visibility == Visibility::Hidden {
            self.visibility = Visibility::Resuming {
                until: now + Duration::from_millis(self.config.visibility_resume_delay_ms),
            };
            self.reeval_requested = self.auto_enabled;
        }
    }

    /// Whether a mutator asked for an evaluation ahead of cadence.
    pub fn needs_evaluation(&self) -> bool {
        self.reeval_requested && self.auto_enabled
    }

    /// The tier currently applied to the sink.
    pub fn current_tier(&self) -> QualityTier {
        self.current_tier
    }

    /// The current selection as the user sees it.
    pub fn current_choice(&self) -> TierChoice {
        if self.auto_enabled {
            TierChoice::Auto
        } else {
            TierChoice::Fixed(self.current_tier)
        }
    }

    pub fn state(&self) -> SelectorState {
        self.state
    }

    pub fn is_changing(&self) -> bool {
        matches!(self.state, SelectorState::Changing { .. })
    }

    pub fn auto_enabled(&self) -> bool {
        self.auto_enabled
    }

    pub fn priority(&self) -> QualityPriority {
        self.priority
    }

    pub fn data_saver(&self) -> bool {
        self.data_saver
    }

    /// Snapshot the mutable preference state for persistence.
    pub fn preference(&self) -> UserPreference {
        UserPreference {
            priority: self.priority,
            data_saver: self.data_saver,
            auto_enabled: self.auto_enabled,
        }
    }

    pub fn config(&self) -> &SelectorConfig {
        &self.config
    }

    pub fn sample_count(&self) -> usize {
        self.window.len()
    }
}
