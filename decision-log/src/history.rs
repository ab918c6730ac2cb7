use std::collections::VecDeque;

use quality_selector::QualityDecision;

use crate::record::DecisionRecord;

/// Default history capacity.
pub const DEFAULT_CAPACITY: usize = 100;

/// Bounded FIFO history of completed quality decisions.
#[derive(Debug)]
pub struct DecisionHistory {
    records: VecDeque<DecisionRecord>,
    capacity: usize,
}

impl Default for DecisionHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl DecisionHistory {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a completed decision, evicting the oldest beyond capacity.
    pub fn record(&mut self, decision: QualityDecision, applied: bool) {
        tracing::info!(
            "Quality decision: {} ({:?}, applied={})",
            decision.choice,
            decision.reason,
            applied
        );
        if self.records.len() >= self.capacity {
            self.records.pop_front();
        }
        self.records.push_back(DecisionRecord::new(decision, applied));
    }

    pub fn latest(&self) -> Option<&DecisionRecord> {
        self.records.back()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DecisionRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Export the history as pretty JSON for analytics.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quality_selector::{DecisionReason, QualityTier, TierChoice};

    fn decision(tier: QualityTier) -> QualityDecision {
        QualityDecision {
            choice: TierChoice::Fixed(tier),
            reason: DecisionReason::Adaptive,
            score: Some(0.5),
        }
    }

    #[test]
    fn test_history_caps_at_capacity() {
        let mut history = DecisionHistory::new();
        for _ in 0..250 {
            history.record(decision(QualityTier::Q480p), true);
            assert!(history.len() <= DEFAULT_CAPACITY);
        }
        assert_eq!(history.len(), DEFAULT_CAPACITY);
    }

    #[test]
    fn test_fifo_eviction_keeps_latest() {
        let mut history = DecisionHistory::with_capacity(2);
        history.record(decision(QualityTier::Q240p), true);
        history.record(decision(QualityTier::Q480p), false);
        history.record(decision(QualityTier::Q1080p), true);

        assert_eq!(history.len(), 2);
        let latest = history.latest().unwrap();
        assert_eq!(latest.decision.choice, TierChoice::Fixed(QualityTier::Q1080p));
        assert!(latest.applied);

        let oldest = history.iter().next().unwrap();
        assert_eq!(oldest.decision.choice, TierChoice::Fixed(QualityTier::Q480p));
        assert!(!oldest.applied);
    }

    #[test]
    fn test_json_export_carries_labels() {
        let mut history = DecisionHistory::new();
        history.record(decision(QualityTier::Q720p), true);

        let json = history.to_json().unwrap();
        assert!(json.contains("720p"));
        assert!(json.contains("adaptive"));
        assert!(json.contains("\"applied\": true"));
    }
}
