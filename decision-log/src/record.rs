use chrono::{DateTime, Utc};
use quality_selector::QualityDecision;
use serde::Serialize;

/// A quality decision as it completed, stamped with wall-clock time.
#[derive(Debug, Clone, Serialize)]
pub struct DecisionRecord {
    pub decision: QualityDecision,
    /// Whether the video sink accepted the tier
    pub applied: bool,
    pub timestamp: DateTime<Utc>,
}

impl DecisionRecord {
    pub fn new(decision: QualityDecision, applied: bool) -> Self {
        Self {
            decision,
            applied,
            timestamp: Utc::now(),
        }
    }
}
