//! Step-function scoring of network, device, and buffer conditions
//!
//! Every sub-score is a step function over fixed cutoffs yielding one of
//! {1.0, 0.8, 0.6, 0.4, 0.2}. Sub-scores combine into a weighted average per
//! the active priority mode, and the combined score maps to a tier through
//! fixed thresholds.

use crate::config::QualityPriority;
use crate::sample::{BufferCondition, DeviceCondition, NetworkAverages};
use crate::tier::QualityTier;

/// Score assumed for any condition with no usable reading.
pub const NEUTRAL_SCORE: f64 = 0.6;

/// Relative weight of each condition when combining scores.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreWeights {
    pub network: f64,
    pub device: f64,
    pub buffer: f64,
}

impl QualityPriority {
    /// Condition weights for this priority mode.
    pub fn weights(self) -> ScoreWeights {
        match self {
            QualityPriority::Balanced => ScoreWeights {
                network: 0.5,
                device: 0.3,
                buffer: 0.2,
            },
            QualityPriority::Bandwidth => ScoreWeights {
                network: 0.7,
                device: 0.2,
                buffer: 0.1,
            },
            QualityPriority::Performance => ScoreWeights {
                network: 0.3,
                device: 0.5,
                buffer: 0.2,
            },
            QualityPriority::Quality => ScoreWeights {
                network: 0.4,
                device: 0.4,
                buffer: 0.2,
            },
        }
    }
}

/// Per-condition scores plus the weighted combination.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreBreakdown {
    pub network: f64,
    pub device: f64,
    pub buffer: f64,
    pub combined: f64,
}

fn bandwidth_score(bps: f64) -> f64 {
    if bps >= 5_000_000.0 {
        1.0
    } else if bps >= 2_500_000.0 {
        0.8
    } else if bps >= 1_200_000.0 {
        0.6
    } else if bps >= 600_000.0 {
        0.4
    } else {
        0.2
    }
}

fn latency_score(ms: f64) -> f64 {
    if ms <= 50.0 {
        1.0
    } else if ms <= 100.0 {
        0.8
    } else if ms <= 150.0 {
        0.6
    } else if ms <= 200.0 {
        0.4
    } else {
        0.2
    }
}

fn packet_loss_score(ratio: f64) -> f64 {
    if ratio <= 0.01 {
        1.0
    } else if ratio <= 0.02 {
        0.8
    } else if ratio <= 0.05 {
        0.6
    } else if ratio <= 0.10 {
        0.4
    } else {
        0.2
    }
}

fn memory_score(gib: f64) -> f64 {
    if gib >= 8.0 {
        1.0
    } else if gib >= 6.0 {
        0.8
    } else if gib >= 4.0 {
        0.6
    } else if gib >= 2.0 {
        0.4
    } else {
        0.2
    }
}

fn cores_score(cores: u32) -> f64 {
    if cores >= 8 {
        1.0
    } else if cores >= 6 {
        0.8
    } else if cores >= 4 {
        0.6
    } else if cores >= 2 {
        0.4
    } else {
        0.2
    }
}

/// Network condition score: bandwidth 40%, latency 30%, packet loss 30%.
pub fn network_score(avg: &NetworkAverages) -> f64 {
    0.4 * bandwidth_score(avg.bandwidth_bps)
        + 0.3 * latency_score(avg.latency_ms)
        + 0.3 * packet_loss_score(avg.packet_loss)
}

/// Device condition score: memory and cores weighted evenly.
pub fn device_score(cond: &DeviceCondition) -> f64 {
    0.5 * memory_score(cond.memory_gib) + 0.5 * cores_score(cond.logical_cores)
}

/// Buffer health score over buffered seconds of media.
pub fn buffer_score(cond: &BufferCondition) -> f64 {
    let secs = cond.buffered_secs;
    if secs >= 10.0 {
        1.0
    } else if secs >= 5.0 {
        0.8
    } else if secs >= 3.0 {
        0.6
    } else if secs >= 1.0 {
        0.4
    } else {
        0.2
    }
}

/// Score all conditions and combine them under the given priority.
///
/// Missing readings score [`NEUTRAL_SCORE`] rather than failing the cycle.
/// Data saver scales the combined score by `data_saver_factor`.
pub fn evaluate_scores(
    network: Option<&NetworkAverages>,
    device: Option<&DeviceCondition>,
    buffer: Option<&BufferCondition>,
    priority: QualityPriority,
    data_saver: bool,
    data_saver_factor: f64,
) -> ScoreBreakdown {
    let network = network.map(network_score).unwrap_or(NEUTRAL_SCORE);
    let device = device.map(device_score).unwrap_or(NEUTRAL_SCORE);
    let buffer = buffer.map(buffer_score).unwrap_or(NEUTRAL_SCORE);

    let w = priority.weights();
    let mut combined = w.network * network + w.device * device + w.buffer * buffer;
    if data_saver {
        combined *= data_saver_factor;
    }

    ScoreBreakdown {
        network,
        device,
        buffer,
        combined,
    }
}

/// Map a combined score to a quality tier.
pub fn tier_for_score(score: f64) -> QualityTier {
    if score >= 0.8 {
        QualityTier::Q1080p
    } else if score >= 0.6 {
        QualityTier::Q720p
    } else if score >= 0.4 {
        QualityTier::Q480p
    } else if score > 0.2 {
        QualityTier::Q360p
    } else {
        QualityTier::Q240p
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strong_conditions() -> (NetworkAverages, DeviceCondition, BufferCondition) {
        (
            NetworkAverages {
                bandwidth_bps: 6_000_000.0,
                latency_ms: 40.0,
                packet_loss: 0.0,
            },
            DeviceCondition {
                memory_gib: 8.0,
                logical_cores: 8,
            },
            BufferCondition { buffered_secs: 12.0 },
        )
    }

    fn weak_conditions() -> (NetworkAverages, DeviceCondition, BufferCondition) {
        (
            NetworkAverages {
                bandwidth_bps: 300_000.0,
                latency_ms: 250.0,
                packet_loss: 0.2,
            },
            DeviceCondition {
                memory_gib: 1.0,
                logical_cores: 1,
            },
            BufferCondition { buffered_secs: 0.5 },
        )
    }

    const ALL_PRIORITIES: [QualityPriority; 4] = [
        QualityPriority::Quality,
        QualityPriority::Balanced,
        QualityPriority::Performance,
        QualityPriority::Bandwidth,
    ];

    #[test]
    fn test_weights_sum_to_one() {
        for priority in ALL_PRIORITIES {
            let w = priority.weights();
            assert!((w.network + w.device + w.buffer - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_strong_conditions_score_top_tier() {
        let (net, dev, buf) = strong_conditions();
        let scores = evaluate_scores(
            Some(&net),
            Some(&dev),
            Some(&buf),
            QualityPriority::Balanced,
            false,
            0.7,
        );
        assert!((scores.combined - 1.0).abs() < 1e-9);
        assert_eq!(tier_for_score(scores.combined), QualityTier::Q1080p);
    }

    #[test]
    fn test_weak_conditions_score_bottom_tier_any_priority() {
        let (net, dev, buf) = weak_conditions();
        for priority in ALL_PRIORITIES {
            let scores =
                evaluate_scores(Some(&net), Some(&dev), Some(&buf), priority, false, 0.7);
            assert!(scores.combined <= 0.2 + 1e-9);
            assert_eq!(tier_for_score(scores.combined), QualityTier::Q240p);
        }
    }

    #[test]
    fn test_data_saver_never_raises_tier() {
        let cases = [
            strong_conditions(),
            weak_conditions(),
            (
                NetworkAverages {
                    bandwidth_bps: 2_800_000.0,
                    latency_ms: 90.0,
                    packet_loss: 0.015,
                },
                DeviceCondition {
                    memory_gib: 4.0,
                    logical_cores: 4,
                },
                BufferCondition { buffered_secs: 6.0 },
            ),
        ];

        for (net, dev, buf) in cases {
            for priority in ALL_PRIORITIES {
                let plain =
                    evaluate_scores(Some(&net), Some(&dev), Some(&buf), priority, false, 0.7);
                let saver =
                    evaluate_scores(Some(&net), Some(&dev), Some(&buf), priority, true, 0.7);
                assert!(saver.combined <= plain.combined);
                assert!(tier_for_score(saver.combined) <= tier_for_score(plain.combined));
            }
        }
    }

    #[test]
    fn test_missing_inputs_score_neutral() {
        let scores = evaluate_scores(None, None, None, QualityPriority::Balanced, false, 0.7);
        assert!((scores.network - NEUTRAL_SCORE).abs() < 1e-9);
        assert!((scores.device - NEUTRAL_SCORE).abs() < 1e-9);
        assert!((scores.buffer - NEUTRAL_SCORE).abs() < 1e-9);
        // Neutral everything lands mid-ladder, not at an extreme
        assert_eq!(tier_for_score(scores.combined), QualityTier::Q720p);
    }

    #[test]
    fn test_tier_mapping_boundaries() {
        assert_eq!(tier_for_score(0.8), QualityTier::Q1080p);
        assert_eq!(tier_for_score(0.79), QualityTier::Q720p);
        assert_eq!(tier_for_score(0.6), QualityTier::Q720p);
        assert_eq!(tier_for_score(0.4), QualityTier::Q480p);
        assert_eq!(tier_for_score(0.21), QualityTier::Q360p);
        assert_eq!(tier_for_score(0.2), QualityTier::Q240p);
    }
}
