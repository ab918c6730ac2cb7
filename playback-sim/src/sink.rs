//! Simulated video sink and playback buffer

use std::time::Duration;

use quality_selector::{BufferCondition, TierProfile};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Stand-in for the media elements a real player reconfigures.
///
/// Applies a tier after a short delay and refuses with the configured
/// probability, mimicking a pipeline that can reject a constraint change.
pub struct SimulatedSink {
    failure_rate: f64,
    rng: StdRng,
}

impl SimulatedSink {
    pub fn new(failure_rate: f64, seed: u64) -> Self {
        Self {
            failure_rate: failure_rate.clamp(0.0, 1.0),
            rng: StdRng::seed_from_u64(seed.wrapping_add(1)),
        }
    }

    /// Apply a tier profile. Returns false when the sink refuses it.
    pub async fn apply(&mut self, profile: TierProfile) -> bool {
        tokio::time::sleep(Duration::from_millis(120)).await;
        if self.rng.gen::<f64>() < self.failure_rate {
            eprintln!(
                "sink refused {}x{}@{}fps",
                profile.width, profile.height, profile.framerate
            );
            return false;
        }
        true
    }
}

/// Coarse playback buffer fed by the bandwidth walk.
///
/// Each second the buffer gains the ratio of available bandwidth to the
/// active tier's bitrate and loses the second that played out.
pub struct BufferModel {
    buffered_secs: f64,
}

impl BufferModel {
    pub fn new() -> Self {
        Self { buffered_secs: 2.0 }
    }

    pub fn advance(&mut self, bandwidth_bps: f64, tier_bitrate_bps: u32) {
        let fill = bandwidth_bps / tier_bitrate_bps as f64;
        self.buffered_secs = (self.buffered_secs + fill - 1.0).clamp(0.0, 30.0);
    }

    pub fn condition(&self) -> BufferCondition {
        BufferCondition {
            buffered_secs: self.buffered_secs,
        }
    }
}

impl Default for BufferModel {
    fn default() -> Self {
        Self::new()
    }
}
