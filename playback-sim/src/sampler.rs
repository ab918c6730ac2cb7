//! Synthetic measurement sources
//!
//! Stand-ins for the browser-side sampler: a seeded random walk for network
//! conditions and a platform probe for device capability.

use std::time::Instant;

use quality_selector::{DeviceCondition, NetworkSample};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sysinfo::System;

/// Random-walk generator for plausible network conditions.
pub struct NetworkWalker {
    rng: StdRng,
    bandwidth_bps: f64,
    latency_ms: f64,
    packet_loss: f64,
}

impl NetworkWalker {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            bandwidth_bps: 3_000_000.0,
            latency_ms: 80.0,
            packet_loss: 0.005,
        }
    }

    /// Advance the walk one step and emit a sample.
    pub fn next_sample(&mut self, now: Instant) -> NetworkSample {
        let drift: f64 = self.rng.gen_range(-0.15..0.15);
        self.bandwidth_bps = (self.bandwidth_bps * (1.0 + drift)).clamp(150_000.0, 20_000_000.0);
        self.latency_ms = (self.latency_ms + self.rng.gen_range(-12.0..12.0)).clamp(10.0, 400.0);
        self.packet_loss = (self.packet_loss + self.rng.gen_range(-0.01..0.01)).clamp(0.0, 0.3);
        NetworkSample::new(self.bandwidth_bps, self.latency_ms, self.packet_loss, now)
    }
}

/// Read memory and core counts from the platform.
pub fn probe_device() -> DeviceCondition {
    let sys = System::new_all();
    DeviceCondition {
        memory_gib: sys.total_memory() as f64 / (1u64 << 30) as f64,
        logical_cores: sys.cpus().len() as u32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_walk_stays_in_bounds() {
        let now = Instant::now();
        let mut walker = NetworkWalker::new(42);
        for _ in 0..1000 {
            let sample = walker.next_sample(now);
            assert!(sample.bandwidth_bps >= 150_000.0);
            assert!(sample.bandwidth_bps <= 20_000_000.0);
            assert!((10.0..=400.0).contains(&sample.latency_ms));
            assert!((0.0..=0.3).contains(&sample.packet_loss));
        }
    }

    #[test]
    fn test_walk_is_deterministic_per_seed() {
        let now = Instant::now();
        let mut a = NetworkWalker::new(7);
        let mut b = NetworkWalker::new(7);
        for _ in 0..50 {
            assert_eq!(a.next_sample(now), b.next_sample(now));
        }
    }
}
