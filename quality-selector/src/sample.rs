//! Measurement types and the bounded network sample window
//!
//! The sampler feeds point-in-time measurements into a FIFO ring buffer;
//! scoring works over the window average. Device and buffer conditions are
//! read on demand and never buffered historically.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// A point-in-time network measurement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NetworkSample {
    /// Estimated downlink bandwidth in bits per second
    pub bandwidth_bps: f64,
    /// Round-trip latency in milliseconds
    pub latency_ms: f64,
    /// Packet loss ratio in [0, 1]
    pub packet_loss: f64,
    /// When the measurement was taken
    pub taken_at: Instant,
}

impl NetworkSample {
    pub fn new(bandwidth_bps: f64, latency_ms: f64, packet_loss: f64, taken_at: Instant) -> Self {
        Self {
            bandwidth_bps,
            latency_ms,
            packet_loss,
            taken_at,
        }
    }

    /// Bandwidth must be a finite non-negative number; everything else is
    /// taken as-is.
    fn is_valid(&self) -> bool {
        self.bandwidth_bps.is_finite() && self.bandwidth_bps >= 0.0
    }
}

/// Window average over the retained network samples.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NetworkAverages {
    pub bandwidth_bps: f64,
    pub latency_ms: f64,
    pub packet_loss: f64,
}

/// Device capability reading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeviceCondition {
    /// Installed memory in GiB
    pub memory_gib: f64,
    /// Logical CPU core count
    pub logical_cores: u32,
}

/// Playback buffer health, derived per evaluation cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BufferCondition {
    /// Seconds of buffered media ahead of the playhead
    pub buffered_secs: f64,
}

/// Bounded FIFO window of network samples.
#[derive(Debug, Clone)]
pub struct SampleWindow {
    samples: VecDeque<NetworkSample>,
    capacity: usize,
}

impl SampleWindow {
    pub fn new(capacity: usize) -> Self {
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a sample, evicting the oldest beyond capacity.
    ///
    /// Returns false if the sample was dropped as invalid.
    pub fn push(&mut self, sample: NetworkSample) -> bool {
        if !sample.is_valid() {
            tracing::debug!(
                "Dropping invalid network sample: bandwidth={}",
                sample.bandwidth_bps
            );
            return false;
        }
        if self.samples.len() >= self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
        true
    }

    /// Mean bandwidth, latency, and loss over the window.
    pub fn averages(&self) -> Option<NetworkAverages> {
        if self.samples.is_empty() {
            return None;
        }
        let n = self.samples.len() as f64;
        Some(NetworkAverages {
            bandwidth_bps: self.samples.iter().map(|s| s.bandwidth_bps).sum::<f64>() / n,
            latency_ms: self.samples.iter().map(|s| s.latency_ms).sum::<f64>() / n,
            packet_loss: self.samples.iter().map(|s| s.packet_loss).sum::<f64>() / n,
        })
    }

    /// Window average, unless the newest sample is older than `max_age`.
    ///
    /// A stale window counts as having no data at all, so scoring falls back
    /// to the neutral condition.
    pub fn fresh_averages(&self, now: Instant, max_age: Duration) -> Option<NetworkAverages> {
        let newest = self.newest()?;
        if now.duration_since(newest.taken_at) > max_age {
            return None;
        }
        self.averages()
    }

    pub fn newest(&self) -> Option<&NetworkSample> {
        self.samples.back()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_caps_at_capacity_fifo() {
        let now = Instant::now();
        let mut window = SampleWindow::new(20);

        for i in 0..50 {
            window.push(NetworkSample::new(i as f64, 50.0, 0.0, now));
            assert!(window.len() <= 20);
        }

        assert_eq!(window.len(), 20);
        // Oldest entries evicted first: 30..50 remain
        let avg = window.averages().unwrap();
        let expected = (30..50).sum::<i32>() as f64 / 20.0;
        assert!((avg.bandwidth_bps - expected).abs() < 1e-9);
        assert_eq!(window.newest().unwrap().bandwidth_bps, 49.0);
    }

    #[test]
    fn test_invalid_samples_dropped() {
        let now = Instant::now();
        let mut window = SampleWindow::new(20);

        assert!(!window.push(NetworkSample::new(-1.0, 50.0, 0.0, now)));
        assert!(!window.push(NetworkSample::new(f64::NAN, 50.0, 0.0, now)));
        assert!(window.is_empty());

        assert!(window.push(NetworkSample::new(0.0, 50.0, 0.0, now)));
        assert_eq!(window.len(), 1);
    }

    #[test]
    fn test_averages_over_window() {
        let now = Instant::now();
        let mut window = SampleWindow::new(20);
        window.push(NetworkSample::new(1_000_000.0, 40.0, 0.0, now));
        window.push(NetworkSample::new(3_000_000.0, 60.0, 0.1, now));

        let avg = window.averages().unwrap();
        assert!((avg.bandwidth_bps - 2_000_000.0).abs() < 1e-9);
        assert!((avg.latency_ms - 50.0).abs() < 1e-9);
        assert!((avg.packet_loss - 0.05).abs() < 1e-9);
    }

    #[test]
    fn test_stale_window_counts_as_missing() {
        let base = Instant::now();
        let mut window = SampleWindow::new(20);
        window.push(NetworkSample::new(5_000_000.0, 40.0, 0.0, base));

        let max_age = Duration::from_secs(30);
        assert!(window.fresh_averages(base + Duration::from_secs(10), max_age).is_some());
        assert!(window.fresh_averages(base + Duration::from_secs(31), max_age).is_none());
    }
}
