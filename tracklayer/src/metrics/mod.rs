//! Engine metrics for observability and user feedback.
//!
//! Lock-free atomic counters incremented on the engine's hot paths, with a
//! point-in-time [`MetricsSnapshot`] for display:
//!
//! ```text
//! Engine paths ─────► EngineMetrics ─────► MetricsSnapshot ─────► Views
//!                     (atomic counters)    (point-in-time copy)
//! ```

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Counters over the lifetime of one engine instance.
///
/// Relaxed ordering throughout: counters are monotonic tallies, not
/// synchronization points.
#[derive(Debug, Default)]
pub struct EngineMetrics {
    samples_ingested: AtomicU64,
    samples_rejected: AtomicU64,
    ticks: AtomicU64,
    poses_emitted: AtomicU64,
}

impl EngineMetrics {
    /// Create zeroed metrics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one accepted sample.
    pub fn sample_ingested(&self) {
        self.samples_ingested.fetch_add(1, Ordering::Relaxed);
    }

    /// Record one sample rejected at the boundary.
    pub fn sample_rejected(&self) {
        self.samples_rejected.fetch_add(1, Ordering::Relaxed);
    }

    /// Record one completed tick and how many poses it emitted.
    pub fn tick_completed(&self, poses: usize) {
        self.ticks.fetch_add(1, Ordering::Relaxed);
        self.poses_emitted.fetch_add(poses as u64, Ordering::Relaxed);
    }

    /// Take a point-in-time copy for display.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            samples_ingested: self.samples_ingested.load(Ordering::Relaxed),
            samples_rejected: self.samples_rejected.load(Ordering::Relaxed),
            ticks: self.ticks.load(Ordering::Relaxed),
            poses_emitted: self.poses_emitted.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time copy of [`EngineMetrics`], safe to hand to UIs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    /// Samples accepted by `ingest`.
    pub samples_ingested: u64,
    /// Samples rejected at the boundary.
    pub samples_rejected: u64,
    /// Completed ticks.
    pub ticks: u64,
    /// Poses handed to the caller across all ticks.
    pub poses_emitted: u64,
}
