//! The smoothing engine: per-entity track ownership and the tick loop.

use std::collections::HashMap;

use dashmap::DashMap;
use parking_lot::RwLock;
use tracing::debug;

use crate::error::IngestError;
use crate::metrics::EngineMetrics;
use crate::track::{EntityTrack, Pose, Sample};

use super::config::{SmootherConfig, SmoothingMode};
use super::{dead_reckoning, interpolation};

/// Opaque entity identifier, chosen by the transport.
///
/// The engine never owns renderable objects; callers keep their scene-side
/// state in a parallel map joined only through this key.
pub type EntityId = String;

/// Consumes discrete telemetry samples and produces a continuous
/// position/orientation estimate for every tracked entity on every tick.
///
/// # Concurrency
///
/// `ingest` may be called from the transport's task while the render loop
/// calls `tick` — tracks live in a sharded concurrent map, so per-entity
/// exclusive access is held only for the duration of a single `ingest` or
/// a single per-entity update, never across calls. `remove` is safe
/// concurrently with an in-flight `tick`: the entity disappears from the
/// next tick's output.
///
/// # Example
///
/// ```ignore
/// use tracklayer::smoothing::{SmoothingEngine, SmootherConfig};
///
/// let engine = SmoothingEngine::new(SmootherConfig::default());
/// engine.ingest("rider-1", sample)?;
///
/// // Once per frame:
/// let poses = engine.tick(now, dt);
/// for (id, pose) in &poses {
///     scene.apply(id, pose);
/// }
/// ```
pub struct SmoothingEngine {
    /// One track per live entity id.
    tracks: DashMap<EntityId, EntityTrack>,

    /// Active strategy; engine-wide, applied on the next tick.
    mode: RwLock<SmoothingMode>,

    /// Immutable tuning knobs.
    config: SmootherConfig,

    /// Hot-path counters.
    metrics: EngineMetrics,
}

impl SmoothingEngine {
    /// Create an engine with the given configuration.
    pub fn new(config: SmootherConfig) -> Self {
        config.validate();
        Self {
            tracks: DashMap::new(),
            mode: RwLock::new(config.mode),
            config,
            metrics: EngineMetrics::new(),
        }
    }

    /// Create an engine with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(SmootherConfig::default())
    }

    /// Feed one sample for one entity. O(1) amortized.
    ///
    /// Creates the entity's track on first sight. Both strategies' scratch
    /// state is updated regardless of the active mode, so switching modes
    /// later never loses history. Out-of-order and duplicate timestamps are
    /// accepted; only input that would poison the finite-pose invariant is
    /// rejected, leaving the track unmodified.
    pub fn ingest(&self, id: &str, sample: Sample) -> Result<(), IngestError> {
        if let Err(e) = validate_sample(&sample) {
            self.metrics.sample_rejected();
            return Err(e);
        }

        match self.tracks.get_mut(id) {
            Some(mut track) => track.apply_sample(sample),
            None => {
                debug!(entity = id, "tracking new entity");
                self.tracks
                    .entry(id.to_owned())
                    .or_insert_with(|| EntityTrack::new(self.config.ring_capacity))
                    .apply_sample(sample);
            }
        }

        self.metrics.sample_ingested();
        Ok(())
    }

    /// Advance every tracked entity by one frame and return their poses.
    ///
    /// `now` is the caller's monotonic clock in seconds, `dt` the frame
    /// delta (≥ 0; negative values are treated as 0). Entities that have
    /// never received a sample are skipped — callers must not render an
    /// entity with no data yet. Every returned pose is finite.
    pub fn tick(&self, now: f64, dt: f64) -> HashMap<EntityId, Pose> {
        let dt = dt.max(0.0);
        let mode = *self.mode.read();

        let mut poses = HashMap::with_capacity(self.tracks.len());
        for mut entry in self.tracks.iter_mut() {
            if !entry.value().has_sample() {
                continue;
            }
            let pose = match mode {
                SmoothingMode::DeadReckoning => {
                    dead_reckoning::update(entry.value_mut(), now, dt, &self.config)
                }
                SmoothingMode::BufferedInterpolation => {
                    interpolation::update(entry.value_mut(), now, &self.config)
                }
            };
            poses.insert(entry.key().clone(), pose);
        }

        self.metrics.tick_completed(poses.len());
        poses
    }

    /// Forget an entity. Idempotent: removing an unknown id is a no-op.
    pub fn remove(&self, id: &str) {
        if self.tracks.remove(id).is_some() {
            debug!(entity = id, "removed entity track");
        }
    }

    /// Switch the smoothing strategy for all entities. Takes effect on the
    /// next `tick`; never mid-computation.
    pub fn set_mode(&self, mode: SmoothingMode) {
        let mut current = self.mode.write();
        if *current != mode {
            debug!(from = %current, to = %mode, "smoothing mode switched");
            *current = mode;
        }
    }

    /// The currently active smoothing mode.
    pub fn mode(&self) -> SmoothingMode {
        *self.mode.read()
    }

    /// Number of tracked entities.
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// True if no entities are tracked.
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// True if `id` has a live track.
    pub fn contains(&self, id: &str) -> bool {
        self.tracks.contains_key(id)
    }

    /// Engine counters.
    pub fn metrics(&self) -> &EngineMetrics {
        &self.metrics
    }
}

/// Boundary validation: refuse input that could produce a non-finite pose.
fn validate_sample(sample: &Sample) -> Result<(), IngestError> {
    if !sample.position.is_finite() {
        return Err(IngestError::NonFinitePosition {
            x: sample.position.x,
            y: sample.position.y,
        });
    }
    if !sample.heading.is_finite() {
        return Err(IngestError::NonFiniteHeading(sample.heading));
    }
    if !sample.speed_mps.is_finite() {
        return Err(IngestError::NonFiniteSpeed(sample.speed_mps));
    }
    if sample.speed_mps < 0.0 {
        return Err(IngestError::NegativeSpeed(sample.speed_mps));
    }
    if !sample.timestamp.is_finite() {
        return Err(IngestError::NonFiniteTimestamp(sample.timestamp));
    }
    Ok(())
}
