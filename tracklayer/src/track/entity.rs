//! Mutable per-entity state owned by the smoothing engine.

use crate::coord::{heading_to_velocity, normalize_heading, Point2D, Vector2D};

use super::model::{BufferedPose, Pose, Sample};
use super::ring::RingBuffer;

/// Per-entity smoothing state.
///
/// One track exists per live entity id, created on the first ingested
/// sample and destroyed on removal. Both strategies' scratch state is
/// maintained on every sample regardless of the active mode, so switching
/// modes at runtime never loses history — only the rendering algorithm
/// changes.
#[derive(Debug, Clone)]
pub struct EntityTrack {
    /// Last pose handed to the caller; mutated every tick.
    pub(crate) current_pose: Pose,

    /// Smoothed base position: the exponential-decay accumulator that the
    /// prediction offset is computed on top of each tick.
    ///
    /// Kept separate from `current_pose` so the extrapolation offset is
    /// recomputed fresh per tick instead of compounding into the
    /// accumulator — the rendered lead stays bounded by
    /// `velocity × max_extrapolation × damping` at any frame rate.
    pub(crate) smoothed_position: Point2D,

    /// Dead-reckoning scratch: position of the newest accepted sample.
    pub(crate) target_position: Point2D,

    /// Dead-reckoning scratch: velocity derived from the newest sample's
    /// speed and heading.
    pub(crate) velocity: Vector2D,

    /// Timestamp of the newest accepted sample, seconds.
    pub(crate) last_sample_time: f64,

    /// Heading reported by the newest sample, degrees `[0, 360)`.
    ///
    /// Held as the rendered heading while the entity is stationary, so a
    /// parked entity never flickers toward an arbitrary direction.
    pub(crate) last_heading: f64,

    /// Speed reported by the newest sample, m/s. Gates prediction.
    pub(crate) speed_mps: f64,

    /// False only before the first sample. While false the engine emits no
    /// pose for this entity.
    pub(crate) has_sample: bool,

    /// Interpolation scratch: the last N samples, unordered by slot.
    pub(crate) history: RingBuffer<BufferedPose>,
}

impl EntityTrack {
    /// Create an empty track with the given history capacity.
    pub(crate) fn new(ring_capacity: usize) -> Self {
        Self {
            current_pose: Pose::new(Point2D::default(), 0.0),
            smoothed_position: Point2D::default(),
            target_position: Point2D::default(),
            velocity: Vector2D::ZERO,
            last_sample_time: 0.0,
            last_heading: 0.0,
            speed_mps: 0.0,
            has_sample: false,
            history: RingBuffer::new(ring_capacity),
        }
    }

    /// Fold a validated sample into both strategies' scratch state.
    ///
    /// Updates are unconditional: a sample whose timestamp is older than the
    /// previous one still replaces the dead-reckoning target. Out-of-order
    /// tolerance is the buffered strategy's job; the responsive strategy
    /// keeps the original always-latest-wins behavior.
    pub(crate) fn apply_sample(&mut self, sample: Sample) {
        self.velocity = heading_to_velocity(sample.heading, sample.speed_mps);
        self.target_position = sample.position;
        self.last_sample_time = sample.timestamp;
        self.last_heading = normalize_heading(sample.heading);
        self.speed_mps = sample.speed_mps;

        if !self.has_sample {
            // First sample: snap, so the entity never lerps in from the
            // frame origin.
            self.current_pose = Pose::new(sample.position, normalize_heading(sample.heading));
            self.smoothed_position = sample.position;
            self.has_sample = true;
        }

        self.history.push(BufferedPose::from(sample));
    }

    /// The last rendered pose.
    pub fn pose(&self) -> Pose {
        self.current_pose
    }

    /// True once at least one sample has been ingested.
    pub fn has_sample(&self) -> bool {
        self.has_sample
    }

    /// Number of samples currently held for interpolation.
    pub fn history_len(&self) -> usize {
        self.history.len()
    }
}
