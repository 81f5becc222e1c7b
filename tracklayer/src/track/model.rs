//! Telemetry value types.
//!
//! A [`Sample`] is one reading as the engine sees it: already projected to
//! the planar frame, speed in m/s, timestamp in monotonic seconds. Raw wire
//! units (lat/lon, km/h, milliseconds) are converted by the feed adapter
//! before a `Sample` exists, so nothing downstream handles units twice.

use serde::{Deserialize, Serialize};

use crate::coord::Point2D;

/// One telemetry reading for a single entity.
///
/// Timestamps are monotonic seconds in the sender's frame. They are NOT
/// guaranteed to arrive in order across consecutive samples for the same
/// entity — network reordering happens, and the engine tolerates it rather
/// than assuming it away.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Position in the local planar frame (already projected).
    pub position: Point2D,
    /// Heading in degrees, 0 = north, 90 = east.
    pub heading: f64,
    /// Ground speed in metres per second (≥ 0).
    pub speed_mps: f64,
    /// Monotonic timestamp in seconds.
    pub timestamp: f64,
}

impl Sample {
    /// Create a new sample.
    pub fn new(position: Point2D, heading: f64, speed_mps: f64, timestamp: f64) -> Self {
        Self {
            position,
            heading,
            speed_mps,
            timestamp,
        }
    }

    /// True if every field is finite.
    ///
    /// The ingest boundary rejects non-finite samples so the invariant
    /// "every rendered pose is finite" holds without per-tick checks.
    pub fn is_finite(&self) -> bool {
        self.position.is_finite()
            && self.heading.is_finite()
            && self.speed_mps.is_finite()
            && self.timestamp.is_finite()
    }
}

/// A rendered position/orientation, handed to the caller each tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    /// Position in the local planar frame.
    pub position: Point2D,
    /// Heading in degrees `[0, 360)`.
    pub heading: f64,
}

impl Pose {
    /// Create a new pose.
    pub fn new(position: Point2D, heading: f64) -> Self {
        Self { position, heading }
    }
}

/// One slot in an entity's interpolation history.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BufferedPose {
    /// Position at `timestamp`.
    pub position: Point2D,
    /// Heading at `timestamp`, degrees.
    pub heading: f64,
    /// Sample timestamp in seconds.
    pub timestamp: f64,
}

impl From<Sample> for BufferedPose {
    fn from(sample: Sample) -> Self {
        Self {
            position: sample.position,
            heading: sample.heading,
            timestamp: sample.timestamp,
        }
    }
}
