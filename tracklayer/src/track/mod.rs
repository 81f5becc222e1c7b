//! Per-entity track state: telemetry value types, bounded sample history,
//! and the mutable per-entity record the smoothing engine owns.
//!
//! Types here are pure data. Interpretation (producing a rendered pose from
//! this state) is the responsibility of the strategies in
//! [`crate::smoothing`].

mod entity;
mod model;
mod ring;

pub use entity::EntityTrack;
pub use model::{BufferedPose, Pose, Sample};
pub use ring::RingBuffer;
