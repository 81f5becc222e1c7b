//! Position smoothing: the engine and its two interchangeable strategies.
//!
//! Discrete telemetry in, continuous poses out. The engine owns one
//! [`crate::track::EntityTrack`] per entity and, on every tick, asks the
//! active strategy to produce a pose:
//!
//! - [`SmoothingMode::DeadReckoning`] extrapolates ahead of the last
//!   confirmed sample — responsive, may overshoot on course changes.
//! - [`SmoothingMode::BufferedInterpolation`] renders a fixed delay in the
//!   past so two real samples bracket every estimate — accurate, adds
//!   latency.
//!
//! Both strategies receive every ingested sample regardless of which one is
//! active, so the mode can be toggled at runtime without losing history.
//!
//! # Example
//!
//! ```ignore
//! use tracklayer::smoothing::{SmootherConfig, SmoothingEngine, SmoothingMode};
//!
//! let engine = SmoothingEngine::new(
//!     SmootherConfig::default().with_mode(SmoothingMode::BufferedInterpolation),
//! );
//! ```

mod config;
mod dead_reckoning;
mod engine;
mod interpolation;

pub use config::{
    SmootherConfig, SmoothingMode, DEFAULT_BUFFER_DELAY_SECS, DEFAULT_MAX_EXTRAPOLATION_SECS,
    DEFAULT_MIN_PREDICTION_SPEED_MPS, DEFAULT_PREDICTION_DAMPING, DEFAULT_RING_CAPACITY,
    DEFAULT_SMOOTHING_FACTOR,
};
pub use engine::{EntityId, SmoothingEngine};
