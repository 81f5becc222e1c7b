//! TrackLayer — position smoothing for sparse telemetry
//!
//! This library turns irregular, out-of-order position reports for a set of
//! tracked entities into a visually smooth, continuously-updated pose per
//! entity. The transport that delivers reports, the projection from
//! geographic to planar coordinates, and the scene graph that displays the
//! result are all external collaborators; this crate owns only the
//! smoothing engine between them.
//!
//! # Overview
//!
//! ```text
//! Transport ──► feed (units, projection) ──► SmoothingEngine ──► poses
//!                                            ├─ dead reckoning
//!                                            └─ buffered interpolation
//! ```
//!
//! Samples are fed via [`smoothing::SmoothingEngine::ingest`] (directly, or
//! asynchronously through [`feed::spawn_sample_feed`]); the render loop
//! calls [`smoothing::SmoothingEngine::tick`] once per frame and applies
//! the returned poses to its own scene objects, joined by entity id.

pub mod coord;
pub mod error;
pub mod feed;
pub mod log;
pub mod metrics;
pub mod smoothing;
pub mod track;
pub mod trail;

pub use coord::{AffineProjector, Point2D, Projector, Vector2D};
pub use error::IngestError;
pub use feed::TelemetryReport;
pub use smoothing::{EntityId, SmootherConfig, SmoothingEngine, SmoothingMode};
pub use track::{Pose, Sample};
