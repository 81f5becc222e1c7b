//! Library error types.

use thiserror::Error;

/// Errors rejected at the ingest boundary.
///
/// Ordinary data variance (out-of-order timestamps, duplicate samples,
/// stationary entities) is NOT an error — only input that would poison the
/// finite-pose invariant is refused, and the affected track is left
/// unmodified.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum IngestError {
    /// Position contained a NaN or infinite component.
    #[error("non-finite position ({x}, {y})")]
    NonFinitePosition {
        /// Offending x component.
        x: f64,
        /// Offending y component.
        y: f64,
    },

    /// Heading was NaN or infinite.
    #[error("non-finite heading {0}")]
    NonFiniteHeading(f64),

    /// Speed was NaN or infinite.
    #[error("non-finite speed {0}")]
    NonFiniteSpeed(f64),

    /// Speed was negative; ground speed is a magnitude.
    #[error("negative speed {0}")]
    NegativeSpeed(f64),

    /// Timestamp was NaN or infinite.
    #[error("non-finite timestamp {0}")]
    NonFiniteTimestamp(f64),
}
