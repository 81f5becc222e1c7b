//! Smoothing engine configuration.
//!
//! All knobs carry defaults that render well for vehicle-speed telemetry
//! arriving at roughly 1 Hz. The latency/accuracy trade-off lives in
//! [`SmoothingMode`]: dead reckoning is responsive but may overshoot,
//! buffered interpolation is exact but trails wall-clock time by
//! `buffer_delay_secs`.

use tracing::warn;

// ─────────────────────────────────────────────────────────────────────────────
// Configuration defaults
// ─────────────────────────────────────────────────────────────────────────────

/// Default interpolation history capacity per entity.
pub const DEFAULT_RING_CAPACITY: usize = 10;

/// Default exponential-decay time constant, seconds. Smaller is snappier.
pub const DEFAULT_SMOOTHING_FACTOR: f64 = 0.15;

/// Default extrapolation cap, seconds. Prediction freezes at this age.
pub const DEFAULT_MAX_EXTRAPOLATION_SECS: f64 = 5.0;

/// Default speed floor for prediction, m/s (~1 km/h). Below this the entity
/// is treated as stationary and no extrapolation is applied.
pub const DEFAULT_MIN_PREDICTION_SPEED_MPS: f64 = 0.3;

/// Default prediction damping factor, dimensionless in `[0, 1]`.
pub const DEFAULT_PREDICTION_DAMPING: f64 = 0.8;

/// Default rendering delay for buffered interpolation, seconds.
///
/// Must stay below the typical inter-sample interval, or the buffer
/// underruns and interpolation degrades to holding the newest sample.
pub const DEFAULT_BUFFER_DELAY_SECS: f64 = 0.2;

// ─────────────────────────────────────────────────────────────────────────────
// Mode
// ─────────────────────────────────────────────────────────────────────────────

/// Which smoothing algorithm renders poses.
///
/// Both algorithms receive every ingested sample regardless of the active
/// mode, so switching at runtime never loses history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SmoothingMode {
    /// Extrapolate ahead of the last confirmed sample. Responsive, may
    /// overshoot on course changes.
    #[default]
    DeadReckoning,

    /// Render a fixed delay in the past so two real samples bracket every
    /// estimate. Accurate, adds latency.
    BufferedInterpolation,
}

impl SmoothingMode {
    /// Human-readable name for logging/UI.
    pub fn as_str(&self) -> &'static str {
        match self {
            SmoothingMode::DeadReckoning => "dead-reckoning",
            SmoothingMode::BufferedInterpolation => "buffered-interpolation",
        }
    }
}

impl std::fmt::Display for SmoothingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Config
// ─────────────────────────────────────────────────────────────────────────────

/// Configuration for a [`crate::smoothing::SmoothingEngine`] instance.
#[derive(Debug, Clone)]
pub struct SmootherConfig {
    /// Interpolation history capacity per entity. ≥ 2 required for the
    /// buffered strategy to interpolate; at 0 or 1 it degrades to snapping.
    pub ring_capacity: usize,

    /// Exponential-decay time constant for closing the gap toward the
    /// newest sample, seconds. ≤ 0 means snap instantly.
    pub smoothing_factor: f64,

    /// Maximum age of the last sample, seconds, at which prediction still
    /// grows. Beyond it the extrapolation offset freezes.
    pub max_extrapolation_secs: f64,

    /// Minimum reported speed, m/s, for prediction to apply.
    pub min_prediction_speed: f64,

    /// Scales the extrapolation offset, `[0, 1]`. Values outside the range
    /// are clamped at use.
    pub prediction_damping: f64,

    /// Rendering delay for buffered interpolation, seconds.
    pub buffer_delay_secs: f64,

    /// Initially active smoothing mode.
    pub mode: SmoothingMode,
}

impl Default for SmootherConfig {
    fn default() -> Self {
        Self {
            ring_capacity: DEFAULT_RING_CAPACITY,
            smoothing_factor: DEFAULT_SMOOTHING_FACTOR,
            max_extrapolation_secs: DEFAULT_MAX_EXTRAPOLATION_SECS,
            min_prediction_speed: DEFAULT_MIN_PREDICTION_SPEED_MPS,
            prediction_damping: DEFAULT_PREDICTION_DAMPING,
            buffer_delay_secs: DEFAULT_BUFFER_DELAY_SECS,
            mode: SmoothingMode::default(),
        }
    }
}

impl SmootherConfig {
    /// Set the interpolation history capacity.
    pub fn with_ring_capacity(mut self, capacity: usize) -> Self {
        self.ring_capacity = capacity;
        self
    }

    /// Set the smoothing time constant (seconds).
    pub fn with_smoothing_factor(mut self, secs: f64) -> Self {
        self.smoothing_factor = secs;
        self
    }

    /// Set the extrapolation cap (seconds).
    pub fn with_max_extrapolation_secs(mut self, secs: f64) -> Self {
        self.max_extrapolation_secs = secs;
        self
    }

    /// Set the prediction speed floor (m/s).
    pub fn with_min_prediction_speed(mut self, mps: f64) -> Self {
        self.min_prediction_speed = mps;
        self
    }

    /// Set the prediction damping factor.
    pub fn with_prediction_damping(mut self, factor: f64) -> Self {
        self.prediction_damping = factor;
        self
    }

    /// Set the interpolation rendering delay (seconds).
    pub fn with_buffer_delay_secs(mut self, secs: f64) -> Self {
        self.buffer_delay_secs = secs;
        self
    }

    /// Set the initial smoothing mode.
    pub fn with_mode(mut self, mode: SmoothingMode) -> Self {
        self.mode = mode;
        self
    }

    /// Log configurations that degrade behavior instead of failing.
    ///
    /// Misconfiguration never crashes the engine: every case below has a
    /// defined fallback, and this only makes the degradation visible.
    pub fn validate(&self) {
        if self.ring_capacity < 2 {
            warn!(
                ring_capacity = self.ring_capacity,
                "interpolation needs a ring capacity of at least 2; \
                 buffered mode will snap to the latest sample"
            );
        }
        if self.buffer_delay_secs <= 0.0 {
            warn!(
                buffer_delay_secs = self.buffer_delay_secs,
                "non-positive buffer delay renders at wall-clock time; \
                 interpolation will mostly hold the newest sample"
            );
        }
        if !(0.0..=1.0).contains(&self.prediction_damping) {
            warn!(
                prediction_damping = self.prediction_damping,
                "prediction damping outside [0, 1] is clamped at use"
            );
        }
        if self.max_extrapolation_secs <= 0.0 {
            warn!(
                max_extrapolation_secs = self.max_extrapolation_secs,
                "non-positive extrapolation cap disables prediction entirely"
            );
        }
    }
}
