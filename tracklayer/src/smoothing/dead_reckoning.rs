//! Dead-reckoning strategy: responsive, may overshoot.
//!
//! Renders plausible motion *ahead* of the last confirmed sample by
//! extrapolating along a constant-velocity vector, damped so the estimate
//! stays bounded when updates lag.
//!
//! # Shape of the estimate
//!
//! Two terms, recomputed every tick:
//!
//! 1. A smoothed base that decays exponentially toward the newest sample's
//!    position — closes the gap left by retargeting without a visible jump.
//! 2. A prediction offset `velocity × age × (age / cap) × damping`, where
//!    `age` is clamped to the extrapolation cap. Zero right after a sample,
//!    quadratic growth while updates lag, frozen once `age` reaches the cap
//!    — the marker stops rather than running away or snapping back.
//!
//! The offset is applied to the base fresh each tick instead of being folded
//! into it, so the rendered lead never exceeds
//! `velocity × cap × damping` regardless of frame rate.

use crate::coord::velocity_heading;
use crate::track::{EntityTrack, Pose};

use super::config::SmootherConfig;

/// Velocity magnitudes below this hold the last sampled heading instead of
/// facing the velocity vector, preventing heading flicker when stationary.
const VELOCITY_EPSILON: f64 = 1e-6;

/// Advance one entity by one tick and return its rendered pose.
pub(crate) fn update(track: &mut EntityTrack, now: f64, dt: f64, config: &SmootherConfig) -> Pose {
    // Negative ages happen when a sample is timestamped ahead of `now`
    // (sender clock skew); prediction waits for the clock to catch up.
    let age = (now - track.last_sample_time).max(0.0);

    let alpha = smoothing_alpha(config.smoothing_factor, dt);
    track.smoothed_position = track.smoothed_position.lerp(track.target_position, alpha);

    let mut position = track.smoothed_position;
    if track.speed_mps >= config.min_prediction_speed && config.max_extrapolation_secs > 0.0 {
        let capped = age.min(config.max_extrapolation_secs);
        let extrapolation_factor = (capped / config.max_extrapolation_secs).clamp(0.0, 1.0);
        let damped = extrapolation_factor * config.prediction_damping.clamp(0.0, 1.0);
        position = position + track.velocity * (capped * damped);
    }

    let heading = if track.velocity.magnitude() > VELOCITY_EPSILON {
        velocity_heading(track.velocity)
    } else {
        track.last_heading
    };

    let pose = Pose::new(position, heading);
    track.current_pose = pose;
    pose
}

/// Fraction of the remaining gap closed in one `dt` step.
///
/// `1 - exp(-dt / factor)` is the exact integral of exponential decay, so
/// smoothing is frame-rate independent. A non-positive factor means snap.
fn smoothing_alpha(smoothing_factor: f64, dt: f64) -> f64 {
    if smoothing_factor > f64::EPSILON {
        1.0 - (-dt / smoothing_factor).exp()
    } else {
        1.0
    }
}
