//! Buffered-interpolation strategy: accurate, adds latency.
//!
//! Trades a fixed rendering delay for always-correct-by-construction
//! motion: poses are rendered at `render_time = now - buffer_delay`, a time
//! in the past for which two real samples usually bracket the estimate, so
//! the result is a true interpolation rather than a guess.
//!
//! The per-entity ring is scanned order-independently — once the write
//! cursor wraps, storage order no longer matches timestamp order, and
//! reordered arrivals mean even a fresh ring may not be sorted.

use crate::coord::{lerp_heading, normalize_heading};
use crate::track::{BufferedPose, EntityTrack, Pose};

use super::config::SmootherConfig;

/// Advance one entity by one tick and return its rendered pose.
pub(crate) fn update(track: &mut EntityTrack, now: f64, config: &SmootherConfig) -> Pose {
    let render_time = now - config.buffer_delay_secs;
    let pose = resolve(track, render_time);

    track.current_pose = pose;
    // Keep the dead-reckoning base in step so a later mode switch resumes
    // from the rendered pose instead of a stale one.
    track.smoothed_position = pose.position;
    pose
}

/// Pick or blend buffered samples for `render_time`.
///
/// Resolution order, mirroring the degenerate-case ladder of the buffer:
/// bracketed → exact slot → one-sided hold → singleton → empty.
fn resolve(track: &EntityTrack, render_time: f64) -> Pose {
    let history = track.history.as_slice();

    if history.is_empty() {
        // Ring capacity 0 (configuration misuse): degrade to snapping to
        // the newest sample, which the dead-reckoning scratch always holds.
        return Pose::new(track.target_position, track.last_heading);
    }
    if history.len() == 1 {
        return pose_of(&history[0]);
    }

    // `older`: greatest timestamp ≤ render_time.
    // `newer`: smallest timestamp ≥ render_time.
    let mut older: Option<usize> = None;
    let mut newer: Option<usize> = None;
    for (i, slot) in history.iter().enumerate() {
        // Ties go to the later-written slot, so duplicate timestamps
        // resolve to the most recently received sample.
        if slot.timestamp <= render_time
            && older.map_or(true, |o| slot.timestamp >= history[o].timestamp)
        {
            older = Some(i);
        }
        if slot.timestamp >= render_time
            && newer.map_or(true, |n| slot.timestamp <= history[n].timestamp)
        {
            newer = Some(i);
        }
    }

    match (older, newer) {
        (Some(o), Some(n)) if o == n => pose_of(&history[o]),
        (Some(o), Some(n)) => {
            let older = &history[o];
            let newer = &history[n];
            let time_delta = newer.timestamp - older.timestamp;
            if time_delta <= 0.0 {
                // Duplicate or reordered timestamps in the window.
                return pose_of(newer);
            }
            let alpha = ((render_time - older.timestamp) / time_delta).clamp(0.0, 1.0);
            Pose::new(
                older.position.lerp(newer.position, alpha),
                lerp_heading(older.heading, newer.heading, alpha),
            )
        }
        // Render time is beyond all history: hold the newest sample.
        (Some(o), None) => pose_of(&history[o]),
        // Render time predates all history: hold the oldest sample.
        (None, Some(n)) => pose_of(&history[n]),
        (None, None) => unreachable!("non-empty history brackets every render time"),
    }
}

fn pose_of(slot: &BufferedPose) -> Pose {
    Pose::new(slot.position, normalize_heading(slot.heading))
}
