//! Transport adapter: raw position reports in, engine samples out.
//!
//! The transport (WebSocket client, UDP listener, replay file — not this
//! crate's concern) produces [`TelemetryReport`]s in wire units: degrees
//! latitude/longitude, km/h, millisecond timestamps. This module converts
//! them to engine units exactly once, projects through the injected
//! [`Projector`], and hands the result to the engine.
//!
//! # Architecture
//!
//! ```text
//! Transport task ──mpsc──► feed task ──ingest──► SmoothingEngine
//!                          (convert + project)
//! ```
//!
//! The feed task ends when every sender is dropped; invalid reports are
//! logged and dropped, never fatal.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::coord::{kmh_to_mps, millis_to_secs, Projector};
use crate::smoothing::SmoothingEngine;
use crate::track::Sample;

/// Default feed channel capacity.
///
/// Deep enough to absorb a burst from a chatty transport without
/// back-pressuring it mid-frame, small enough that a stalled engine is
/// noticed quickly.
pub const DEFAULT_FEED_CAPACITY: usize = 32;

/// One position report in transport wire units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetryReport {
    /// Entity this report belongs to.
    pub entity_id: String,
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
    /// Ground speed in km/h.
    pub speed_kmh: f64,
    /// Bearing in degrees, 0 = north.
    pub bearing_deg: f64,
    /// Timestamp in milliseconds.
    pub timestamp_ms: i64,
}

impl TelemetryReport {
    /// Convert to an engine [`Sample`]: project the coordinates and switch
    /// to m/s and seconds.
    pub fn to_sample<P: Projector>(&self, projector: &P) -> Sample {
        Sample::new(
            projector.project(self.latitude, self.longitude),
            self.bearing_deg,
            kmh_to_mps(self.speed_kmh),
            millis_to_secs(self.timestamp_ms),
        )
    }
}

/// Create a feed channel with the default capacity.
pub fn feed_channel() -> (mpsc::Sender<TelemetryReport>, mpsc::Receiver<TelemetryReport>) {
    mpsc::channel(DEFAULT_FEED_CAPACITY)
}

/// Spawn the bridge task draining `rx` into the engine.
///
/// Runs until every sender is dropped. Reports the engine rejects are
/// logged at `warn` and dropped; the feed itself never fails.
pub fn spawn_sample_feed<P>(
    engine: Arc<SmoothingEngine>,
    projector: P,
    mut rx: mpsc::Receiver<TelemetryReport>,
) -> JoinHandle<()>
where
    P: Projector + Send + 'static,
{
    tokio::spawn(async move {
        while let Some(report) = rx.recv().await {
            let sample = report.to_sample(&projector);
            if let Err(e) = engine.ingest(&report.entity_id, sample) {
                warn!(
                    entity = %report.entity_id,
                    error = %e,
                    "dropping invalid telemetry report"
                );
            }
        }
        debug!("telemetry feed channel closed");
    })
}
