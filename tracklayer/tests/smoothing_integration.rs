//! Integration tests for the smoothing engine.
//!
//! These tests verify the complete flow including:
//! - Telemetry reports → feed → engine → rendered poses
//! - Dead-reckoning extrapolation bounds with realistic tick timing
//! - Buffered interpolation against reordered and overwritten history
//!
//! Run with: `cargo test --test smoothing_integration`

use std::sync::Arc;

use tracklayer::coord::AffineProjector;
use tracklayer::feed::{feed_channel, spawn_sample_feed, TelemetryReport};
use tracklayer::smoothing::{SmootherConfig, SmoothingEngine, SmoothingMode};
use tracklayer::track::Sample;
use tracklayer::trail::TrailRecorder;
use tracklayer::Point2D;

// ============================================================================
// Helper Functions
// ============================================================================

/// Create an engine sample in planar units.
fn sample(x: f64, y: f64, heading: f64, speed_mps: f64, t: f64) -> Sample {
    Sample::new(Point2D::new(x, y), heading, speed_mps, t)
}

/// Create a wire-unit telemetry report.
fn report(id: &str, lat: f64, lon: f64, speed_kmh: f64, bearing: f64, ms: i64) -> TelemetryReport {
    TelemetryReport {
        entity_id: id.to_string(),
        latitude: lat,
        longitude: lon,
        speed_kmh,
        bearing_deg: bearing,
        timestamp_ms: ms,
    }
}

/// 60 Hz frame delta used throughout.
const DT: f64 = 0.016;

// ============================================================================
// Dead Reckoning
// ============================================================================

/// The canonical two-sample scenario: a rider reported stationary at the
/// origin, then moving east at 36 km/h (10 m/s) from (10, 0).
#[test]
fn test_dead_reckoning_end_to_end() {
    let engine = SmoothingEngine::new(SmootherConfig::default().with_smoothing_factor(0.15));

    engine.ingest("A", sample(0.0, 0.0, 0.0, 0.0, 0.0)).unwrap();
    engine.ingest("A", sample(10.0, 0.0, 90.0, 10.0, 1.0)).unwrap();

    let poses = engine.tick(1.0, DT);
    let pose = &poses["A"];

    assert!(
        pose.position.x > 0.0 && pose.position.x < 10.0,
        "Position should be strictly between the samples, got {:?}",
        pose.position
    );
    assert!(pose.position.y.abs() < 1e-9);
    assert!(
        (pose.heading - 90.0).abs() < 1e-6,
        "Heading should face the velocity, got {}°",
        pose.heading
    );
}

/// Freeze bound: once the last sample is older than the extrapolation cap,
/// the rendered position stops changing.
#[test]
fn test_dead_reckoning_freeze_bound() {
    let config = SmootherConfig::default().with_max_extrapolation_secs(5.0);
    let engine = SmoothingEngine::new(config);

    engine.ingest("A", sample(0.0, 0.0, 90.0, 10.0, 0.0)).unwrap();

    // Tick through the whole extrapolation window at 60 Hz.
    let mut now = 0.0;
    let mut frozen = Point2D::new(0.0, 0.0);
    while now < 5.0 {
        now += DT;
        frozen = engine.tick(now, DT)["A"].position;
    }

    // One more second of silence: nothing may move.
    for _ in 0..60 {
        now += DT;
        let pose = engine.tick(now, DT)["A"].position;
        assert!(
            frozen.distance_to(pose) < 1e-6,
            "Marker moved after the freeze point: {:?} -> {:?}",
            frozen,
            pose
        );
        frozen = pose;
    }
}

/// A stationary entity never changes heading between ticks, no matter how
/// long it sits.
#[test]
fn test_stationary_heading_stability() {
    let engine = SmoothingEngine::with_defaults();
    engine.ingest("parked", sample(5.0, 5.0, 123.0, 0.0, 0.0)).unwrap();

    for i in 1..=600 {
        let poses = engine.tick(i as f64 * DT, DT);
        assert_eq!(
            poses["parked"].heading, 123.0,
            "Heading flickered on tick {}",
            i
        );
    }
}

// ============================================================================
// Buffered Interpolation
// ============================================================================

/// Interpolation exactness: samples at t=0 and t=10 with a 5 s delay give
/// the exact midpoint when rendering at now=10.
#[test]
fn test_interpolation_exact_midpoint() {
    let config = SmootherConfig::default()
        .with_mode(SmoothingMode::BufferedInterpolation)
        .with_buffer_delay_secs(5.0);
    let engine = SmoothingEngine::new(config);

    engine.ingest("A", sample(0.0, 0.0, 0.0, 1.0, 0.0)).unwrap();
    engine.ingest("A", sample(10.0, 4.0, 0.0, 1.0, 10.0)).unwrap();

    let poses = engine.tick(10.0, DT);
    let pose = &poses["A"];
    assert!((pose.position.x - 5.0).abs() < 1e-9);
    assert!((pose.position.y - 2.0).abs() < 1e-9);
}

/// Single-sample safety: one buffered sample is returned verbatim on every
/// tick, never NaN.
#[test]
fn test_interpolation_single_sample_safety() {
    let config = SmootherConfig::default().with_mode(SmoothingMode::BufferedInterpolation);
    let engine = SmoothingEngine::new(config);

    engine.ingest("solo", sample(7.0, -3.0, 42.0, 2.0, 1.0)).unwrap();

    for i in 0..100 {
        let poses = engine.tick(i as f64 * 0.1, DT);
        let pose = &poses["solo"];
        assert!(pose.position.is_finite());
        assert_eq!(pose.position, Point2D::new(7.0, -3.0));
        assert_eq!(pose.heading, 42.0);
    }
}

/// Ring overwrite: ingesting `capacity + k` samples leaves exactly the most
/// recent `capacity` discoverable; render times older than the window hold
/// the oldest survivor.
#[test]
fn test_ring_overwrite_discards_oldest() {
    let config = SmootherConfig::default()
        .with_mode(SmoothingMode::BufferedInterpolation)
        .with_ring_capacity(4)
        .with_buffer_delay_secs(0.0);
    let engine = SmoothingEngine::new(config);

    // Seven samples, one per second, marching east 10 units at a time.
    for i in 0..7 {
        engine
            .ingest("A", sample(i as f64 * 10.0, 0.0, 90.0, 1.0, i as f64))
            .unwrap();
    }

    // t=0..2 were overwritten; rendering at t=1 holds the oldest survivor
    // (t=3, x=30).
    let poses = engine.tick(1.0, DT);
    assert_eq!(poses["A"].position, Point2D::new(30.0, 0.0));

    // The surviving window interpolates normally: t=4.5 → x=45.
    let poses = engine.tick(4.5, DT);
    assert!((poses["A"].position.x - 45.0).abs() < 1e-9);
}

// ============================================================================
// Engine Lifecycle
// ============================================================================

/// Idempotent remove: double-remove is fine and the entity vanishes from
/// subsequent ticks.
#[test]
fn test_remove_idempotent_and_absent() {
    let engine = SmoothingEngine::with_defaults();
    engine.ingest("gone", sample(0.0, 0.0, 0.0, 0.0, 0.0)).unwrap();
    engine.ingest("kept", sample(1.0, 1.0, 0.0, 0.0, 0.0)).unwrap();

    engine.remove("gone");
    engine.remove("gone");

    let poses = engine.tick(1.0, DT);
    assert!(!poses.contains_key("gone"));
    assert!(poses.contains_key("kept"));
}

/// Toggling mode mid-stream keeps both histories warm: the interpolation
/// window is immediately usable, and switching back resumes dead reckoning
/// from the rendered pose without a jump.
#[test]
fn test_mode_toggle_keeps_both_histories() {
    let engine = SmoothingEngine::with_defaults();

    for i in 0..5 {
        engine
            .ingest("A", sample(i as f64 * 10.0, 0.0, 90.0, 10.0, i as f64))
            .unwrap();
    }

    engine.set_mode(SmoothingMode::BufferedInterpolation);
    let interp = engine.tick(4.0, DT)["A"].position;
    // renderTime = 3.8 → between the t=3 and t=4 samples.
    assert!(interp.x > 30.0 - 1e-9 && interp.x < 40.0 + 1e-9);

    engine.set_mode(SmoothingMode::DeadReckoning);
    let reckoned = engine.tick(4.0 + DT, DT)["A"].position;
    assert!(
        interp.distance_to(reckoned) < 2.0,
        "Mode switch jumped: {:?} -> {:?}",
        interp,
        reckoned
    );
}

// ============================================================================
// Feed Pipeline
// ============================================================================

/// Wire-unit reports flow through the feed task into rendered poses.
#[tokio::test]
async fn test_feed_to_pose_pipeline() {
    let engine = Arc::new(SmoothingEngine::with_defaults());
    let (tx, rx) = feed_channel();
    let handle = spawn_sample_feed(Arc::clone(&engine), AffineProjector::new(1.0), rx);

    // Two riders reporting in wire units; 36 km/h = 10 m/s.
    tx.send(report("r1", 0.0, 0.0, 0.0, 0.0, 0)).await.unwrap();
    tx.send(report("r1", 0.0, 10.0, 36.0, 90.0, 1_000)).await.unwrap();
    tx.send(report("r2", 5.0, 5.0, 0.0, 270.0, 500)).await.unwrap();
    // Malformed report: dropped by the boundary, feed keeps running.
    tx.send(report("bad", f64::NAN, 0.0, 0.0, 0.0, 0)).await.unwrap();
    drop(tx);

    handle.await.expect("feed task should end cleanly");

    let poses = engine.tick(1.0, DT);
    assert_eq!(poses.len(), 2);
    assert!(poses["r1"].position.x > 0.0 && poses["r1"].position.x < 10.0);
    assert_eq!(poses["r2"].heading, 270.0);
    assert!(!poses.contains_key("bad"));

    let snapshot = engine.metrics().snapshot();
    assert_eq!(snapshot.samples_ingested, 3);
    assert_eq!(snapshot.samples_rejected, 1);
}

/// Randomized sample streams — jittered timestamps, reordered arrivals,
/// arbitrary headings — never produce a non-finite pose in either mode.
#[test]
fn test_random_streams_stay_finite() {
    use rand::Rng;

    let mut rng = rand::rng();
    for mode in [
        SmoothingMode::DeadReckoning,
        SmoothingMode::BufferedInterpolation,
    ] {
        let engine = SmoothingEngine::new(SmootherConfig::default().with_mode(mode));
        let mut now = 0.0;

        for i in 0..2_000 {
            let id = format!("e{}", i % 5);
            let t = now + rng.random_range(-2.0..2.0);
            engine
                .ingest(
                    &id,
                    sample(
                        rng.random_range(-10_000.0..10_000.0),
                        rng.random_range(-10_000.0..10_000.0),
                        rng.random_range(-720.0..720.0),
                        rng.random_range(0.0..80.0),
                        t,
                    ),
                )
                .unwrap();

            now += rng.random_range(0.0..0.5);
            for (id, pose) in engine.tick(now, rng.random_range(0.0..0.1)) {
                assert!(
                    pose.position.is_finite() && pose.heading.is_finite(),
                    "Non-finite pose for {} in {} mode: {:?}",
                    id,
                    mode,
                    pose
                );
            }
        }
    }
}

/// Poses feed the external trail recorder; removal drops both sides of the
/// id join.
#[test]
fn test_trails_follow_rendered_poses() {
    let engine = SmoothingEngine::with_defaults();
    let mut trails = TrailRecorder::new();

    for i in 0..10 {
        let t = i as f64;
        engine
            .ingest("A", sample(t * 10.0, 0.0, 90.0, 10.0, t))
            .unwrap();
        for (id, pose) in engine.tick(t + 0.5, DT) {
            trails.record(&id, pose.position);
        }
    }
    assert!(trails.len("A") > 1, "Moving entity should leave a trail");

    engine.remove("A");
    trails.remove("A");
    assert_eq!(trails.len("A"), 0);
    assert!(engine.tick(11.0, DT).is_empty());
}
