//! Planar geometry, heading math, and the projection seam.
//!
//! Positions inside the engine live in a local planar frame: geographic
//! coordinates are converted exactly once, at the ingest boundary, through a
//! [`Projector`]. Everything downstream works on [`Point2D`] metres-ish
//! units and never sees latitude/longitude again.
//!
//! # Conventions
//!
//! - `x` grows east, `y` grows north.
//! - Headings are degrees in `[0, 360)`, where 0 = north (+y) and 90 = east
//!   (+x) — the GPS bearing convention.
//! - Heading interpolation always takes the shortest way around the circle,
//!   so 350° → 10° passes through 0°, not 180°.

use serde::{Deserialize, Serialize};

/// Default scale for the affine projector: 1 degree = 100 000 world units.
pub const DEFAULT_COORDINATE_SCALE: f64 = 100_000.0;

/// A point in the local planar frame.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2D {
    /// East offset in world units.
    pub x: f64,
    /// North offset in world units.
    pub y: f64,
}

impl Point2D {
    /// Create a new point.
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Linearly interpolate toward `other` by factor `t`.
    ///
    /// `t = 0` returns `self`, `t = 1` returns `other`. `t` is not clamped;
    /// callers clamp where extrapolation would be wrong.
    #[inline]
    pub fn lerp(&self, other: Point2D, t: f64) -> Point2D {
        Point2D {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
        }
    }

    /// Euclidean distance to `other`.
    #[inline]
    pub fn distance_to(&self, other: Point2D) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// True if both components are finite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl std::ops::Add<Vector2D> for Point2D {
    type Output = Point2D;

    #[inline]
    fn add(self, v: Vector2D) -> Point2D {
        Point2D {
            x: self.x + v.x,
            y: self.y + v.y,
        }
    }
}

/// A displacement or velocity in the local planar frame.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector2D {
    /// East component.
    pub x: f64,
    /// North component.
    pub y: f64,
}

impl Vector2D {
    /// The zero vector.
    pub const ZERO: Vector2D = Vector2D { x: 0.0, y: 0.0 };

    /// Create a new vector.
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Vector magnitude.
    #[inline]
    pub fn magnitude(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }
}

impl std::ops::Mul<f64> for Vector2D {
    type Output = Vector2D;

    #[inline]
    fn mul(self, s: f64) -> Vector2D {
        Vector2D {
            x: self.x * s,
            y: self.y * s,
        }
    }
}

/// Normalize a heading to `[0, 360)` degrees.
#[inline]
pub fn normalize_heading(deg: f64) -> f64 {
    deg.rem_euclid(360.0)
}

/// Signed shortest-path difference `to - from` in `(-180, 180]` degrees.
#[inline]
pub fn heading_delta(from: f64, to: f64) -> f64 {
    let d = (to - from).rem_euclid(360.0);
    if d > 180.0 {
        d - 360.0
    } else {
        d
    }
}

/// Interpolate between two headings along the shortest arc.
///
/// `t = 0` returns `from`, `t = 1` returns `to` (mod 360). `t` is not
/// clamped.
#[inline]
pub fn lerp_heading(from: f64, to: f64, t: f64) -> f64 {
    normalize_heading(from + heading_delta(from, to) * t)
}

/// Decompose a heading and speed into a velocity vector.
///
/// GPS bearing convention: 0° = north (+y), 90° = east (+x). This is a
/// polar-to-cartesian decomposition, not a general rotation.
#[inline]
pub fn heading_to_velocity(heading_deg: f64, speed: f64) -> Vector2D {
    let rad = heading_deg.to_radians();
    Vector2D {
        x: rad.sin() * speed,
        y: rad.cos() * speed,
    }
}

/// Heading of a velocity vector in degrees `[0, 360)`.
///
/// Undefined direction (zero vector) returns 0; callers gate on magnitude
/// before trusting the result.
#[inline]
pub fn velocity_heading(v: Vector2D) -> f64 {
    normalize_heading(v.x.atan2(v.y).to_degrees())
}

/// Convert a speed from km/h (wire units) to m/s (engine units).
#[inline]
pub fn kmh_to_mps(speed_kmh: f64) -> f64 {
    speed_kmh / 3.6
}

/// Convert a millisecond timestamp (wire units) to seconds (engine units).
#[inline]
pub fn millis_to_secs(timestamp_ms: i64) -> f64 {
    timestamp_ms as f64 / 1000.0
}

/// Maps geographic coordinates to the local planar frame.
///
/// Injected at the ingest boundary, never owned by the engine. The default
/// [`AffineProjector`] is a plain scale; callers with a real geodesic
/// transform implement this trait (or pass a closure) instead.
pub trait Projector {
    /// Project latitude/longitude (degrees) to a planar point.
    fn project(&self, lat: f64, lon: f64) -> Point2D;
}

impl<F> Projector for F
where
    F: Fn(f64, f64) -> Point2D,
{
    fn project(&self, lat: f64, lon: f64) -> Point2D {
        self(lat, lon)
    }
}

/// Trivial affine projection: longitude → x, latitude → y, scaled.
///
/// Matches the visualization-grade mapping where one degree spans
/// [`DEFAULT_COORDINATE_SCALE`] world units. Good enough near a fixed
/// operating area; not a substitute for a real CRS transform.
#[derive(Debug, Clone, Copy)]
pub struct AffineProjector {
    /// World units per degree.
    pub scale: f64,
}

impl AffineProjector {
    /// Create a projector with the given scale.
    pub fn new(scale: f64) -> Self {
        Self { scale }
    }
}

impl Default for AffineProjector {
    fn default() -> Self {
        Self {
            scale: DEFAULT_COORDINATE_SCALE,
        }
    }
}

impl Projector for AffineProjector {
    #[inline]
    fn project(&self, lat: f64, lon: f64) -> Point2D {
        Point2D {
            x: lon * self.scale,
            y: lat * self.scale,
        }
    }
}
