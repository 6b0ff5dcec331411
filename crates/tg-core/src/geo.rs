//! Geographic coordinate type and the geometry primitives used by the rules.
//!
//! Everything here is a pure function of its inputs.  Two distance models
//! coexist:
//!
//! | Function             | Model                                              |
//! |----------------------|----------------------------------------------------|
//! | [`distance_m`]       | Haversine great-circle, R = 6 371 000 m            |
//! | [`deviation_m`]      | Planar distance in degree space × 111 139 m/degree |
//!
//! The route-deviation figure is an approximation, and route-deviation
//! thresholds are expressed in its units.
//!
//! Containment and deviation run on [`geo`](::geo) shapes with longitude on
//! the x axis and latitude on the y axis.

use ::geo::{Contains, Coord, EuclideanDistance, LineString, Point, Polygon};

use crate::time::{Timestamp, elapsed_secs};

/// Mean Earth radius, metres.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Metres per degree used by [`deviation_m`] to convert a degree-space
/// distance into metres.
pub const METRES_PER_DEGREE: f64 = 111_139.0;

/// A WGS-84 geographic coordinate in decimal degrees.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    #[inline]
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// `true` if both components are finite and within the WGS-84 ranges.
    #[inline]
    pub fn is_valid(self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
    }

    /// Haversine great-circle distance in metres.
    pub fn distance_m(self, other: GeoPoint) -> f64 {
        let d_lat = (other.lat - self.lat).to_radians();
        let d_lon = (other.lon - self.lon).to_radians();

        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();

        let a = (d_lat * 0.5).sin().powi(2)
            + lat1.cos() * lat2.cos() * (d_lon * 0.5).sin().powi(2);

        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        EARTH_RADIUS_M * c
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lon)
    }
}

impl From<(f64, f64)> for GeoPoint {
    /// `(lat, lon)`.
    fn from((lat, lon): (f64, f64)) -> Self {
        Self { lat, lon }
    }
}

// ── Distance & speed ──────────────────────────────────────────────────────────

/// Haversine distance between `a` and `b` in metres.
#[inline]
pub fn distance_m(a: GeoPoint, b: GeoPoint) -> f64 {
    a.distance_m(b)
}

/// Average speed in m/s for a move from `a` at `t_a` to `b` at `t_b`.
///
/// Returns exactly `0.0` when no time has elapsed.  A negative interval
/// (out-of-order fixes) also yields `0.0` rather than a negative speed.
pub fn speed_mps(a: GeoPoint, b: GeoPoint, t_a: Timestamp, t_b: Timestamp) -> f64 {
    let secs = elapsed_secs(t_a, t_b);
    if secs <= 0.0 {
        return 0.0;
    }
    distance_m(a, b) / secs
}

// ── Conversions ───────────────────────────────────────────────────────────────

impl From<GeoPoint> for Coord<f64> {
    /// Longitude on x, latitude on y.
    #[inline]
    fn from(p: GeoPoint) -> Self {
        Coord { x: p.lon, y: p.lat }
    }
}

impl From<GeoPoint> for Point<f64> {
    #[inline]
    fn from(p: GeoPoint) -> Self {
        Point::new(p.lon, p.lat)
    }
}

// ── Containment ───────────────────────────────────────────────────────────────

/// Builds the ring `polygon` as a [`Polygon`], or `None` for fewer than 3
/// vertices.  An explicit closing vertex is accepted; the ring is closed
/// either way.
pub fn to_polygon(polygon: &[GeoPoint]) -> Option<Polygon<f64>> {
    if polygon.len() < 3 {
        return None;
    }
    let ring: LineString<f64> = polygon.iter().copied().map(Coord::from).collect();
    Some(Polygon::new(ring, Vec::new()))
}

/// Strict interior test against a prebuilt polygon.  Points on an edge or
/// vertex are outside.
#[inline]
pub fn polygon_contains(polygon: &Polygon<f64>, point: GeoPoint) -> bool {
    polygon.contains(&Point::from(point))
}

/// Containment test over the implicitly closed ring `polygon`.
///
/// Rules:
/// - fewer than 3 vertices → `false` (degenerate polygon matches nothing);
/// - a point exactly on an edge or vertex → `false` (boundary is outside).
///
/// Callers testing many points against one ring should build it once with
/// [`to_polygon`] and use [`polygon_contains`].
pub fn point_in_polygon(point: GeoPoint, polygon: &[GeoPoint]) -> bool {
    to_polygon(polygon).is_some_and(|shape| polygon_contains(&shape, point))
}

// ── Route deviation ───────────────────────────────────────────────────────────

/// Builds `route` as a [`LineString`].  A single vertex is doubled into a
/// zero-length segment so distances to it stay well defined.
pub fn to_line_string(route: &[GeoPoint]) -> LineString<f64> {
    match route {
        [only] => LineString::from(vec![Coord::from(*only), Coord::from(*only)]),
        _ => route.iter().copied().map(Coord::from).collect(),
    }
}

/// Deviation in metres from `point` to a prebuilt route line, or `None` when
/// the line has no vertices.
pub fn line_deviation_m(route: &LineString<f64>, point: GeoPoint) -> Option<f64> {
    if route.0.is_empty() {
        return None;
    }
    Some(Point::from(point).euclidean_distance(route) * METRES_PER_DEGREE)
}

/// Distance in metres from `point` to the polyline `route`, or `None` when
/// the route is empty (no deviation can be measured).
///
/// The polyline is a connected run of segments; a single-vertex route
/// degenerates to the distance to that vertex.  Distances are computed in
/// `(lon, lat)` degree space and scaled by [`METRES_PER_DEGREE`].
pub fn deviation_m(point: GeoPoint, route: &[GeoPoint]) -> Option<f64> {
    line_deviation_m(&to_line_string(route), point)
}
