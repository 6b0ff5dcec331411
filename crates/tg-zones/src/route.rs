//! Planned route polyline.

use geo::LineString;
use tg_core::{GeoPoint, line_deviation_m, to_line_string};

use crate::{ZoneError, ZoneResult};

/// Encoded-polyline precision used by most directions APIs (1e-5 degrees).
pub const DEFAULT_PRECISION: u32 = 5;

/// Ordered `(lat, lon)` vertices of a planned path.
///
/// An empty polyline means "no route configured": `deviation_m` returns
/// `None` and the route-deviation rule is skipped.
#[derive(Clone, Debug, PartialEq)]
pub struct RoutePolyline {
    points: Vec<GeoPoint>,
    line:   LineString<f64>,
}

impl RoutePolyline {
    pub fn new(points: Vec<GeoPoint>) -> Self {
        let line = to_line_string(&points);
        Self { points, line }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Decode an encoded polyline (the directions-API overview format) at
    /// `precision` decimal digits.
    pub fn from_encoded(encoded: &str, precision: u32) -> ZoneResult<Self> {
        Ok(Self::new(decode_polyline(encoded, precision)?))
    }

    pub fn points(&self) -> &[GeoPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Approximate metres from `point` to the route, or `None` if empty.
    #[inline]
    pub fn deviation_m(&self, point: GeoPoint) -> Option<f64> {
        line_deviation_m(&self.line, point)
    }
}

impl Default for RoutePolyline {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<Vec<GeoPoint>> for RoutePolyline {
    fn from(points: Vec<GeoPoint>) -> Self {
        Self::new(points)
    }
}

/// Decode `encoded` into `(lat, lon)` vertices.
pub fn decode_polyline(encoded: &str, precision: u32) -> ZoneResult<Vec<GeoPoint>> {
    let line = polyline::decode_polyline(encoded, precision)
        .map_err(|e| ZoneError::Polyline(e.to_string()))?;
    Ok(line.coords().map(|c| GeoPoint::new(c.y, c.x)).collect())
}
