//! Zone polygons.

use geo::Polygon;
use tg_core::{GeoPoint, polygon_contains, to_polygon};

/// Whether presence inside a zone is anomalous or expected.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum ZoneKind {
    /// Being inside is itself an anomaly.
    Restricted,
    /// Part of the expected operating area; being outside all of them is an
    /// anomaly.
    Allowed,
}

impl ZoneKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ZoneKind::Restricted => "restricted",
            ZoneKind::Allowed    => "allowed",
        }
    }
}

impl std::fmt::Display for ZoneKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named polygon, implicitly closed.  Immutable after load.
///
/// The ring is built into a [`Polygon`] once at construction; degenerate
/// rings have no shape and never match.
#[derive(Clone, Debug, PartialEq)]
pub struct Zone {
    pub name: String,
    pub kind: ZoneKind,
    polygon:  Vec<GeoPoint>,
    shape:    Option<Polygon<f64>>,
}

impl Zone {
    pub fn new(name: impl Into<String>, kind: ZoneKind, polygon: Vec<GeoPoint>) -> Self {
        let shape = to_polygon(&polygon);
        Self { name: name.into(), kind, polygon, shape }
    }

    /// Vertices as loaded.
    #[inline]
    pub fn polygon(&self) -> &[GeoPoint] {
        &self.polygon
    }

    /// `true` for polygons with fewer than 3 vertices; they never match.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.shape.is_none()
    }

    /// Strict containment; points on the boundary are outside.
    #[inline]
    pub fn contains(&self, point: GeoPoint) -> bool {
        self.shape.as_ref().is_some_and(|shape| polygon_contains(shape, point))
    }

    /// `[min_lat, min_lon]`, `[max_lat, max_lon]`, or `None` for an empty polygon.
    pub fn bounds(&self) -> Option<([f64; 2], [f64; 2])> {
        let first = self.polygon.first()?;
        let init = ([first.lat, first.lon], [first.lat, first.lon]);
        Some(self.polygon.iter().fold(init, |(lo, hi), p| {
            (
                [lo[0].min(p.lat), lo[1].min(p.lon)],
                [hi[0].max(p.lat), hi[1].max(p.lon)],
            )
        }))
    }
}
