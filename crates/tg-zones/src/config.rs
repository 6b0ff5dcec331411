//! Zone file loader.
//!
//! # JSON format
//!
//! ```json
//! {
//!   "restricted": [
//!     { "name": "Military Area", "polygon": [[28.60, 77.20], [28.60, 77.22], [28.62, 77.22]] }
//!   ],
//!   "allowed": [
//!     { "name": "Old Town", "polygon": [[28.55, 77.15], [28.55, 77.30], [28.70, 77.30], [28.70, 77.15]] }
//!   ],
//!   "route_origin": "28.614,77.209",
//!   "route_destination": "28.656,77.241"
//! }
//! ```
//!
//! Polygon vertices are `[lat, lon]` pairs.  Every key is optional: a missing
//! list means no zones of that kind, and the route is configured only when
//! both `route_origin` and `route_destination` are present.  The endpoints
//! are resolved to a polyline later, by a
//! [`RouteProvider`][crate::RouteProvider].

use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::{info, warn};

use tg_core::GeoPoint;

use crate::{Zone, ZoneError, ZoneKind, ZoneResult, ZoneSet};

// ── File records ──────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct ZoneFile {
    #[serde(default)]
    restricted:        Vec<ZoneRecord>,
    #[serde(default)]
    allowed:           Vec<ZoneRecord>,
    #[serde(default)]
    route_origin:      Option<String>,
    #[serde(default)]
    route_destination: Option<String>,
}

#[derive(Deserialize)]
struct ZoneRecord {
    #[serde(default)]
    name:    String,
    polygon: Vec<[f64; 2]>,
}

impl ZoneRecord {
    fn into_zone(self, kind: ZoneKind) -> Zone {
        let polygon = self.polygon.into_iter().map(|[lat, lon]| GeoPoint::new(lat, lon)).collect();
        Zone::new(self.name, kind, polygon)
    }
}

// ── Public types ──────────────────────────────────────────────────────────────

/// Origin and destination of the planned route.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RouteEndpoints {
    pub origin:      GeoPoint,
    pub destination: GeoPoint,
}

/// Everything the zone file configures.  Immutable for the process lifetime.
#[derive(Debug, Default)]
pub struct ZoneConfig {
    pub zones: ZoneSet,
    /// `None` when the file names no route (route deviation disabled).
    pub route: Option<RouteEndpoints>,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a zone file from disk.
pub fn load_zone_file(path: &Path) -> ZoneResult<ZoneConfig> {
    let file = std::fs::File::open(path)?;
    load_zone_reader(std::io::BufReader::new(file))
}

/// Like [`load_zone_file`] but accepts any `Read` source.
pub fn load_zone_reader<R: Read>(reader: R) -> ZoneResult<ZoneConfig> {
    let file: ZoneFile = serde_json::from_reader(reader)?;

    let restricted = file.restricted.into_iter().map(|r| r.into_zone(ZoneKind::Restricted));
    let allowed = file.allowed.into_iter().map(|r| r.into_zone(ZoneKind::Allowed));
    let zones = ZoneSet::new(restricted.chain(allowed));

    for zone in zones.restricted.zones().iter().chain(zones.allowed.zones()) {
        if zone.is_degenerate() {
            warn!(zone = %zone.name, kind = %zone.kind, vertices = zone.polygon().len(),
                "zone has fewer than 3 vertices and will never match");
        }
    }

    let route = match (file.route_origin, file.route_destination) {
        (Some(o), Some(d)) => Some(RouteEndpoints {
            origin:      parse_lat_lon(&o)?,
            destination: parse_lat_lon(&d)?,
        }),
        (None, None) => None,
        (o, d) => {
            warn!(origin = ?o, destination = ?d, "route needs both origin and destination; ignoring");
            None
        }
    };

    Ok(ZoneConfig { zones, route })
}

/// Load a zone file, degrading to an empty configuration on any error.
///
/// Configuration errors are recoverable: the failure is logged and the run
/// continues with no zones and no route.
pub fn load_zone_file_or_default(path: &Path) -> ZoneConfig {
    match load_zone_file(path) {
        Ok(config) => {
            info!(
                path = %path.display(),
                restricted = config.zones.restricted.len(),
                allowed = config.zones.allowed.len(),
                route = config.route.is_some(),
                "loaded zone file"
            );
            config
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "zone file unusable; continuing with no zones or route");
            ZoneConfig::default()
        }
    }
}

/// Parse a `"lat,lon"` string such as `"28.614, 77.209"`.
pub fn parse_lat_lon(s: &str) -> ZoneResult<GeoPoint> {
    let bad = |reason: &str| ZoneError::BadCoordinate {
        input:  s.to_owned(),
        reason: reason.to_owned(),
    };

    let (lat, lon) = s.split_once(',').ok_or_else(|| bad("expected \"lat,lon\""))?;
    let lat: f64 = lat.trim().parse().map_err(|_| bad("latitude is not a number"))?;
    let lon: f64 = lon.trim().parse().map_err(|_| bad("longitude is not a number"))?;

    let point = GeoPoint::new(lat, lon);
    if !point.is_valid() {
        return Err(bad("outside WGS-84 range"));
    }
    Ok(point)
}
