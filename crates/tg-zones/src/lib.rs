//! `tg-zones` — zone & route configuration and its external collaborators.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                      |
//! |--------------|---------------------------------------------------------------|
//! | [`zone`]     | `Zone`, `ZoneKind`                                            |
//! | [`index`]    | `ZoneIndex` (R-tree over zone envelopes), `ZoneSet`          |
//! | [`route`]    | `RoutePolyline`, encoded polyline decoding                    |
//! | [`config`]   | `ZoneConfig`, `load_zone_file`, `load_zone_file_or_default`   |
//! | [`provider`] | `RouteProvider`, `RoadSnapProvider`, fail-soft helpers        |
//! | [`error`]    | `ZoneError`, `ProviderError`                                  |
//!
//! # Fail-soft contract
//!
//! Nothing in this crate is allowed to stop rule evaluation.  A broken zone
//! file degrades to "no zones, no route"; a failing or slow route provider
//! degrades to an empty route (route deviation disabled); a failing or slow
//! road-snap provider degrades to the raw coordinates.  Each fallback is
//! logged through `tracing` at `warn`.

pub mod config;
pub mod error;
pub mod index;
pub mod provider;
pub mod route;
pub mod zone;


pub use config::{RouteEndpoints, ZoneConfig, load_zone_file, load_zone_file_or_default, load_zone_reader, parse_lat_lon};
pub use error::{ProviderError, ZoneError, ZoneResult};
pub use index::{ZoneIndex, ZoneSet};
pub use provider::{
    DEFAULT_PROVIDER_TIMEOUT, EncodedRoute, IdentitySnap, NoRoute, RoadSnapProvider, RouteProvider,
    StaticRoute, StraightLineRoute, resolve_route, snap_or_identity,
};
pub use route::{DEFAULT_PRECISION, RoutePolyline, decode_polyline};
pub use zone::{Zone, ZoneKind};
