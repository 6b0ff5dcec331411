//! `tg-core` — foundational types for the `trailguard` safety engine.
//!
//! This crate is a dependency of every other `tg-*` crate.  It intentionally
//! has no `tg-*` dependencies and minimal external ones (`chrono`, `geo` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                                   |
//! |-----------------|------------------------------------------------------------|
//! | [`ids`]         | `EntityId`                                                 |
//! | [`geo`]         | `GeoPoint`, haversine, speed, point-in-polygon, deviation  |
//! | [`time`]        | `Timestamp`, ISO-8601 parsing, elapsed seconds             |
//! | [`anomaly`]     | `Anomaly` label enum                                       |
//! | [`error`]       | `CoreError`, `CoreResult`                                  |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod anomaly;
pub mod error;
pub mod geo;
pub mod ids;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use anomaly::Anomaly;
pub use error::{CoreError, CoreResult};
pub use self::geo::{
    GeoPoint, deviation_m, distance_m, line_deviation_m, point_in_polygon, polygon_contains,
    speed_mps, to_line_string, to_polygon,
};
pub use ids::EntityId;
pub use time::{Timestamp, elapsed_secs, format_timestamp, parse_timestamp};
