//! Incoming fixes and their validation.

use serde::{Deserialize, Serialize};
use tracing::warn;

use tg_core::{EntityId, GeoPoint, Timestamp, parse_timestamp};

use crate::FixError;

/// A fix as received from ingestion, before validation.
///
/// Every field defaults so that a record missing a field surfaces as a
/// [`FixError`] rather than a deserialization failure.  An empty CSV cell
/// reads as `None`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RawFix {
    #[serde(default)]
    pub entity_id: String,
    #[serde(default)]
    pub lat:       Option<f64>,
    #[serde(default)]
    pub lon:       Option<f64>,
    #[serde(default)]
    pub timestamp: String,
}

impl RawFix {
    pub fn new(
        entity_id: impl Into<String>,
        lat: Option<f64>,
        lon: Option<f64>,
        timestamp: impl Into<String>,
    ) -> Self {
        Self { entity_id: entity_id.into(), lat, lon, timestamp: timestamp.into() }
    }
}

/// A validated fix.
///
/// `position` is `Some` only when the raw fix carried both coordinates and
/// they are finite and within WGS-84 ranges.  Any other fix still advances
/// the entity's clock, so only position-based rules are skipped.
#[derive(Clone, Debug, PartialEq)]
pub struct GpsFix {
    pub entity:    EntityId,
    pub position:  Option<GeoPoint>,
    pub timestamp: Timestamp,
}

impl GpsFix {
    pub fn new(entity: EntityId, position: Option<GeoPoint>, timestamp: Timestamp) -> Self {
        Self { entity, position, timestamp }
    }
}

impl TryFrom<RawFix> for GpsFix {
    type Error = FixError;

    fn try_from(raw: RawFix) -> Result<Self, FixError> {
        let entity = EntityId::new(&raw.entity_id).ok_or(FixError::MissingEntity)?;

        let timestamp = parse_timestamp(&raw.timestamp).map_err(|source| FixError::BadTimestamp {
            entity: entity.to_string(),
            source,
        })?;

        let position = match (raw.lat, raw.lon) {
            (Some(lat), Some(lon)) => {
                let point = GeoPoint::new(lat, lon);
                if point.is_valid() {
                    Some(point)
                } else {
                    warn!(%entity, lat, lon, "coordinate out of range; treating fix as position-less");
                    None
                }
            }
            _ => None,
        };

        Ok(GpsFix { entity, position, timestamp })
    }
}
