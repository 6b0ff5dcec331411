//! The unit of anomaly history.

use serde::Serialize;

use tg_core::{Anomaly, EntityId, Timestamp};

/// The anomalies detected for one processed fix.
///
/// Appended to an entity's history and handed to downstream collaborators;
/// never mutated afterwards.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AnomalyEvent {
    pub entity:    EntityId,
    pub timestamp: Timestamp,
    /// In rule-evaluation order; may be empty under
    /// [`RecordPolicy::EveryFix`][crate::RecordPolicy::EveryFix].
    pub anomalies: Vec<Anomaly>,
}

impl AnomalyEvent {
    pub fn new(entity: EntityId, timestamp: Timestamp, anomalies: Vec<Anomaly>) -> Self {
        Self { entity, timestamp, anomalies }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.anomalies.is_empty()
    }

    /// Labels joined with `|`, the format used in CSV exports.
    pub fn joined_labels(&self) -> String {
        self.anomalies
            .iter()
            .map(Anomaly::as_str)
            .collect::<Vec<_>>()
            .join("|")
    }
}
