//! Per-entity anomaly history.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tg_core::{Anomaly, EntityId};

use crate::{AnomalyEvent, EventSink, safety_score};

/// Which processed fixes become history events.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum RecordPolicy {
    /// Only fixes that produced at least one anomaly.
    #[default]
    AnomalousOnly,
    /// Every processed fix, including clean ones.  Clean events dilute the
    /// risk ratio, so scores recover as an entity behaves normally.
    EveryFix,
}

impl RecordPolicy {
    #[inline]
    pub fn should_record(self, anomalies: &[Anomaly]) -> bool {
        match self {
            RecordPolicy::AnomalousOnly => !anomalies.is_empty(),
            RecordPolicy::EveryFix      => true,
        }
    }
}

/// Append-only event history, keyed by entity.
///
/// Events for one entity keep their insertion order.  Safe to share between
/// tasks; every method takes `&self`.
#[derive(Debug, Default)]
pub struct EventLog {
    events: Mutex<HashMap<EntityId, Vec<AnomalyEvent>>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, event: AnomalyEvent) {
        self.lock().entry(event.entity.clone()).or_default().push(event);
    }

    /// Snapshot of one entity's history (empty if never recorded).
    pub fn events(&self, entity: &EntityId) -> Vec<AnomalyEvent> {
        self.lock().get(entity).cloned().unwrap_or_default()
    }

    pub fn event_count(&self, entity: &EntityId) -> usize {
        self.lock().get(entity).map_or(0, Vec::len)
    }

    /// Score over the entity's full history; 100 for an unknown entity.
    pub fn safety_score(&self, entity: &EntityId) -> f64 {
        self.lock().get(entity).map_or(100.0, |events| safety_score(events))
    }

    /// Entities with at least one recorded event, sorted.
    pub fn entities(&self) -> Vec<EntityId> {
        let mut ids: Vec<EntityId> = self.lock().keys().cloned().collect();
        ids.sort();
        ids
    }

    /// `(entity, score)` for every entity with history, sorted by entity.
    pub fn scores(&self) -> Vec<(EntityId, f64)> {
        let guard = self.lock();
        let mut out: Vec<(EntityId, f64)> = guard
            .iter()
            .map(|(id, events)| (id.clone(), safety_score(events)))
            .collect();
        out.sort_by(|a, b| a.0.cmp(&b.0));
        out
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<EntityId, Vec<AnomalyEvent>>> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl EventSink for EventLog {
    fn publish(&self, event: &AnomalyEvent) {
        self.record(event.clone());
    }
}
