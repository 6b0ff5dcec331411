//! Async front end: validation, road snapping, evaluation, event recording.

use std::sync::Arc;
use std::time::Duration;

use tracing::warn;

use tg_core::{Anomaly, EntityId};
use tg_score::{AnomalyEvent, EventLog, EventSink, RecordPolicy};
use tg_track::{DEFAULT_SHARDS, TrackStore};
use tg_zones::{DEFAULT_PROVIDER_TIMEOUT, IdentitySnap, RoadSnapProvider, snap_or_identity};

use crate::{FixError, GpsFix, RawFix, RuleEngine, RuleSet};

#[derive(Clone, Debug)]
pub struct MonitorConfig {
    /// Upper bound on each road-snap call.
    pub provider_timeout: Duration,
    pub record_policy:    RecordPolicy,
    pub shard_count:      usize,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            provider_timeout: DEFAULT_PROVIDER_TIMEOUT,
            record_policy:    RecordPolicy::default(),
            shard_count:      DEFAULT_SHARDS,
        }
    }
}

/// Owns the engine, the event history, and the downstream sinks.
///
/// `ingest` takes `&self`; share a monitor between tasks with `Arc`.  The
/// snap call runs before the entity's lock is taken, so two fixes for the
/// same entity ingested concurrently are evaluated in completion order.
/// Callers that need strict per-entity ordering ingest them sequentially.
pub struct Monitor<S: RoadSnapProvider = IdentitySnap> {
    engine: RuleEngine,
    snap:   S,
    config: MonitorConfig,
    log:    EventLog,
    sinks:  Vec<Arc<dyn EventSink>>,
}

impl Monitor<IdentitySnap> {
    /// A monitor that evaluates positions as reported.
    pub fn without_snapping(rules: RuleSet, config: MonitorConfig) -> Self {
        Self::new(rules, IdentitySnap, config)
    }
}

impl<S: RoadSnapProvider> Monitor<S> {
    pub fn new(rules: RuleSet, snap: S, config: MonitorConfig) -> Self {
        let store = TrackStore::with_shards(config.shard_count);
        Self {
            engine: RuleEngine::with_store(rules, store),
            snap,
            config,
            log:    EventLog::new(),
            sinks:  Vec::new(),
        }
    }

    /// Publish every recorded event to `sink` as well.
    pub fn with_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sinks.push(sink);
        self
    }

    pub fn engine(&self) -> &RuleEngine {
        &self.engine
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    pub fn log(&self) -> &EventLog {
        &self.log
    }

    /// Validate and process one raw fix.
    ///
    /// A malformed fix is logged and returned as an error; no state changes.
    pub async fn ingest(&self, raw: RawFix) -> Result<Vec<Anomaly>, FixError> {
        let fix = GpsFix::try_from(raw).inspect_err(|e| warn!(error = %e, "rejected malformed fix"))?;
        Ok(self.ingest_fix(fix).await)
    }

    /// Process one already-validated fix.
    pub async fn ingest_fix(&self, mut fix: GpsFix) -> Vec<Anomaly> {
        if let Some(point) = fix.position {
            fix.position =
                Some(snap_or_identity(&self.snap, point, self.config.provider_timeout).await);
        }

        let anomalies = self.engine.evaluate(&fix);

        if self.config.record_policy.should_record(&anomalies) {
            let event = AnomalyEvent::new(fix.entity, fix.timestamp, anomalies.clone());
            for sink in &self.sinks {
                sink.publish(&event);
            }
            self.log.record(event);
        }
        anomalies
    }

    /// Score over the entity's recorded history; 100 for an unknown entity.
    pub fn safety_score(&self, entity: &EntityId) -> f64 {
        self.log.safety_score(entity)
    }

    pub fn events(&self, entity: &EntityId) -> Vec<AnomalyEvent> {
        self.log.events(entity)
    }
}
