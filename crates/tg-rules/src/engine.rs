//! The rule pass and the engine that serializes it per entity.

use std::collections::HashMap;
use std::time::Duration;

use tracing::debug;

use tg_core::{Anomaly, EntityId, elapsed_secs, speed_mps};
use tg_track::{TrackState, TrackStore};
use tg_zones::{RouteProvider, RoutePolyline, ZoneConfig, ZoneSet, resolve_route};

use crate::{GpsFix, Thresholds};

/// Two positions closer than this count as "the same place".
pub const STATIONARY_RADIUS_M: f64 = 5.0;

// ── RuleSet ───────────────────────────────────────────────────────────────────

/// Immutable configuration shared by every evaluation.
#[derive(Debug, Default)]
pub struct RuleSet {
    pub thresholds: Thresholds,
    pub zones:      ZoneSet,
    /// Empty disables route-deviation checking.
    pub route:      RoutePolyline,
}

impl RuleSet {
    pub fn new(thresholds: Thresholds, zones: ZoneSet, route: RoutePolyline) -> Self {
        Self { thresholds, zones, route }
    }

    /// Build from a loaded zone file, resolving its route endpoints (if any)
    /// through `provider`.  Resolution fails soft to an empty route.
    pub async fn resolve<P: RouteProvider>(
        thresholds: Thresholds,
        config:     ZoneConfig,
        provider:   &P,
        timeout:    Duration,
    ) -> Self {
        let route = match config.route {
            Some(endpoints) => resolve_route(provider, endpoints, timeout).await,
            None            => RoutePolyline::empty(),
        };
        Self::new(thresholds, config.zones, route)
    }
}

// ── Rule pass ─────────────────────────────────────────────────────────────────

/// Evaluate one fix against `state`, updating it in place.
///
/// Labels come back in rule order.  The caller must hold exclusive access to
/// `state` for the whole call and must already have snapped the position.
pub fn evaluate_with(fix: &GpsFix, rules: &RuleSet, state: &mut TrackState) -> Vec<Anomaly> {
    let th = &rules.thresholds;
    let mut anomalies = Vec::new();

    if let Some(prev) = state.last_update {
        if elapsed_secs(prev, fix.timestamp) > th.signal_drop_seconds {
            anomalies.push(Anomaly::SignalDrop);
        }
    }
    state.touch(fix.timestamp);

    let Some(point) = fix.position else {
        return anomalies;
    };

    if let Some(prev) = state.last_position {
        let moved = prev.point.distance_m(point);
        if moved < STATIONARY_RADIUS_M
            && elapsed_secs(prev.at, fix.timestamp) > th.stationary_too_long_seconds
        {
            anomalies.push(Anomaly::StationaryTooLong);
        }

        if speed_mps(prev.point, point, prev.at, fix.timestamp) > th.max_speed_mps {
            anomalies.push(Anomaly::ExcessiveSpeed);
        }
    }

    if rules.zones.first_restricted_hit(point).is_some() {
        anomalies.push(Anomaly::RestrictedZoneEntry);
    }

    if rules.zones.outside_all_allowed(point) {
        anomalies.push(Anomaly::GeofenceExit);
    }

    if rules
        .route
        .deviation_m(point)
        .is_some_and(|d| d > th.max_route_deviation_meters)
    {
        anomalies.push(Anomaly::RouteDeviation);
    }

    state.record_position(point, fix.timestamp);
    anomalies
}

// ── RuleEngine ────────────────────────────────────────────────────────────────

/// A [`RuleSet`] plus the track store it evaluates against.
///
/// Evaluation for one entity runs under that entity's shard lock, so
/// concurrent fixes for the same entity are applied one at a time.
#[derive(Debug)]
pub struct RuleEngine {
    rules: RuleSet,
    store: TrackStore,
}

impl RuleEngine {
    pub fn new(rules: RuleSet) -> Self {
        Self::with_store(rules, TrackStore::new())
    }

    pub fn with_store(rules: RuleSet, store: TrackStore) -> Self {
        Self { rules, store }
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn store(&self) -> &TrackStore {
        &self.store
    }

    pub fn evaluate(&self, fix: &GpsFix) -> Vec<Anomaly> {
        let anomalies = self
            .store
            .with_state(&fix.entity, |state| evaluate_with(fix, &self.rules, state));

        if !anomalies.is_empty() {
            debug!(entity = %fix.entity, at = %fix.timestamp, ?anomalies, "anomalies detected");
        }
        anomalies
    }

    /// Evaluate many fixes; `result[i]` belongs to `fixes[i]`.
    ///
    /// Fixes of one entity are applied in slice order.  Different entities
    /// are independent and, with the `parallel` feature, run on Rayon.
    pub fn evaluate_batch(&self, fixes: &[GpsFix]) -> Vec<Vec<Anomaly>> {
        let groups = group_by_entity(fixes);

        #[cfg(not(feature = "parallel"))]
        let evaluated: Vec<Vec<(usize, Vec<Anomaly>)>> = groups
            .iter()
            .map(|indices| indices.iter().map(|&i| (i, self.evaluate(&fixes[i]))).collect())
            .collect();

        #[cfg(feature = "parallel")]
        let evaluated: Vec<Vec<(usize, Vec<Anomaly>)>> = {
            use rayon::prelude::*;

            groups
                .par_iter()
                .map(|indices| indices.iter().map(|&i| (i, self.evaluate(&fixes[i]))).collect())
                .collect()
        };

        let mut results = vec![Vec::new(); fixes.len()];
        for (i, anomalies) in evaluated.into_iter().flatten() {
            results[i] = anomalies;
        }
        results
    }
}

/// Fix indices per entity, in first-appearance order.
fn group_by_entity(fixes: &[GpsFix]) -> Vec<Vec<usize>> {
    let mut slot_of: HashMap<&EntityId, usize> = HashMap::new();
    let mut groups: Vec<Vec<usize>> = Vec::new();

    for (i, fix) in fixes.iter().enumerate() {
        let slot = *slot_of.entry(&fix.entity).or_insert_with(|| {
            groups.push(Vec::new());
            groups.len() - 1
        });
        groups[slot].push(i);
    }
    groups
}
