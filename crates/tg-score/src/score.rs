//! Weighted, normalized safety score.

use tg_core::Anomaly;

use crate::AnomalyEvent;

/// Highest weight in the table; the per-event normalizer.
pub const MAX_WEIGHT: u32 = 5;

/// Risk weight of one anomaly.  Labels outside the table weigh 1.
pub fn weight(anomaly: &Anomaly) -> u32 {
    match anomaly {
        Anomaly::StationaryTooLong   => 1,
        Anomaly::ExcessiveSpeed      => 2,
        Anomaly::RestrictedZoneEntry => 5,
        Anomaly::RouteDeviation      => 3,
        Anomaly::SignalDrop          => 2,
        Anomaly::GeofenceExit | Anomaly::Other(_) => 1,
    }
}

/// Reduce an entity's event history to a score in `[0, 100]`.
///
/// 100 means no evidence of risk (including the empty history).  An event
/// whose weights sum past [`MAX_WEIGHT`] can push the ratio over 1, so the
/// result is clamped at 0.
pub fn safety_score<'a, I>(events: I) -> f64
where
    I: IntoIterator<Item = &'a AnomalyEvent>,
{
    let (count, total_risk) = events.into_iter().fold((0u64, 0u64), |(n, risk), e| {
        let event_risk: u64 = e.anomalies.iter().map(|a| weight(a) as u64).sum();
        (n + 1, risk + event_risk)
    });

    if count == 0 {
        return 100.0;
    }

    let max_possible = (count * MAX_WEIGHT as u64) as f64;
    (100.0 - 100.0 * total_risk as f64 / max_possible).max(0.0)
}
