//! Anomaly labels shared by the rule engine and the score aggregator.
//!
//! The display strings are part of the external interface: they are what
//! downstream alerting receives and what persisted event histories contain.
//! Parsing is total: any label this build does not know becomes
//! [`Anomaly::Other`] so histories written by other producers still score.

use std::fmt;
use std::str::FromStr;

/// One detected safety anomaly.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "String", into = "String"))]
pub enum Anomaly {
    /// Gap between consecutive fixes exceeded the signal-drop threshold.
    SignalDrop,
    /// Moved less than 5 m over more than the stationary threshold.
    StationaryTooLong,
    /// Average speed since the previous fix exceeded the limit.
    ExcessiveSpeed,
    /// Position is inside a restricted zone.
    RestrictedZoneEntry,
    /// Position is outside every allowed zone.
    GeofenceExit,
    /// Position is too far from the planned route.
    RouteDeviation,
    /// A label produced elsewhere that this build does not recognise.
    Other(String),
}

impl Anomaly {
    /// Every label the rule engine can emit, in evaluation order.
    pub const BUILTIN: [Anomaly; 6] = [
        Anomaly::SignalDrop,
        Anomaly::StationaryTooLong,
        Anomaly::ExcessiveSpeed,
        Anomaly::RestrictedZoneEntry,
        Anomaly::GeofenceExit,
        Anomaly::RouteDeviation,
    ];

    /// The wire label, e.g. `"Signal Drop"`.
    pub fn as_str(&self) -> &str {
        match self {
            Anomaly::SignalDrop          => "Signal Drop",
            Anomaly::StationaryTooLong   => "Stationary Too Long",
            Anomaly::ExcessiveSpeed      => "Excessive Speed",
            Anomaly::RestrictedZoneEntry => "Restricted Zone Entry",
            Anomaly::GeofenceExit        => "Geofence Exit",
            Anomaly::RouteDeviation      => "Route Deviation",
            Anomaly::Other(label)        => label,
        }
    }

    /// Map a wire label back to a variant; unknown labels become `Other`.
    pub fn from_label(label: &str) -> Anomaly {
        let label = label.trim();
        Anomaly::BUILTIN
            .into_iter()
            .find(|a| a.as_str() == label)
            .unwrap_or_else(|| Anomaly::Other(label.to_owned()))
    }
}

impl fmt::Display for Anomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Anomaly {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Anomaly::from_label(s))
    }
}

impl From<String> for Anomaly {
    fn from(s: String) -> Self {
        Anomaly::from_label(&s)
    }
}

impl From<Anomaly> for String {
    fn from(a: Anomaly) -> String {
        a.as_str().to_owned()
    }
}
