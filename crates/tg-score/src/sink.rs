//! The `EventSink` trait implemented by every event consumer.

use crate::AnomalyEvent;

/// Receives each recorded [`AnomalyEvent`]: alerting, notarization, export.
///
/// `publish` takes `&self` and has no return value because events are
/// produced from many tasks at once and a slow or failing consumer must not
/// stall rule evaluation.  Implementations that can fail keep the error
/// internally (see [`CsvEventSink::take_error`][crate::CsvEventSink::take_error]).
pub trait EventSink: Send + Sync {
    fn publish(&self, event: &AnomalyEvent);
}
