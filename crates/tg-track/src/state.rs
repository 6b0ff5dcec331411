//! Per-entity track state.

use tg_core::{GeoPoint, Timestamp};

/// A position together with the instant it was observed.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TrackedPosition {
    pub point: GeoPoint,
    pub at:    Timestamp,
}

/// The minimal memory of one entity: its last known position and the time
/// of its last fix.
///
/// The two are tracked separately because a fix without coordinates still
/// counts as a sign of life (it advances `last_update`) but says nothing
/// about where the entity is (it leaves `last_position` alone).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TrackState {
    /// Last position recorded for the entity, if any fix carried one.
    pub last_position: Option<TrackedPosition>,

    /// Timestamp of the last fix of any kind.
    pub last_update: Option<Timestamp>,
}

impl TrackState {
    /// `true` until the first fix has been recorded.
    #[inline]
    pub fn is_new(&self) -> bool {
        self.last_update.is_none() && self.last_position.is_none()
    }

    /// Record that a fix arrived at `at`, with or without a position.
    #[inline]
    pub fn touch(&mut self, at: Timestamp) {
        self.last_update = Some(at);
    }

    /// Record `point` as the entity's position at `at`.
    #[inline]
    pub fn record_position(&mut self, point: GeoPoint, at: Timestamp) {
        self.last_position = Some(TrackedPosition { point, at });
    }
}
