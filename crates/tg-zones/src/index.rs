//! Zone sets with an R-tree prefilter.
//!
//! # Spatial index
//!
//! Each [`ZoneIndex`] keeps its zones in file order plus an R-tree (via
//! `rstar`) of their `[lat, lon]` bounding boxes.  A containment query first
//! collects the zones whose envelope holds the point (distance 0 to the
//! box, so they lead the nearest-neighbour walk), then runs the exact
//! polygon test over those candidates **in file order**, so "first matching
//! zone" is the same answer a linear scan would give.

use rstar::{AABB, Envelope, PointDistance, RTree, RTreeObject};

use tg_core::GeoPoint;

use crate::{Zone, ZoneKind};

// ── R-tree entry ──────────────────────────────────────────────────────────────

/// Entry stored in the R-tree: a zone's bounding box and its position in the
/// zone list.
#[derive(Clone)]
struct ZoneEntry {
    envelope: AABB<[f64; 2]>,
    slot:     usize,
}

impl RTreeObject for ZoneEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        self.envelope
    }
}

impl PointDistance for ZoneEntry {
    /// Squared degree-space distance from `point` to the bounding box; zero
    /// anywhere inside or on it.
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        Envelope::distance_2(&self.envelope, point)
    }
}

// ── ZoneIndex ─────────────────────────────────────────────────────────────────

/// An ordered list of zones of one kind plus its envelope index.
pub struct ZoneIndex {
    zones: Vec<Zone>,
    tree:  RTree<ZoneEntry>,
}

impl ZoneIndex {
    /// Index `zones`, keeping their order.  Degenerate zones (< 3 vertices)
    /// are retained in the list but never enter the tree, so they never match.
    pub fn new(zones: Vec<Zone>) -> Self {
        let entries: Vec<ZoneEntry> = zones
            .iter()
            .enumerate()
            .filter(|(_, z)| !z.is_degenerate())
            .filter_map(|(slot, z)| {
                let (lo, hi) = z.bounds()?;
                Some(ZoneEntry { envelope: AABB::from_corners(lo, hi), slot })
            })
            .collect();

        Self {
            zones,
            tree: RTree::bulk_load(entries),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    /// The first zone (in list order) that strictly contains `point`.
    pub fn first_containing(&self, point: GeoPoint) -> Option<&Zone> {
        let query = [point.lat, point.lon];
        let mut candidates: Vec<usize> = self
            .tree
            .nearest_neighbor_iter(&query)
            .take_while(|e| e.distance_2(&query) <= 0.0)
            .map(|e| e.slot)
            .collect();
        candidates.sort_unstable();

        candidates
            .into_iter()
            .map(|slot| &self.zones[slot])
            .find(|zone| zone.contains(point))
    }

    /// `true` if any zone strictly contains `point`.
    #[inline]
    pub fn any_contains(&self, point: GeoPoint) -> bool {
        self.first_containing(point).is_some()
    }
}

impl Default for ZoneIndex {
    fn default() -> Self {
        Self::empty()
    }
}

impl std::fmt::Debug for ZoneIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZoneIndex").field("zones", &self.zones).finish()
    }
}

// ── ZoneSet ───────────────────────────────────────────────────────────────────

/// Restricted and allowed zones, loaded once per run.
#[derive(Debug, Default)]
pub struct ZoneSet {
    pub restricted: ZoneIndex,
    pub allowed:    ZoneIndex,
}

impl ZoneSet {
    /// Split `zones` by [`ZoneKind`], preserving order within each kind.
    pub fn new(zones: impl IntoIterator<Item = Zone>) -> Self {
        let (restricted, allowed): (Vec<Zone>, Vec<Zone>) = zones
            .into_iter()
            .partition(|z| z.kind == ZoneKind::Restricted);
        Self {
            restricted: ZoneIndex::new(restricted),
            allowed:    ZoneIndex::new(allowed),
        }
    }

    /// First restricted zone containing `point` (short-circuits).
    #[inline]
    pub fn first_restricted_hit(&self, point: GeoPoint) -> Option<&Zone> {
        self.restricted.first_containing(point)
    }

    /// `true` when at least one allowed zone exists and `point` is inside none
    /// of them.  With no allowed zones configured this is always `false`.
    pub fn outside_all_allowed(&self, point: GeoPoint) -> bool {
        !self.allowed.is_empty() && !self.allowed.any_contains(point)
    }
}
