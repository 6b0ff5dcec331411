//! Sharded, lazily populated per-entity state.

use std::collections::HashMap;
use std::hash::BuildHasher;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tg_core::{EntityId, GeoPoint, Timestamp};

use crate::TrackState;

#[cfg(feature = "fx-hash")]
type Hasher = rustc_hash::FxBuildHasher;
#[cfg(not(feature = "fx-hash"))]
type Hasher = std::collections::hash_map::RandomState;

type Shard = HashMap<EntityId, TrackState, Hasher>;

/// Default shard count.  A power of two comfortably above typical core counts.
pub const DEFAULT_SHARDS: usize = 64;

/// Holds one [`TrackState`] per entity, created on first use and never
/// evicted.
///
/// Entities are spread over a fixed number of shards, each behind its own
/// `Mutex`.  Holding a shard lock serializes every entity on that shard; it
/// never blocks entities on other shards.
pub struct TrackStore {
    shards: Box<[Mutex<Shard>]>,
    hasher: Hasher,
}

impl TrackStore {
    /// Create an empty store with [`DEFAULT_SHARDS`] shards.
    pub fn new() -> Self {
        Self::with_shards(DEFAULT_SHARDS)
    }

    /// Create an empty store with `shards` shards (at least one).
    pub fn with_shards(shards: usize) -> Self {
        let shards = (0..shards.max(1))
            .map(|_| Mutex::new(Shard::with_hasher(Hasher::default())))
            .collect();
        Self {
            shards,
            hasher: Hasher::default(),
        }
    }

    pub fn shard_count(&self) -> usize {
        self.shards.len()
    }

    /// Run `f` on `entity`'s state under its shard lock, creating the state
    /// if this is the entity's first appearance.
    ///
    /// This is the single mutation point for an entity: everything `f` reads
    /// and writes is atomic with respect to other calls for the same entity.
    /// `f` must not block or call back into the store.
    pub fn with_state<T>(&self, entity: &EntityId, f: impl FnOnce(&mut TrackState) -> T) -> T {
        let mut shard = self.lock_shard(entity);
        let state = shard.entry(entity.clone()).or_default();
        f(state)
    }

    /// Snapshot of `entity`'s state, creating an empty record if absent.
    pub fn get_or_create(&self, entity: &EntityId) -> TrackState {
        self.with_state(entity, |s| s.clone())
    }

    /// Snapshot of `entity`'s state without creating one.
    pub fn get(&self, entity: &EntityId) -> Option<TrackState> {
        self.lock_shard(entity).get(entity).cloned()
    }

    /// Record a fix for `entity` at `at`; `position` is stored when present.
    pub fn update(&self, entity: &EntityId, position: Option<GeoPoint>, at: Timestamp) {
        self.with_state(entity, |s| {
            s.touch(at);
            if let Some(p) = position {
                s.record_position(p, at);
            }
        });
    }

    pub fn contains(&self, entity: &EntityId) -> bool {
        self.lock_shard(entity).contains_key(entity)
    }

    /// Number of tracked entities.  Locks each shard in turn, so the figure
    /// is only a snapshot under concurrent use.
    pub fn len(&self) -> usize {
        self.shards.iter().map(|s| lock(s).len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All tracked entity ids, unordered.
    pub fn entities(&self) -> Vec<EntityId> {
        self.shards
            .iter()
            .flat_map(|s| lock(s).keys().cloned().collect::<Vec<_>>())
            .collect()
    }

    fn lock_shard(&self, entity: &EntityId) -> MutexGuard<'_, Shard> {
        let idx = (self.hasher.hash_one(entity) % self.shards.len() as u64) as usize;
        lock(&self.shards[idx])
    }
}

impl Default for TrackStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TrackStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrackStore")
            .field("shards", &self.shards.len())
            .field("entities", &self.len())
            .finish()
    }
}

/// A panic inside a `with_state` closure poisons the shard; the state it
/// guards is still a valid `TrackState`, so keep serving it.
fn lock(shard: &Mutex<Shard>) -> MutexGuard<'_, Shard> {
    shard.lock().unwrap_or_else(PoisonError::into_inner)
}
