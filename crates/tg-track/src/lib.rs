//! `tg-track` — per-entity track state.
//!
//! # Crate layout
//!
//! | Module    | Contents                                                    |
//! |-----------|-------------------------------------------------------------|
//! | [`state`] | `TrackState`, `TrackedPosition` — one entity's last fix     |
//! | [`store`] | `TrackStore` — sharded `EntityId → TrackState` map          |
//!
//! # Serialization model
//!
//! Rule evaluation reads an entity's prior state and then writes the new
//! one.  [`TrackStore::with_state`] runs that read-modify-write while holding
//! the entity's shard lock, so two fixes for the same entity can never
//! interleave.  Entities on different shards proceed in parallel.
//!
//! # Cargo features
//!
//! | Feature   | Effect                                                    |
//! |-----------|-----------------------------------------------------------|
//! | `fx-hash` | FxHash instead of SipHash for shard maps and selection.   |

pub mod state;
pub mod store;


pub use state::{TrackState, TrackedPosition};
pub use store::{DEFAULT_SHARDS, TrackStore};
