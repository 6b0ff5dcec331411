//! `tg-rules` — turns validated fixes into anomaly labels.
//!
//! # Per-fix pipeline
//!
//! ```text
//! RawFix ──validate──▶ GpsFix ──snap (off-lock, bounded)──▶ GpsFix'
//!                                                             │
//!        ┌────────────── entity's shard lock held ────────────┤
//!        │ ① Signal Drop            (always; touches last_update)
//!        │ ② Stationary Too Long    ┐
//!        │ ③ Excessive Speed        │
//!        │ ④ Restricted Zone Entry  │ only when the fix has a position
//!        │ ⑤ Geofence Exit          │
//!        │ ⑥ Route Deviation        │
//!        │ ⑦ record position        ┘
//!        └────────────────────────────────────────────────────┤
//!                                                             ▼
//!                               Vec<Anomaly> ──▶ EventLog + EventSinks
//! ```
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                     |
//! |------------|------------------------------------------------------------|
//! | `parallel` | `RuleEngine::evaluate_batch` runs entities on Rayon.       |
//! | `fx-hash`  | FxHash in the track store.                                 |

pub mod engine;
pub mod error;
pub mod fix;
pub mod monitor;
pub mod thresholds;

#[cfg(test)]
mod tests;

pub use engine::{RuleEngine, RuleSet, STATIONARY_RADIUS_M, evaluate_with};
pub use error::{FixError, RulesError, RulesResult};
pub use fix::{GpsFix, RawFix};
pub use monitor::{Monitor, MonitorConfig};
pub use thresholds::Thresholds;
