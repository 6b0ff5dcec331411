//! `tg-score` — anomaly event history and the safety score.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                      |
//! |------------|---------------------------------------------------------------|
//! | [`event`]  | `AnomalyEvent`                                                |
//! | [`score`]  | Weight table, `safety_score`                                  |
//! | [`log`]    | `EventLog` (per-entity history), `RecordPolicy`               |
//! | [`sink`]   | `EventSink`, the hand-off to downstream collaborators         |
//! | [`csv`]    | `CsvEventSink`, `load_events_csv`, `load_events_reader`       |
//! | [`error`]  | `ScoreError`, `ScoreResult<T>`                                |
//!
//! # Score model (summary)
//!
//! ```text
//! total_risk   = Σ events Σ anomalies weight(label)
//! max_possible = event_count × MAX_WEIGHT
//! score        = max(0, 100 − 100 × total_risk / max_possible)     (100 if no events)
//! ```

pub mod csv;
pub mod error;
pub mod event;
pub mod log;
pub mod score;
pub mod sink;


pub use self::csv::{CsvEventSink, load_events_csv, load_events_reader};
pub use error::{ScoreError, ScoreResult};
pub use event::AnomalyEvent;
pub use log::{EventLog, RecordPolicy};
pub use score::{MAX_WEIGHT, safety_score, weight};
pub use sink::EventSink;
