//! CSV event export and import.
//!
//! # CSV format
//!
//! One row per recorded event.  `anomalies` holds the labels in evaluation
//! order, joined with `|`; an empty field is an event with no anomalies.
//!
//! ```csv
//! entity_id,timestamp,anomalies
//! T1,2024-01-01T00:00:00Z,Restricted Zone Entry
//! T1,2024-01-01T00:13:20Z,Stationary Too Long|Route Deviation
//! ```

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use std::sync::{Mutex, PoisonError};

use csv::Writer;
use serde::Deserialize;

use tg_core::{Anomaly, CoreError, EntityId, format_timestamp, parse_timestamp};

use crate::{AnomalyEvent, EventSink, ScoreError, ScoreResult};

const HEADER: [&str; 3] = ["entity_id", "timestamp", "anomalies"];

// ── Export ────────────────────────────────────────────────────────────────────

struct Inner<W: Write> {
    writer:     Writer<W>,
    last_error: Option<ScoreError>,
    finished:   bool,
}

/// An [`EventSink`] that appends every published event to a CSV stream.
///
/// Write errors are stored internally because `publish` has no return value.
/// Check them with [`take_error`][Self::take_error] once the run is over.
pub struct CsvEventSink<W: Write> {
    inner: Mutex<Inner<W>>,
}

impl CsvEventSink<File> {
    /// Create (or truncate) `path` and write the header row.
    pub fn from_path(path: &Path) -> ScoreResult<Self> {
        Self::from_writer(File::create(path)?)
    }
}

impl<W: Write> CsvEventSink<W> {
    pub fn from_writer(out: W) -> ScoreResult<Self> {
        let mut writer = Writer::from_writer(out);
        writer.write_record(HEADER)?;
        Ok(Self {
            inner: Mutex::new(Inner { writer, last_error: None, finished: false }),
        })
    }

    /// Take the first stored write error, if any.
    pub fn take_error(&self) -> Option<ScoreError> {
        self.lock().last_error.take()
    }

    /// Flush the underlying stream.  Idempotent.
    pub fn finish(&self) -> ScoreResult<()> {
        let mut inner = self.lock();
        if inner.finished {
            return Ok(());
        }
        inner.finished = true;
        inner.writer.flush()?;
        Ok(())
    }

    /// Flush and return the underlying stream.
    pub fn into_inner(self) -> ScoreResult<W> {
        let inner = self.inner.into_inner().unwrap_or_else(PoisonError::into_inner);
        inner.writer.into_inner().map_err(|e| {
            let err = e.error();
            ScoreError::Io(std::io::Error::new(err.kind(), err.to_string()))
        })
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner<W>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<W: Write + Send> EventSink for CsvEventSink<W> {
    fn publish(&self, event: &AnomalyEvent) {
        let timestamp = format_timestamp(event.timestamp);
        let labels = event.joined_labels();

        let mut inner = self.lock();
        let result = inner
            .writer
            .write_record([event.entity.as_str(), timestamp.as_str(), labels.as_str()]);
        if let Err(e) = result {
            tracing::warn!(entity = %event.entity, error = %e, "failed to export anomaly event");
            // Keep only the first error.
            if inner.last_error.is_none() {
                inner.last_error = Some(e.into());
            }
        }
    }
}

// ── Import ────────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct EventRecord {
    entity_id: String,
    timestamp: String,
    #[serde(default)]
    anomalies: String,
}

/// Load a previously exported event history from a CSV file.
pub fn load_events_csv(path: &Path) -> ScoreResult<Vec<AnomalyEvent>> {
    load_events_reader(File::open(path)?)
}

/// Like [`load_events_csv`] but accepts any `Read` source.
///
/// Labels outside the built-in set are kept as [`Anomaly::Other`].
pub fn load_events_reader<R: Read>(reader: R) -> ScoreResult<Vec<AnomalyEvent>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut events = Vec::new();

    for (i, result) in csv_reader.deserialize::<EventRecord>().enumerate() {
        let row = result?;
        // Header is line 1.
        let line = i as u64 + 2;

        let entity = EntityId::new(&row.entity_id).ok_or_else(|| ScoreError::Record {
            line,
            source: CoreError::Parse("empty entity_id".into()),
        })?;
        let timestamp = parse_timestamp(&row.timestamp)
            .map_err(|source| ScoreError::Record { line, source })?;
        let anomalies = row
            .anomalies
            .split('|')
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(Anomaly::from_label)
            .collect();

        events.push(AnomalyEvent::new(entity, timestamp, anomalies));
    }

    Ok(events)
}
