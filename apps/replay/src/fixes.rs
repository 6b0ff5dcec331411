//! Fix log loader.
//!
//! # Formats
//!
//! Chosen by extension: `.json` is a JSON array of fix objects, anything
//! else is CSV with a header row.
//!
//! ```csv
//! entity_id,lat,lon,timestamp
//! T1,0.0,0.0,2024-01-01T00:00:00Z
//! T1,,,2024-01-01T00:20:00Z
//! ```
//!
//! Empty `lat`/`lon` cells mean "no position".  Rows that do not parse at
//! all are logged and skipped; field-level validation happens in the monitor.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use anyhow::{Context, Result};
use tracing::warn;

use tg_rules::RawFix;

pub fn load_fixes(path: &Path) -> Result<Vec<RawFix>> {
    let file = File::open(path).with_context(|| format!("opening fix log {}", path.display()))?;
    let reader = BufReader::new(file);

    let is_json = path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        serde_json::from_reader(reader).with_context(|| format!("parsing {}", path.display()))
    } else {
        load_fixes_csv_reader(reader)
    }
}

pub fn load_fixes_csv_reader<R: Read>(reader: R) -> Result<Vec<RawFix>> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut fixes = Vec::new();

    for (i, result) in csv_reader.deserialize::<RawFix>().enumerate() {
        match result {
            Ok(fix) => fixes.push(fix),
            // Header is line 1.
            Err(e) => warn!(line = i + 2, error = %e, "skipping unreadable fix row"),
        }
    }
    Ok(fixes)
}
