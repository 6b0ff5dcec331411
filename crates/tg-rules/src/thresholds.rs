//! Rule thresholds.
//!
//! # JSON format
//!
//! All four fields are required; unknown fields are rejected.  A thresholds
//! file replaces the defaults wholesale.
//!
//! ```json
//! {
//!   "stationary_too_long_seconds": 300,
//!   "max_speed_mps": 15.0,
//!   "signal_drop_seconds": 900,
//!   "max_route_deviation_meters": 200
//! }
//! ```

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{RulesError, RulesResult};

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Thresholds {
    /// Minimum gap between two near-identical positions that counts as stationary.
    pub stationary_too_long_seconds: f64,
    pub max_speed_mps:               f64,
    /// Silence longer than this before a fix is a signal drop.
    pub signal_drop_seconds:         f64,
    pub max_route_deviation_meters:  f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            stationary_too_long_seconds: 300.0,
            max_speed_mps:               15.0,
            signal_drop_seconds:         900.0,
            max_route_deviation_meters:  200.0,
        }
    }
}

impl Thresholds {
    /// Load and validate a thresholds file.
    pub fn load(path: &Path) -> RulesResult<Self> {
        Self::from_reader(BufReader::new(File::open(path)?))
    }

    /// Like [`load`][Self::load] but accepts any `Read` source.
    pub fn from_reader<R: Read>(reader: R) -> RulesResult<Self> {
        let thresholds: Thresholds = serde_json::from_reader(reader)?;
        thresholds.validate()?;
        Ok(thresholds)
    }

    pub fn validate(&self) -> RulesResult<()> {
        let fields = [
            ("stationary_too_long_seconds", self.stationary_too_long_seconds),
            ("max_speed_mps",               self.max_speed_mps),
            ("signal_drop_seconds",         self.signal_drop_seconds),
            ("max_route_deviation_meters",  self.max_route_deviation_meters),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(RulesError::InvalidThreshold { name, value });
            }
        }
        Ok(())
    }
}
