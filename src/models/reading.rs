use chrono::{NaiveDate, NaiveDateTime, Timelike};
use serde::{Serialize, Serializer};

use crate::utils::constants::TIMESTAMP_OUTPUT_FORMAT;

/// One validated consumption data point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnergyReading {
    #[serde(serialize_with = "serialize_timestamp")]
    pub timestamp: NaiveDateTime,
    pub kwh: f64,
    pub source: String,
}

impl EnergyReading {
    pub fn new(timestamp: NaiveDateTime, kwh: f64, source: impl Into<String>) -> Self {
        Self {
            timestamp,
            kwh,
            source: source.into(),
        }
    }

    /// Calendar day of the reading, midnight boundary of its own wall clock
    pub fn day(&self) -> NaiveDate {
        self.timestamp.date()
    }

    /// Timestamp truncated to the start of its hour
    pub fn hour(&self) -> NaiveDateTime {
        self.timestamp
            .with_minute(0)
            .and_then(|t| t.with_second(0))
            .and_then(|t| t.with_nanosecond(0))
            .unwrap_or(self.timestamp)
    }
}

fn serialize_timestamp<S: Serializer>(
    timestamp: &NaiveDateTime,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.collect_str(&timestamp.format(TIMESTAMP_OUTPUT_FORMAT))
}
