//! Date domain models.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat};
use serde::{Deserialize, Serialize};

/// A due date exactly as it arrived from the accounting source.
///
/// JSON numbers are epoch milliseconds, ISO dates and datetimes are kept
/// typed, anything else (`"3/2/23"`, `"Jun 5, 2025"`, `""`) stays text until
/// it is normalized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawDate {
    Epoch(i64),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    Text(String),
}

impl RawDate {
    /// Textual form used when the value has to be stored as a string.
    ///
    /// The result normalizes back to the same calendar date.
    pub fn as_text(&self) -> String {
        match self {
            RawDate::Epoch(ms) => DateTime::from_timestamp_millis(*ms)
                .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true))
                .unwrap_or_default(),
            RawDate::Date(date) => date.format("%Y-%m-%d").to_string(),
            RawDate::DateTime(dt) => dt.format("%Y-%m-%dT%H:%M:%S").to_string(),
            RawDate::Text(text) => text.clone(),
        }
    }
}

impl From<&str> for RawDate {
    fn from(value: &str) -> Self {
        RawDate::Text(value.to_string())
    }
}

impl From<String> for RawDate {
    fn from(value: String) -> Self {
        RawDate::Text(value)
    }
}

impl From<NaiveDate> for RawDate {
    fn from(value: NaiveDate) -> Self {
        RawDate::Date(value)
    }
}

/// Outcome of normalizing a [`RawDate`].
///
/// `Invalid` is an explicit marker, not an error: callers exclude such
/// records from day-delta computations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NormalizedDate {
    Valid(NaiveDate),
    Invalid,
}

impl NormalizedDate {
    pub fn is_valid(&self) -> bool {
        matches!(self, NormalizedDate::Valid(_))
    }

    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            NormalizedDate::Valid(date) => Some(*date),
            NormalizedDate::Invalid => None,
        }
    }
}

impl From<Option<NaiveDate>> for NormalizedDate {
    fn from(value: Option<NaiveDate>) -> Self {
        value.map_or(NormalizedDate::Invalid, NormalizedDate::Valid)
    }
}
