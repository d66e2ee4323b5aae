//! Aging bucket domain models.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::constants::{ESCALATION_SCHEME, STANDARD_SCHEME};
use crate::{Error, Result};

/// A named, inclusive range over days overdue. `None` bounds are open.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgingBucket {
    pub name: String,
    pub min_days: Option<i64>,
    pub max_days: Option<i64>,
}

impl AgingBucket {
    pub fn new(name: impl Into<String>, min_days: Option<i64>, max_days: Option<i64>) -> Self {
        Self {
            name: name.into(),
            min_days,
            max_days,
        }
    }

    /// Inclusive range check against both bounds.
    pub fn contains(&self, days_overdue: i64) -> bool {
        self.min_days.map_or(true, |min| days_overdue >= min)
            && self.max_days.map_or(true, |max| days_overdue <= max)
    }
}

/// Unvalidated scheme shape, as found in configuration files.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemeDefinition {
    pub name: String,
    pub buckets: Vec<AgingBucket>,
}

/// An ordered, validated partition of days overdue into buckets.
///
/// Construction guarantees that the buckets are contiguous, that the first
/// one starts at or below day 0 and that the last one is open-ended, so
/// every non-negative day count maps to exactly one bucket. The first bucket
/// also absorbs negative counts (invoices not yet due).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SchemeDefinition", into = "SchemeDefinition")]
pub struct BucketScheme {
    name: String,
    buckets: Vec<AgingBucket>,
}

impl BucketScheme {
    pub fn new(name: impl Into<String>, buckets: Vec<AgingBucket>) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(Error::InvalidScheme("scheme name cannot be empty".to_string()));
        }
        if buckets.is_empty() {
            return Err(Error::InvalidScheme(format!(
                "scheme '{}' has no buckets",
                name
            )));
        }

        let mut seen = HashSet::new();
        for (index, bucket) in buckets.iter().enumerate() {
            if !seen.insert(bucket.name.as_str()) {
                return Err(Error::InvalidScheme(format!(
                    "scheme '{}' repeats bucket '{}'",
                    name, bucket.name
                )));
            }
            if let (Some(min), Some(max)) = (bucket.min_days, bucket.max_days) {
                if min > max {
                    return Err(Error::InvalidScheme(format!(
                        "bucket '{}' has min {} above max {}",
                        bucket.name, min, max
                    )));
                }
            }

            if index == 0 {
                if bucket.min_days.is_some_and(|min| min > 0) {
                    return Err(Error::InvalidScheme(format!(
                        "first bucket '{}' must start at or below day 0",
                        bucket.name
                    )));
                }
                continue;
            }

            let previous = &buckets[index - 1];
            let expected_min = previous.max_days.map(|max| max + 1);
            if expected_min.is_none() || bucket.min_days != expected_min {
                return Err(Error::InvalidScheme(format!(
                    "bucket '{}' must start the day after '{}' ends",
                    bucket.name, previous.name
                )));
            }
        }

        if buckets.last().is_some_and(|last| last.max_days.is_some()) {
            return Err(Error::InvalidScheme(format!(
                "last bucket of scheme '{}' must be open-ended",
                name
            )));
        }

        Ok(Self { name, buckets })
    }

    /// 0-30 / 31-60 / 61-90 / 91+.
    pub fn standard() -> Self {
        Self {
            name: STANDARD_SCHEME.to_string(),
            buckets: vec![
                AgingBucket::new("0-30", Some(0), Some(30)),
                AgingBucket::new("31-60", Some(31), Some(60)),
                AgingBucket::new("61-90", Some(61), Some(90)),
                AgingBucket::new("91+", Some(91), None),
            ],
        }
    }

    /// 0-20 / 21-30 / 31-45 / 46-90 / 91+, used by the escalation view.
    pub fn escalation() -> Self {
        Self {
            name: ESCALATION_SCHEME.to_string(),
            buckets: vec![
                AgingBucket::new("0-20", Some(0), Some(20)),
                AgingBucket::new("21-30", Some(21), Some(30)),
                AgingBucket::new("31-45", Some(31), Some(45)),
                AgingBucket::new("46-90", Some(46), Some(90)),
                AgingBucket::new("91+", Some(91), None),
            ],
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn buckets(&self) -> &[AgingBucket] {
        &self.buckets
    }

    pub fn bucket(&self, name: &str) -> Option<&AgingBucket> {
        self.buckets.iter().find(|b| b.name == name)
    }

    /// First bucket, in ascending order, whose inclusive range holds
    /// `days_overdue`.
    ///
    /// Days below the first bucket's lower bound (future due dates) land in
    /// the first bucket.
    pub fn bucket_for(&self, days_overdue: i64) -> (usize, &AgingBucket) {
        self.buckets
            .iter()
            .enumerate()
            .find(|(_, bucket)| bucket.contains(days_overdue))
            .unwrap_or((0, &self.buckets[0]))
    }
}

impl TryFrom<SchemeDefinition> for BucketScheme {
    type Error = Error;

    fn try_from(value: SchemeDefinition) -> Result<Self> {
        BucketScheme::new(value.name, value.buckets)
    }
}

impl From<BucketScheme> for SchemeDefinition {
    fn from(value: BucketScheme) -> Self {
        SchemeDefinition {
            name: value.name,
            buckets: value.buckets,
        }
    }
}

/// Days overdue of one due date and the bucket it falls in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgingClassification {
    pub days_overdue: i64,
    pub bucket: String,
    pub bucket_index: usize,
}
