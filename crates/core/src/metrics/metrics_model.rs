//! Derived metric models. None of these are persisted; they are recomputed
//! from a record snapshot whenever the records or the as-of date change.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::aging::AgingBucket;
use crate::receivables::Receivable;

/// Count and balance of a record subset, relative to the full collection.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricSnapshot {
    pub record_count: usize,
    pub summed_balance: Decimal,
    pub percent_of_total_count: Decimal,
    pub percent_of_total_balance: Decimal,
}

/// Metrics of one bucket of a scheme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BucketMetrics {
    pub bucket: AgingBucket,
    pub metrics: MetricSnapshot,
}

/// Per-bucket breakdown of a record collection under one scheme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgingSummary {
    pub scheme: String,
    pub as_of: NaiveDate,
    /// One entry per bucket, in scheme order, empty buckets included.
    pub buckets: Vec<BucketMetrics>,
    pub total: MetricSnapshot,
    /// Records left out because their due date could not be read.
    pub excluded_count: usize,
}

/// A receivable together with its aging.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgedReceivable {
    #[serde(flatten)]
    pub receivable: Receivable,
    pub days_overdue: i64,
    pub bucket: String,
    pub normalized_balance: Decimal,
}

/// Metrics and rows of a single bucket (drill-down grid).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BucketDetail {
    pub scheme: String,
    pub as_of: NaiveDate,
    pub bucket: AgingBucket,
    pub metrics: MetricSnapshot,
    /// Most overdue first.
    pub rows: Vec<AgedReceivable>,
}

/// Headline figures for the dashboard tiles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardKpis {
    pub as_of: NaiveDate,
    pub record_count: usize,
    pub total_open_balance: Decimal,
    pub past_due_count: usize,
    pub past_due_balance: Decimal,
    /// Balance-weighted days overdue; not-yet-due records count as 0 days.
    pub average_days_overdue: Decimal,
    pub excluded_count: usize,
}
