//! Aging reports built from a record snapshot: per-bucket summary, bucket
//! drill-down and headline KPIs.
//!
//! Records whose due date cannot be normalized are excluded from every figure
//! here (numerators and denominators alike) and only reported as a count.

use chrono::NaiveDate;
use log::debug;
use rust_decimal::{Decimal, RoundingStrategy};

use super::metrics_calculator::Tally;
use super::metrics_model::{
    AgedReceivable, AgingSummary, BucketDetail, BucketMetrics, DashboardKpis,
};
use crate::aging::{classify_receivable, AgingClassification, BucketScheme};
use crate::constants::DISPLAY_DECIMAL_PRECISION;
use crate::errors::ValidationError;
use crate::receivables::Receivable;
use crate::{Error, Result};

fn classify_all<'a>(
    records: &'a [Receivable],
    scheme: &BucketScheme,
    as_of: NaiveDate,
) -> Vec<(&'a Receivable, AgingClassification)> {
    records
        .iter()
        .filter_map(|record| classify_receivable(record, as_of, scheme).map(|c| (record, c)))
        .collect()
}

/// Summarizes `records` per bucket of `scheme` as of `as_of`.
pub fn build_aging_summary(
    records: &[Receivable],
    scheme: &BucketScheme,
    as_of: NaiveDate,
) -> AgingSummary {
    let classified = classify_all(records, scheme, as_of);
    let total = Tally::over(classified.iter().map(|(record, _)| *record));

    let buckets = scheme
        .buckets()
        .iter()
        .enumerate()
        .map(|(index, bucket)| {
            let subset = Tally::over(
                classified
                    .iter()
                    .filter(|(_, c)| c.bucket_index == index)
                    .map(|(record, _)| *record),
            );
            BucketMetrics {
                bucket: bucket.clone(),
                metrics: subset.snapshot_against(&total),
            }
        })
        .collect();

    let excluded_count = records.len() - classified.len();
    debug!(
        "Aging summary for scheme '{}' as of {}: {} classified, {} excluded",
        scheme.name(),
        as_of,
        classified.len(),
        excluded_count
    );

    AgingSummary {
        scheme: scheme.name().to_string(),
        as_of,
        buckets,
        total: total.snapshot_against(&total),
        excluded_count,
    }
}

/// Metrics and rows of the bucket named `bucket_name`.
pub fn bucket_detail(
    records: &[Receivable],
    scheme: &BucketScheme,
    bucket_name: &str,
    as_of: NaiveDate,
) -> Result<BucketDetail> {
    let bucket = scheme.bucket(bucket_name).ok_or_else(|| {
        Error::Validation(ValidationError::UnknownBucket {
            scheme: scheme.name().to_string(),
            bucket: bucket_name.to_string(),
        })
    })?;

    let classified = classify_all(records, scheme, as_of);
    let total = Tally::over(classified.iter().map(|(record, _)| *record));

    let mut rows: Vec<AgedReceivable> = classified
        .into_iter()
        .filter(|(_, c)| c.bucket == bucket.name)
        .map(|(record, c)| AgedReceivable {
            normalized_balance: record.normalized_open_balance(),
            receivable: record.clone(),
            days_overdue: c.days_overdue,
            bucket: c.bucket,
        })
        .collect();
    rows.sort_by(|a, b| {
        b.days_overdue
            .cmp(&a.days_overdue)
            .then_with(|| a.receivable.id.cmp(&b.receivable.id))
    });

    let subset = Tally::over(rows.iter().map(|row| &row.receivable));

    Ok(BucketDetail {
        scheme: scheme.name().to_string(),
        as_of,
        bucket: bucket.clone(),
        metrics: subset.snapshot_against(&total),
        rows,
    })
}

/// Headline figures: open balance, past-due exposure and weighted age.
pub fn dashboard_kpis(records: &[Receivable], as_of: NaiveDate) -> DashboardKpis {
    // The scheme does not matter here, only days overdue is used.
    let scheme = BucketScheme::standard();
    let classified = classify_all(records, &scheme, as_of);

    let total = Tally::over(classified.iter().map(|(record, _)| *record));
    let past_due = Tally::over(
        classified
            .iter()
            .filter(|(_, c)| c.days_overdue > 0)
            .map(|(record, _)| *record),
    );

    let (weighted_days, weight) = classified.iter().fold(
        (Decimal::ZERO, Decimal::ZERO),
        |(weighted_days, weight), (record, c)| {
            let balance = record.normalized_open_balance();
            if balance <= Decimal::ZERO {
                return (weighted_days, weight);
            }
            let days = Decimal::from(c.days_overdue.max(0));
            (
                weighted_days.saturating_add(balance.saturating_mul(days)),
                weight.saturating_add(balance),
            )
        },
    );
    let average_days_overdue = weighted_days
        .checked_div(weight)
        .unwrap_or(Decimal::ZERO)
        .round_dp_with_strategy(
            DISPLAY_DECIMAL_PRECISION,
            RoundingStrategy::MidpointAwayFromZero,
        );

    DashboardKpis {
        as_of,
        record_count: total.count,
        total_open_balance: total.balance,
        past_due_count: past_due.count,
        past_due_balance: past_due.balance,
        average_days_overdue,
        excluded_count: records.len() - classified.len(),
    }
}
