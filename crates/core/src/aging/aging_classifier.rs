//! Days-overdue classification of receivables against a bucket scheme.

use chrono::NaiveDate;

use super::aging_model::{AgingClassification, BucketScheme};
use crate::dates::days_between;
use crate::receivables::Receivable;

/// Classifies a due date against `as_of`.
///
/// Days overdue is the floored whole-day delta from `due_date` to `as_of`;
/// negative values (not yet due) land in the scheme's first bucket.
pub fn classify(due_date: NaiveDate, as_of: NaiveDate, scheme: &BucketScheme) -> AgingClassification {
    let days_overdue = days_between(due_date, as_of);
    let (bucket_index, bucket) = scheme.bucket_for(days_overdue);
    AgingClassification {
        days_overdue,
        bucket: bucket.name.clone(),
        bucket_index,
    }
}

/// Classifies a receivable, or returns `None` when its due date is invalid.
///
/// Records with an unreadable due date never default to a bucket.
pub fn classify_receivable(
    receivable: &Receivable,
    as_of: NaiveDate,
    scheme: &BucketScheme,
) -> Option<AgingClassification> {
    receivable
        .normalized_due_date()
        .date()
        .map(|due| classify(due, as_of, scheme))
}
