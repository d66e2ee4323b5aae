use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use receivables_core::{aging as core_aging, metrics as core_metrics, receivables as core_receivables};

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Receivable {
    pub id: String,
    pub transaction_date: Option<String>,
    pub transaction_type: Option<String>,
    pub document_number: Option<String>,
    pub customer_name: String,
    /// Due date as received from the accounting system.
    pub due_date: Option<String>,
    /// Calendar due date; absent when the raw value cannot be read.
    pub normalized_due_date: Option<NaiveDate>,
    pub amount: Option<String>,
    pub open_balance: Option<String>,
    pub normalized_open_balance: Decimal,
    pub action_taken: Option<String>,
    pub slack_updated: bool,
    pub follow_up: bool,
    pub escalation: bool,
}

impl From<core_receivables::Receivable> for Receivable {
    fn from(r: core_receivables::Receivable) -> Self {
        Self {
            normalized_due_date: r.normalized_due_date().date(),
            normalized_open_balance: r.normalized_open_balance(),
            id: r.id,
            transaction_date: r.transaction_date.map(|d| d.as_text()),
            transaction_type: r.transaction_type,
            document_number: r.document_number,
            customer_name: r.customer_name,
            due_date: r.due_date.map(|d| d.as_text()),
            amount: r.amount.map(|a| a.as_text()),
            open_balance: r.open_balance.map(|b| b.as_text()),
            action_taken: r.action_taken,
            slack_updated: r.slack_updated,
            follow_up: r.follow_up,
            escalation: r.escalation,
        }
    }
}

/// Workflow field update. Omitted fields are unchanged; `actionTaken: null` clears it.
#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct ReceivablePatch {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    #[schema(value_type = Option<String>, nullable)]
    pub action_taken: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slack_updated: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub follow_up: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub escalation: Option<bool>,
}

impl From<ReceivablePatch> for core_receivables::ReceivablePatch {
    fn from(p: ReceivablePatch) -> Self {
        Self {
            action_taken: p.action_taken,
            slack_updated: p.slack_updated,
            follow_up: p.follow_up,
            escalation: p.escalation,
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, Copy)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    pub imported: usize,
    pub skipped: usize,
}

impl From<core_receivables::ImportSummary> for ImportSummary {
    fn from(s: core_receivables::ImportSummary) -> Self {
        Self {
            imported: s.imported,
            skipped: s.skipped,
        }
    }
}

/// Parameters for pulling the aged receivable detail report.
#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AccountingImportRequest {
    pub realm_id: String,
    pub report_date: NaiveDate,
    pub start_due_date: NaiveDate,
    pub end_due_date: NaiveDate,
    pub columns: Option<String>,
}

impl From<AccountingImportRequest> for core_receivables::AgedReceivableQuery {
    fn from(r: AccountingImportRequest) -> Self {
        Self {
            realm_id: r.realm_id,
            report_date: r.report_date,
            start_due_date: r.start_due_date,
            end_due_date: r.end_due_date,
            columns: r.columns,
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AgingBucket {
    pub name: String,
    pub min_days: Option<i64>,
    pub max_days: Option<i64>,
}

impl From<core_aging::AgingBucket> for AgingBucket {
    fn from(b: core_aging::AgingBucket) -> Self {
        Self {
            name: b.name,
            min_days: b.min_days,
            max_days: b.max_days,
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct BucketScheme {
    pub name: String,
    pub buckets: Vec<AgingBucket>,
}

impl From<core_aging::BucketScheme> for BucketScheme {
    fn from(s: core_aging::BucketScheme) -> Self {
        Self {
            name: s.name().to_string(),
            buckets: s.buckets().iter().cloned().map(AgingBucket::from).collect(),
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct MetricSnapshot {
    pub record_count: usize,
    pub summed_balance: Decimal,
    pub percent_of_total_count: Decimal,
    pub percent_of_total_balance: Decimal,
}

impl From<core_metrics::MetricSnapshot> for MetricSnapshot {
    fn from(m: core_metrics::MetricSnapshot) -> Self {
        Self {
            record_count: m.record_count,
            summed_balance: m.summed_balance,
            percent_of_total_count: m.percent_of_total_count,
            percent_of_total_balance: m.percent_of_total_balance,
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct BucketMetrics {
    pub bucket: AgingBucket,
    pub metrics: MetricSnapshot,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AgingSummary {
    pub scheme: String,
    pub as_of: NaiveDate,
    pub buckets: Vec<BucketMetrics>,
    pub total: MetricSnapshot,
    pub excluded_count: usize,
}

impl From<core_metrics::AgingSummary> for AgingSummary {
    fn from(s: core_metrics::AgingSummary) -> Self {
        Self {
            scheme: s.scheme,
            as_of: s.as_of,
            buckets: s
                .buckets
                .into_iter()
                .map(|b| BucketMetrics {
                    bucket: b.bucket.into(),
                    metrics: b.metrics.into(),
                })
                .collect(),
            total: s.total.into(),
            excluded_count: s.excluded_count,
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AgedReceivable {
    #[serde(flatten)]
    pub receivable: Receivable,
    pub days_overdue: i64,
    pub bucket: String,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct BucketDetail {
    pub scheme: String,
    pub as_of: NaiveDate,
    pub bucket: AgingBucket,
    pub metrics: MetricSnapshot,
    pub rows: Vec<AgedReceivable>,
}

impl From<core_metrics::BucketDetail> for BucketDetail {
    fn from(d: core_metrics::BucketDetail) -> Self {
        Self {
            scheme: d.scheme,
            as_of: d.as_of,
            bucket: d.bucket.into(),
            metrics: d.metrics.into(),
            rows: d
                .rows
                .into_iter()
                .map(|row| AgedReceivable {
                    receivable: row.receivable.into(),
                    days_overdue: row.days_overdue,
                    bucket: row.bucket,
                })
                .collect(),
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct DashboardKpis {
    pub as_of: NaiveDate,
    pub record_count: usize,
    pub total_open_balance: Decimal,
    pub past_due_count: usize,
    pub past_due_balance: Decimal,
    pub average_days_overdue: Decimal,
    pub excluded_count: usize,
}

impl From<core_metrics::DashboardKpis> for DashboardKpis {
    fn from(k: core_metrics::DashboardKpis) -> Self {
        Self {
            as_of: k.as_of,
            record_count: k.record_count,
            total_open_balance: k.total_open_balance,
            past_due_count: k.past_due_count,
            past_due_balance: k.past_due_balance,
            average_days_overdue: k.average_days_overdue,
            excluded_count: k.excluded_count,
        }
    }
}
