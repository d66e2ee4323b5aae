//! Metrics module - balance normalization, aggregate snapshots and aging reports.

mod aging_report;
mod balance;
mod metrics_calculator;
mod metrics_model;


pub use aging_report::{build_aging_summary, bucket_detail, dashboard_kpis};
pub use balance::{normalize_balance, normalize_optional_balance, BalanceValue};
pub use metrics_calculator::{aggregate, aggregate_all};
pub use metrics_model::{
    AgedReceivable, AgingSummary, BucketDetail, BucketMetrics, DashboardKpis, MetricSnapshot,
};
