//! Receivable repository and service traits.
//!
//! The repository is the single source of truth for receivable records and
//! the only component that performs I/O. Aging and metrics never touch it.

use async_trait::async_trait;
use chrono::NaiveDate;

use super::receivables_model::{
    ImportSummary, NewReceivable, PatchOutcome, Receivable, ReceivablePatch,
};
use super::receivables_snapshot::ReceivableSnapshot;
use super::report_parser::AgedReceivableReport;
use crate::aging::BucketScheme;
use crate::errors::Result;
use crate::metrics::{AgingSummary, BucketDetail, DashboardKpis};

/// Trait defining the contract for Receivable repository operations.
#[async_trait]
pub trait ReceivableRepositoryTrait: Send + Sync {
    /// Returns the current snapshot of all receivables.
    fn list(&self) -> Result<Vec<Receivable>>;

    /// Retrieves a receivable by its ID.
    fn get_by_id(&self, receivable_id: &str) -> Result<Receivable>;

    /// Persists a patch and returns the stored record.
    ///
    /// Fails with a not-found error when the id does not exist.
    async fn update(&self, receivable_id: &str, patch: ReceivablePatch) -> Result<Receivable>;

    /// Inserts or refreshes imported records, keeping their workflow fields.
    ///
    /// Returns the number of records written.
    async fn upsert_many(&self, records: Vec<NewReceivable>) -> Result<usize>;
}

/// Trait defining the contract for Receivable service operations.
#[async_trait]
pub trait ReceivableServiceTrait: Send + Sync {
    fn list_receivables(&self) -> Result<Vec<Receivable>>;

    fn get_receivable(&self, receivable_id: &str) -> Result<Receivable>;

    /// Persists a patch directly, without a client snapshot.
    async fn update_receivable(
        &self,
        receivable_id: &str,
        patch: ReceivablePatch,
    ) -> Result<Receivable>;

    /// Applies `patch` to `snapshot` immediately, then persists it.
    ///
    /// Returns `Err` only when the patch is invalid or the id is not in the
    /// snapshot; the snapshot is then untouched. A failed write is
    /// reported as [`PatchOutcome::Rejected`] and the snapshot keeps the
    /// optimistic value until the caller restores it.
    async fn apply_optimistic_patch(
        &self,
        snapshot: &mut ReceivableSnapshot,
        receivable_id: &str,
        patch: ReceivablePatch,
    ) -> Result<PatchOutcome>;

    /// Imports an accounting CSV export.
    async fn import_csv(&self, data: &[u8]) -> Result<ImportSummary>;

    /// Imports an aged receivable detail report payload.
    async fn import_report(&self, report: &AgedReceivableReport) -> Result<ImportSummary>;

    /// Registered bucket schemes.
    fn schemes(&self) -> Vec<BucketScheme>;

    /// Resolves the as-of date: the explicit one, else today in the configured zone.
    fn as_of_date(&self, explicit: Option<NaiveDate>) -> NaiveDate;

    fn aging_summary(&self, scheme: &str, as_of: Option<NaiveDate>) -> Result<AgingSummary>;

    fn bucket_detail(
        &self,
        scheme: &str,
        bucket: &str,
        as_of: Option<NaiveDate>,
    ) -> Result<BucketDetail>;

    fn dashboard_kpis(&self, as_of: Option<NaiveDate>) -> Result<DashboardKpis>;
}
