use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use chrono_tz::Tz;
use log::{debug, error, info, warn};

use super::csv_import::parse_csv_export;
use super::receivables_constants::validate_action_taken;
use super::receivables_model::{ImportSummary, PatchOutcome, Receivable, ReceivablePatch};
use super::receivables_snapshot::ReceivableSnapshot;
use super::receivables_traits::{ReceivableRepositoryTrait, ReceivableServiceTrait};
use super::report_parser::{parse_report, AgedReceivableReport, ParsedRecords};
use crate::aging::{BucketScheme, SchemeRegistry};
use crate::errors::Result;
use crate::metrics::{
    build_aging_summary, bucket_detail, dashboard_kpis, AgingSummary, BucketDetail,
    DashboardKpis,
};
use crate::utils::time_utils::{resolve_as_of, Clock};
use crate::Error;

/// Service for receivables, aging reports and imports.
pub struct ReceivableService {
    repository: Arc<dyn ReceivableRepositoryTrait>,
    schemes: Arc<SchemeRegistry>,
    clock: Arc<dyn Clock>,
    timezone: Tz,
}

impl ReceivableService {
    pub fn new(
        repository: Arc<dyn ReceivableRepositoryTrait>,
        schemes: Arc<SchemeRegistry>,
        clock: Arc<dyn Clock>,
        timezone: Tz,
    ) -> Self {
        Self {
            repository,
            schemes,
            clock,
            timezone,
        }
    }

    async fn store_parsed(&self, parsed: ParsedRecords) -> Result<ImportSummary> {
        let ParsedRecords { records, skipped } = parsed;
        let imported = if records.is_empty() {
            0
        } else {
            self.repository.upsert_many(records).await?
        };
        info!("Imported {} receivable(s), skipped {} row(s)", imported, skipped);
        Ok(ImportSummary { imported, skipped })
    }

    fn validate_patch(patch: &ReceivablePatch) -> Result<()> {
        if let Some(action_taken) = &patch.action_taken {
            validate_action_taken(action_taken.as_deref())?;
        }
        Ok(())
    }
}

#[async_trait]
impl ReceivableServiceTrait for ReceivableService {
    fn list_receivables(&self) -> Result<Vec<Receivable>> {
        self.repository.list()
    }

    fn get_receivable(&self, receivable_id: &str) -> Result<Receivable> {
        self.repository.get_by_id(receivable_id)
    }

    async fn update_receivable(
        &self,
        receivable_id: &str,
        patch: ReceivablePatch,
    ) -> Result<Receivable> {
        debug!("Updating receivable {}: {:?}", receivable_id, patch);
        Self::validate_patch(&patch)?;
        if patch.is_empty() {
            return self.repository.get_by_id(receivable_id);
        }
        self.repository.update(receivable_id, patch).await
    }

    async fn apply_optimistic_patch(
        &self,
        snapshot: &mut ReceivableSnapshot,
        receivable_id: &str,
        patch: ReceivablePatch,
    ) -> Result<PatchOutcome> {
        Self::validate_patch(&patch)?;
        let original = snapshot
            .find(receivable_id)
            .cloned()
            .ok_or_else(|| Error::NotFound(receivable_id.to_string()))?;
        let optimistic = snapshot.apply_patch(receivable_id, &patch)?;

        match self.repository.update(receivable_id, patch).await {
            Ok(confirmed) => {
                snapshot.replace(confirmed.clone())?;
                Ok(PatchOutcome::Confirmed(confirmed))
            }
            Err(error) => {
                if error.is_transport_failure() {
                    error!("Failed to persist receivable {}: {}", receivable_id, error);
                } else {
                    warn!("Update of receivable {} rejected: {}", receivable_id, error);
                }
                Ok(PatchOutcome::Rejected {
                    original,
                    optimistic,
                    error,
                })
            }
        }
    }

    async fn import_csv(&self, data: &[u8]) -> Result<ImportSummary> {
        debug!("Importing CSV export ({} bytes)", data.len());
        let parsed = parse_csv_export(data)?;
        self.store_parsed(parsed).await
    }

    async fn import_report(&self, report: &AgedReceivableReport) -> Result<ImportSummary> {
        self.store_parsed(parse_report(report)).await
    }

    fn schemes(&self) -> Vec<BucketScheme> {
        self.schemes.list().to_vec()
    }

    fn as_of_date(&self, explicit: Option<NaiveDate>) -> NaiveDate {
        resolve_as_of(explicit, self.clock.as_ref(), self.timezone)
    }

    fn aging_summary(&self, scheme: &str, as_of: Option<NaiveDate>) -> Result<AgingSummary> {
        let scheme = self.schemes.get(scheme)?;
        let records = self.repository.list()?;
        Ok(build_aging_summary(&records, scheme, self.as_of_date(as_of)))
    }

    fn bucket_detail(
        &self,
        scheme: &str,
        bucket: &str,
        as_of: Option<NaiveDate>,
    ) -> Result<BucketDetail> {
        let scheme = self.schemes.get(scheme)?;
        let records = self.repository.list()?;
        bucket_detail(&records, scheme, bucket, self.as_of_date(as_of))
    }

    fn dashboard_kpis(&self, as_of: Option<NaiveDate>) -> Result<DashboardKpis> {
        let records = self.repository.list()?;
        Ok(dashboard_kpis(&records, self.as_of_date(as_of)))
    }
}
