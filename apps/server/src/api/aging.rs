use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use receivables_core::constants::STANDARD_SCHEME;
use serde::Deserialize;

use crate::{
    error::ApiResult,
    main_lib::AppState,
    models::{AgingSummary, BucketDetail, BucketScheme, DashboardKpis},
};

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct AgingQuery {
    scheme: Option<String>,
    /// Defaults to today in the configured timezone.
    as_of: Option<NaiveDate>,
}

impl AgingQuery {
    fn scheme(&self) -> &str {
        self.scheme.as_deref().unwrap_or(STANDARD_SCHEME)
    }
}

#[utoipa::path(get, path = "/api/v1/aging/schemes", responses((status = 200, body = [BucketScheme])))]
pub async fn list_schemes(State(state): State<Arc<AppState>>) -> Json<Vec<BucketScheme>> {
    let schemes = state.receivable_service.schemes();
    Json(schemes.into_iter().map(BucketScheme::from).collect())
}

#[utoipa::path(
    get,
    path = "/api/v1/aging/summary",
    params(
        ("scheme" = Option<String>, Query, description = "Bucket scheme, `standard` by default"),
        ("asOf" = Option<NaiveDate>, Query, description = "As-of date (YYYY-MM-DD)")
    ),
    responses((status = 200, body = AgingSummary), (status = 400, description = "Unknown scheme"))
)]
pub async fn aging_summary(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AgingQuery>,
) -> ApiResult<Json<AgingSummary>> {
    let summary = state
        .receivable_service
        .aging_summary(query.scheme(), query.as_of)?;
    Ok(Json(summary.into()))
}

#[utoipa::path(
    get,
    path = "/api/v1/aging/buckets/{bucket}",
    params(
        ("bucket" = String, Path, description = "Bucket name, e.g. `31-60`"),
        ("scheme" = Option<String>, Query, description = "Bucket scheme, `standard` by default"),
        ("asOf" = Option<NaiveDate>, Query, description = "As-of date (YYYY-MM-DD)")
    ),
    responses((status = 200, body = BucketDetail), (status = 400, description = "Unknown scheme or bucket"))
)]
pub async fn bucket_detail(
    Path(bucket): Path<String>,
    State(state): State<Arc<AppState>>,
    Query(query): Query<AgingQuery>,
) -> ApiResult<Json<BucketDetail>> {
    let detail = state
        .receivable_service
        .bucket_detail(query.scheme(), &bucket, query.as_of)?;
    Ok(Json(detail.into()))
}

#[utoipa::path(
    get,
    path = "/api/v1/aging/kpis",
    params(("asOf" = Option<NaiveDate>, Query, description = "As-of date (YYYY-MM-DD)")),
    responses((status = 200, body = DashboardKpis))
)]
pub async fn dashboard_kpis(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AgingQuery>,
) -> ApiResult<Json<DashboardKpis>> {
    let kpis = state.receivable_service.dashboard_kpis(query.as_of)?;
    Ok(Json(kpis.into()))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/aging/schemes", get(list_schemes))
        .route("/aging/summary", get(aging_summary))
        .route("/aging/buckets/{bucket}", get(bucket_detail))
        .route("/aging/kpis", get(dashboard_kpis))
}
