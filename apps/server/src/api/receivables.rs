use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use receivables_core::errors::ImportError;
use receivables_core::receivables::AgedReceivableReport;

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
    models::{AccountingImportRequest, ImportSummary, Receivable, ReceivablePatch},
};

#[utoipa::path(get, path = "/api/v1/receivables", responses((status = 200, body = [Receivable])))]
pub async fn list_receivables(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Receivable>>> {
    let records = state.receivable_service.list_receivables()?;
    Ok(Json(records.into_iter().map(Receivable::from).collect()))
}

#[utoipa::path(
    get,
    path = "/api/v1/receivables/{id}",
    params(("id" = String, Path, description = "Receivable id")),
    responses((status = 200, body = Receivable), (status = 404, description = "Unknown id"))
)]
pub async fn get_receivable(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Receivable>> {
    let record = state.receivable_service.get_receivable(&id)?;
    Ok(Json(Receivable::from(record)))
}

#[utoipa::path(
    patch,
    path = "/api/v1/receivables/{id}",
    params(("id" = String, Path, description = "Receivable id")),
    request_body = ReceivablePatch,
    responses(
        (status = 200, body = Receivable),
        (status = 400, description = "Unsupported action taken value"),
        (status = 404, description = "Unknown id")
    )
)]
pub async fn patch_receivable(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ReceivablePatch>,
) -> ApiResult<Json<Receivable>> {
    let updated = state
        .receivable_service
        .update_receivable(&id, payload.into())
        .await?;
    Ok(Json(Receivable::from(updated)))
}

#[utoipa::path(
    post,
    path = "/api/v1/receivables/import/csv",
    request_body(content = String, content_type = "text/csv", description = "Aged receivable CSV export"),
    responses((status = 200, body = ImportSummary))
)]
pub async fn import_csv(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> ApiResult<Json<ImportSummary>> {
    if body.is_empty() {
        return Err(ApiError::BadRequest("CSV body is empty".to_string()));
    }
    let summary = state.receivable_service.import_csv(&body).await?;
    Ok(Json(summary.into()))
}

#[utoipa::path(
    post,
    path = "/api/v1/receivables/import/report",
    request_body(
        content = Object,
        content_type = "application/json",
        description = "AgedReceivableDetail report payload"
    ),
    responses(
        (status = 200, body = ImportSummary),
        (status = 422, description = "Malformed report payload")
    )
)]
pub async fn import_report(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> ApiResult<Json<ImportSummary>> {
    let report = AgedReceivableReport::from_json(&body)?;
    let summary = state.receivable_service.import_report(&report).await?;
    Ok(Json(summary.into()))
}

#[utoipa::path(
    post,
    path = "/api/v1/receivables/import/accounting",
    request_body = AccountingImportRequest,
    responses(
        (status = 200, body = ImportSummary),
        (status = 501, description = "No accounting API configured"),
        (status = 502, description = "Accounting API unreachable")
    )
)]
pub async fn import_from_accounting(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AccountingImportRequest>,
) -> ApiResult<Json<ImportSummary>> {
    let client = state
        .accounting_client
        .clone()
        .ok_or_else(|| receivables_core::Error::from(ImportError::NotConfigured))?;
    let report = client
        .fetch_aged_receivable_detail(&request.into())
        .await?;
    let summary = state.receivable_service.import_report(&report).await?;
    Ok(Json(summary.into()))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/receivables", get(list_receivables))
        .route(
            "/receivables/{id}",
            get(get_receivable).patch(patch_receivable),
        )
        .route("/receivables/import/csv", post(import_csv))
        .route("/receivables/import/report", post(import_report))
        .route("/receivables/import/accounting", post(import_from_accounting))
}
