use std::{path::Path as StdPath, sync::Arc};

use crate::{config::Config, main_lib::AppState};
use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use utoipa::OpenApi;

use crate::models::{
    AccountingImportRequest, AgedReceivable, AgingBucket, AgingSummary, BucketDetail,
    BucketMetrics, BucketScheme, DashboardKpis, ImportSummary, MetricSnapshot, Receivable,
    ReceivablePatch,
};

mod aging;
mod receivables;

#[utoipa::path(get, path = "/api/v1/healthz", responses((status = 200, description = "Healthy")))]
pub async fn healthz() -> &'static str {
    "ok"
}

#[utoipa::path(
    get,
    path = "/api/v1/readyz",
    responses((status = 200, description = "Ready"), (status = 503, description = "Database missing"))
)]
pub async fn readyz(State(state): State<Arc<AppState>>) -> (StatusCode, &'static str) {
    if StdPath::new(&state.db_path).exists() {
        (StatusCode::OK, "ok")
    } else {
        tracing::warn!("Database file {} is missing", state.db_path);
        (StatusCode::SERVICE_UNAVAILABLE, "database unavailable")
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        healthz,
        readyz,
        receivables::list_receivables,
        receivables::get_receivable,
        receivables::patch_receivable,
        receivables::import_csv,
        receivables::import_report,
        receivables::import_from_accounting,
        aging::list_schemes,
        aging::aging_summary,
        aging::bucket_detail,
        aging::dashboard_kpis
    ),
    components(schemas(
        Receivable,
        ReceivablePatch,
        ImportSummary,
        AccountingImportRequest,
        AgingBucket,
        BucketScheme,
        MetricSnapshot,
        BucketMetrics,
        AgingSummary,
        AgedReceivable,
        BucketDetail,
        DashboardKpis
    )),
    tags((name = "receivables"))
)]
pub struct ApiDoc;

pub fn app_router(state: Arc<AppState>, config: &Config) -> Router {
    let cors = if config.cors_allow.iter().any(|o| o == "*") {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins = config
            .cors_allow
            .iter()
            .filter_map(|o| match o.parse() {
                Ok(origin) => Some(origin),
                Err(_) => {
                    tracing::warn!("Ignoring invalid CORS origin '{}'", o);
                    None
                }
            })
            .collect::<Vec<_>>();
        CorsLayer::new().allow_origin(origins)
    };

    let openapi = ApiDoc::openapi();

    let api = Router::new()
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .merge(receivables::router())
        .merge(aging::router());

    Router::new()
        .nest("/api/v1", api)
        .route("/openapi.json", get(|| async { Json(openapi) }))
        .with_state(state)
        .layer(cors)
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TimeoutLayer::new(config.request_timeout))
        .layer(TraceLayer::new_for_http())
}
