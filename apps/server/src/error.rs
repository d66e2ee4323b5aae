use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use receivables_core::errors::{Error as CoreError, ImportError};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Core(#[from] CoreError),
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Anyhow(#[from] anyhow::Error),
}

#[derive(Serialize)]
struct ErrorBody {
    code: u16,
    message: String,
}

fn core_status(err: &CoreError) -> StatusCode {
    if err.is_not_found() {
        return StatusCode::NOT_FOUND;
    }
    match err {
        CoreError::Validation(_) | CoreError::InvalidScheme(_) => StatusCode::BAD_REQUEST,
        CoreError::Import(ImportError::NotConfigured) => StatusCode::NOT_IMPLEMENTED,
        CoreError::Import(_) => StatusCode::UNPROCESSABLE_ENTITY,
        CoreError::Transport(_) => StatusCode::BAD_GATEWAY,
        // Only constraint violations are left here; not-found was handled above.
        CoreError::Database(_) if !err.is_transport_failure() => StatusCode::CONFLICT,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Core(e) => core_status(e),
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Anyhow(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        }
        let body = Json(ErrorBody {
            code: status.as_u16(),
            message: self.to_string(),
        });
        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
