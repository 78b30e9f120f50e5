//! Mapping of application errors onto HTTP responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tallykit_core::currency::ConversionError;
use tallykit_core::denomination::DenominationError;
use tallykit_core::tax::TaxError;
use tallykit_shared::AppError;
use tracing::error;

/// An [`AppError`] rendered as `{ "error": CODE, "message": TEXT }`.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status.is_server_error() {
            error!(error = %self.0, "Request failed");
        }
        (
            status,
            Json(json!({
                "error": self.0.error_code(),
                "message": self.0.to_string(),
            })),
        )
            .into_response()
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<DenominationError> for ApiError {
    fn from(err: DenominationError) -> Self {
        Self(err.into())
    }
}

impl From<TaxError> for ApiError {
    fn from(err: TaxError) -> Self {
        Self(err.into())
    }
}

impl From<ConversionError> for ApiError {
    fn from(err: ConversionError) -> Self {
        Self(err.into())
    }
}

/// Result type for handlers.
pub type ApiResult<T> = Result<T, ApiError>;
