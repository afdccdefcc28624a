use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use prazos_utils::{ErrorResponse, PrazosError};

/// Handler error carrying the workspace error type into an HTTP response.
#[derive(Debug)]
pub struct AppError(pub PrazosError);

impl From<PrazosError> for AppError {
    fn from(error: PrazosError) -> Self {
        Self(error)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self(PrazosError::internal(format!("{:#}", error)))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        tracing::error!(error = %self.0, code = self.0.error_code(), "Request failed");

        (status, Json(ErrorResponse::from(self.0))).into_response()
    }
}
