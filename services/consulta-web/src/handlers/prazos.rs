//! JSON lookup endpoint.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use prazos_models::{LookupMatch, LookupOutcome};
use prazos_utils::AppMode;
use serde::Serialize;
use serde_json::json;

use super::run_lookup;
use crate::{error::AppError, page::MAINTENANCE_NOTICE, AppState};

#[derive(Debug, Serialize)]
pub struct PrazoResponse {
    pub outcome: LookupOutcome,
    pub query: String,
    pub message: String,
    pub entries: Vec<LookupMatch>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub technical_detail: Option<String>,
}

fn status_for(outcome: LookupOutcome) -> StatusCode {
    match outcome {
        LookupOutcome::Single | LookupOutcome::Multiple => StatusCode::OK,
        LookupOutcome::NotFound => StatusCode::NOT_FOUND,
        LookupOutcome::EmptyQuery => StatusCode::BAD_REQUEST,
        LookupOutcome::SourceNotFound => StatusCode::SERVICE_UNAVAILABLE,
        LookupOutcome::ProcessingError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// GET /api/v1/prazos/:numero
pub async fn get_prazo(
    State(state): State<AppState>,
    Path(numero): Path<String>,
) -> Result<Response, AppError> {
    if state.config.app.mode == AppMode::Maintenance {
        let body = json!({
            "status": "maintenance",
            "message": MAINTENANCE_NOTICE,
        });
        return Ok((StatusCode::SERVICE_UNAVAILABLE, Json(body)).into_response());
    }

    let report = run_lookup(&state, numero).await?;
    let technical_detail = report
        .technical_detail
        .filter(|_| state.config.lookup.show_technical_errors);

    let response = PrazoResponse {
        outcome: report.outcome,
        query: report.query,
        message: report.message,
        entries: report.matches,
        technical_detail,
    };

    Ok((status_for(response.outcome), Json(response)).into_response())
}
