//! Lookup form handlers.
//!
//! The HTML face of the service: the form, its submission, and the
//! maintenance notice that replaces both when the service is switched off.

use axum::{
    extract::{Form, State},
    response::Html,
};
use prazos_models::LookupOutcome;
use prazos_utils::{lookup::formatter::technical_error_message, AppMode};
use serde::Deserialize;
use validator::Validate;

use super::run_lookup;
use crate::{error::AppError, page::PageView, AppState};

pub const QUERY_TOO_LONG_MESSAGE: &str = "O número do pedido informado é muito longo.";

#[derive(Debug, Default, Deserialize, Validate)]
pub struct ConsultaForm {
    #[serde(default)]
    #[validate(length(max = 64))]
    pub numero: String,
}

/// GET /
pub async fn index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let html = match state.config.app.mode {
        AppMode::Maintenance => state.pages.maintenance_page()?,
        AppMode::Lookup => state.pages.lookup_page(&PageView::default())?,
    };
    Ok(Html(html))
}

/// POST /consultar
pub async fn submit(
    State(state): State<AppState>,
    Form(form): Form<ConsultaForm>,
) -> Result<Html<String>, AppError> {
    if state.config.app.mode == AppMode::Maintenance {
        return Ok(Html(state.pages.maintenance_page()?));
    }

    let mut view = PageView {
        query: form.numero.trim().to_string(),
        ..Default::default()
    };

    if form.validate().is_err() {
        view.warning = Some(QUERY_TOO_LONG_MESSAGE.to_string());
        return Ok(Html(state.pages.lookup_page(&view)?));
    }

    let report = run_lookup(&state, form.numero).await?;

    match report.outcome {
        LookupOutcome::EmptyQuery => view.warning = Some(report.message),
        outcome => {
            if outcome.is_failure() && state.config.lookup.show_technical_errors {
                view.technical_error = report.technical_detail.as_deref().map(technical_error_message);
            }
            view.result_markup = Some(report.message);
        }
    }

    Ok(Html(state.pages.lookup_page(&view)?))
}
