mod consulta;
mod health;
mod prazos;

pub use consulta::*;
pub use health::*;
pub use prazos::*;

use prazos_models::LookupReport;
use prazos_utils::PrazosError;

use crate::{error::AppError, AppState};

/// Run a lookup on the blocking pool and count its outcome.
pub(crate) async fn run_lookup(state: &AppState, query: String) -> Result<LookupReport, AppError> {
    let lookup = state.lookup.clone();
    let report = tokio::task::spawn_blocking(move || lookup.run(&query))
        .await
        .map_err(|e| PrazosError::internal(format!("Lookup task failed: {}", e)))?;

    state.metrics.record(report.outcome);
    Ok(report)
}
