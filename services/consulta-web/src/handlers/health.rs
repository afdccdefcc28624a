use axum::{extract::State, response::Json};
use serde_json::{json, Value};

use crate::AppState;

pub async fn detailed_health_check(State(state): State<AppState>) -> Json<Value> {
    let source_path = state.lookup.source_path();
    let source_present = source_path.is_file();

    let status = if source_present { "healthy" } else { "degraded" };

    Json(json!({
        "status": status,
        "service": "consulta-prazos",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION"),
        "mode": state.config.app.mode.as_str(),
        "checks": {
            "spreadsheet": {
                "path": source_path.display().to_string(),
                "status": if source_present { "healthy" } else { "unhealthy" },
            }
        }
    }))
}
