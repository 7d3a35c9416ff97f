// ============================================================================
// WMS API - Scheduled Job Handler
// File: crates/wms-api/src/handlers/cron.rs
// ============================================================================

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use tracing::{error, info};

use crate::state::AppState;

const JOB_FAILED: &str = "Failed to update daily utilization";

/// Record today's utilization - POST /api/cron/daily-utilization
///
/// Authorized by the cron middleware. Responds with `{"message"}` or
/// `{"error"}` rather than the API envelope.
pub async fn daily_utilization(State(state): State<AppState>) -> impl IntoResponse {
    match state.snapshots.record_today().await {
        Ok(report) => {
            info!("Daily utilization recorded for {}", report.date);
            (
                StatusCode::OK,
                Json(json!({
                    "message": format!(
                        "Daily utilization recorded for {}: {}% overall across {} warehouses",
                        report.date,
                        report.overall.utilization_percent,
                        report.warehouses.len()
                    )
                })),
            )
        }
        Err(e) => {
            error!("Daily utilization job failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": JOB_FAILED })),
            )
        }
    }
}
