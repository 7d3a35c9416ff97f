// ============================================================================
// WMS API - Utilization Handlers
// File: crates/wms-api/src/handlers/utilization.rs
// ============================================================================
//! Current utilization per scope and utilization history

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::Utc;

use super::parse_letter;
use crate::dto::{HistoryQuery, UtilizationDto, UtilizationQuery};
use crate::error::ApiError;
use crate::response::ApiResponse;
use crate::state::AppState;
use wms_core::calculations::Scope;
use wms_core::domain::TimeRange;
use wms_core::services::History;

/// Scope names are case-insensitive; anything else is a warehouse identifier.
fn parse_scope(raw: Option<&str>) -> Result<Scope, ApiError> {
    let raw = raw.unwrap_or("all").trim();
    Scope::parse(&raw.to_ascii_lowercase())
        .or_else(|_| Scope::parse(&raw.to_ascii_uppercase()))
        .map_err(ApiError::from)
}

fn scope_label(scope: &Scope) -> String {
    match scope {
        Scope::All => "all".to_string(),
        Scope::Kind(kind) => kind.as_str().to_string(),
        Scope::Warehouse(letter) => letter.to_string(),
    }
}

/// GET /api/v1/utilization?scope=all|indoor|outdoor|<letter>
pub async fn get_utilization(
    State(state): State<AppState>,
    Query(query): Query<UtilizationQuery>,
) -> Result<Json<ApiResponse<UtilizationDto>>, ApiError> {
    let scope = parse_scope(query.scope.as_deref())?;
    let stats = state.warehouses.stats(&scope).await?;

    Ok(Json(ApiResponse::success(UtilizationDto {
        scope: scope_label(&scope),
        stats,
    })))
}

/// Resolve `range`, `start`, and `end` query parameters. Defaults to the
/// last seven days.
pub fn parse_time_range(query: &HistoryQuery) -> Result<TimeRange, ApiError> {
    let range = query.range.as_deref().map(|r| r.trim().to_ascii_lowercase());
    match range.as_deref() {
        None | Some("") | Some("week") => Ok(TimeRange::Week),
        Some("day") => Ok(TimeRange::Day),
        Some("month") => Ok(TimeRange::Month),
        Some("year") => Ok(TimeRange::Year),
        Some("custom") => match (query.start, query.end) {
            (Some(start), Some(end)) => Ok(TimeRange::Custom { start, end }),
            _ => Err(ApiError::BadRequest(
                "Custom range requires start and end dates".to_string(),
            )),
        },
        Some(other) => Err(ApiError::BadRequest(format!("Unknown range: {}", other))),
    }
}

/// GET /api/v1/utilization/history?range=...&start=&end=&warehouse=
pub async fn get_history(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<ApiResponse<History>>, ApiError> {
    let range = parse_time_range(&query)?.resolve(Utc::now().date_naive());
    let warehouse = query
        .warehouse
        .as_deref()
        .filter(|w| !w.trim().is_empty())
        .map(parse_letter)
        .transpose()?;

    let history = state.history.history(range, warehouse.as_ref()).await?;
    Ok(Json(ApiResponse::success(history)))
}
