// ============================================================================
// WMS API - Warehouse Handlers
// File: crates/wms-api/src/handlers/warehouses.rs
// ============================================================================
//! Warehouse list, create, delete, and undo

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::info;

use super::parse_letter;
use crate::dto::{CreateWarehouseRequest, DeletedWarehouseDto, WarehouseDetailDto, WarehouseDto};
use crate::error::ApiError;
use crate::response::ApiResponse;
use crate::state::AppState;
use wms_core::domain::NewWarehouse;

/// List warehouses - GET /api/v1/warehouses
pub async fn list_warehouses(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<WarehouseDto>>>, ApiError> {
    let overview = state.warehouses.list().await?;
    Ok(Json(ApiResponse::success(
        overview.into_iter().map(WarehouseDto::from).collect(),
    )))
}

/// Create warehouse - POST /api/v1/warehouses
pub async fn create_warehouse(
    State(state): State<AppState>,
    Json(payload): Json<CreateWarehouseRequest>,
) -> Result<(StatusCode, Json<ApiResponse<WarehouseDetailDto>>), ApiError> {
    let request: NewWarehouse = payload.into();
    let (warehouse, sections) = state.warehouses.create(&request).await?;
    info!("Warehouse {} created via API", warehouse.letter);

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(WarehouseDetailDto::new(warehouse, sections))),
    ))
}

/// Delete warehouse - DELETE /api/v1/warehouses/{letter}
pub async fn delete_warehouse(
    State(state): State<AppState>,
    Path(letter): Path<String>,
) -> Result<Json<ApiResponse<DeletedWarehouseDto>>, ApiError> {
    let letter = parse_letter(&letter)?;
    let deleted = state.warehouses.delete(&letter).await?;

    Ok(Json(ApiResponse::success(DeletedWarehouseDto {
        letter: deleted.warehouse.letter.to_string(),
        sections_removed: deleted.sections.len(),
        undo_window_ms: state.warehouses.undo_window_ms(),
    })))
}

/// Undo the last delete - POST /api/v1/warehouses/{letter}/restore
pub async fn restore_warehouse(
    State(state): State<AppState>,
    Path(letter): Path<String>,
) -> Result<Json<ApiResponse<WarehouseDetailDto>>, ApiError> {
    let letter = parse_letter(&letter)?;
    let restored = state.warehouses.restore(&letter).await?;
    Ok(Json(ApiResponse::success(restored.into())))
}
