// ============================================================================
// WMS API - Section Handlers
// File: crates/wms-api/src/handlers/sections.rs
// ============================================================================

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::parse_letter;
use crate::dto::{AddSectionsRequest, SectionDto};
use crate::error::ApiError;
use crate::response::ApiResponse;
use crate::state::AppState;

fn to_dtos(sections: Vec<wms_core::domain::Section>) -> Vec<SectionDto> {
    sections.into_iter().map(SectionDto::from).collect()
}

/// GET /api/v1/warehouses/{letter}/sections
pub async fn list_sections(
    State(state): State<AppState>,
    Path(letter): Path<String>,
) -> Result<Json<ApiResponse<Vec<SectionDto>>>, ApiError> {
    let letter = parse_letter(&letter)?;
    let sections = state.warehouses.sections(&letter).await?;
    Ok(Json(ApiResponse::success(to_dtos(sections))))
}

/// POST /api/v1/warehouses/{letter}/sections
pub async fn add_sections(
    State(state): State<AppState>,
    Path(letter): Path<String>,
    Json(payload): Json<AddSectionsRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Vec<SectionDto>>>), ApiError> {
    let letter = parse_letter(&letter)?;
    let added = state.warehouses.add_sections(&letter, payload.count).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(to_dtos(added)))))
}

/// DELETE /api/v1/warehouses/{letter}/sections/{number}
pub async fn delete_section(
    State(state): State<AppState>,
    Path((letter, number)): Path<(String, u32)>,
) -> Result<Json<ApiResponse<SectionDto>>, ApiError> {
    let letter = parse_letter(&letter)?;
    let removed = state.warehouses.delete_section(&letter, number).await?;
    Ok(Json(ApiResponse::success(removed.into())))
}

/// DELETE /api/v1/warehouses/{letter}/rows/last
pub async fn delete_last_row(
    State(state): State<AppState>,
    Path(letter): Path<String>,
) -> Result<Json<ApiResponse<Vec<SectionDto>>>, ApiError> {
    let letter = parse_letter(&letter)?;
    let removed = state.warehouses.delete_last_row(&letter).await?;
    Ok(Json(ApiResponse::success(to_dtos(removed))))
}

/// POST /api/v1/warehouses/{letter}/sections/{number}/toggle
pub async fn toggle_section(
    State(state): State<AppState>,
    Path((letter, number)): Path<(String, u32)>,
) -> Result<Json<ApiResponse<SectionDto>>, ApiError> {
    let letter = parse_letter(&letter)?;
    let updated = state.warehouses.toggle_section(&letter, number).await?;
    Ok(Json(ApiResponse::success(updated.into())))
}
