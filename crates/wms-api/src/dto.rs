//! Request and response payloads

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use wms_core::calculations::UtilizationStats;
use wms_core::domain::{NewWarehouse, Section, SectionStatus, Warehouse, WarehouseKind};
use wms_core::services::{DeletedWarehouse, WarehouseOverview};

/// Create warehouse payload - POST /api/v1/warehouses
#[derive(Debug, Deserialize)]
pub struct CreateWarehouseRequest {
    pub letter: String,
    pub name: String,
    #[serde(alias = "type")]
    pub kind: WarehouseKind,
    #[serde(default)]
    pub sections: Option<u32>,
}

impl From<CreateWarehouseRequest> for NewWarehouse {
    fn from(req: CreateWarehouseRequest) -> Self {
        NewWarehouse {
            letter: req.letter.trim().to_ascii_uppercase(),
            name: req.name,
            kind: req.kind,
            sections: req.sections,
        }
    }
}

/// Add sections payload - POST /api/v1/warehouses/{letter}/sections
#[derive(Debug, Deserialize)]
pub struct AddSectionsRequest {
    pub count: u32,
}

#[derive(Debug, Serialize)]
pub struct WarehouseDto {
    pub id: Uuid,
    pub letter: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: WarehouseKind,
    pub last_modified: DateTime<Utc>,
    pub stats: UtilizationStats,
    /// Every section occupied.
    pub is_full: bool,
}

impl From<WarehouseOverview> for WarehouseDto {
    fn from(overview: WarehouseOverview) -> Self {
        let w = overview.warehouse;
        WarehouseDto {
            id: w.id,
            letter: w.letter.to_string(),
            name: w.name,
            kind: w.kind,
            last_modified: w.last_modified,
            is_full: overview.stats.is_full(),
            stats: overview.stats,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SectionDto {
    pub id: Uuid,
    pub key: String,
    pub number: u32,
    pub status: SectionStatus,
    pub column: u32,
    pub row: u32,
}

impl From<Section> for SectionDto {
    fn from(section: Section) -> Self {
        let grid = section.grid_position();
        SectionDto {
            id: section.id,
            key: section.key.to_string(),
            number: section.key.number,
            status: section.status,
            column: grid.column,
            row: grid.row,
        }
    }
}

/// Warehouse with its sections, returned by create and restore.
#[derive(Debug, Serialize)]
pub struct WarehouseDetailDto {
    pub warehouse: WarehouseDto,
    pub sections: Vec<SectionDto>,
}

impl WarehouseDetailDto {
    pub fn new(warehouse: Warehouse, sections: Vec<Section>) -> Self {
        let stats = UtilizationStats::from_statuses(sections.iter().map(|s| &s.status));
        WarehouseDetailDto {
            warehouse: WarehouseOverview { warehouse, stats }.into(),
            sections: sections.into_iter().map(SectionDto::from).collect(),
        }
    }
}

impl From<DeletedWarehouse> for WarehouseDetailDto {
    fn from(deleted: DeletedWarehouse) -> Self {
        Self::new(deleted.warehouse, deleted.sections)
    }
}

#[derive(Debug, Serialize)]
pub struct DeletedWarehouseDto {
    pub letter: String,
    pub sections_removed: usize,
    pub undo_window_ms: i64,
}

#[derive(Debug, Deserialize)]
pub struct UtilizationQuery {
    #[serde(default)]
    pub scope: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UtilizationDto {
    pub scope: String,
    #[serde(flatten)]
    pub stats: UtilizationStats,
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    #[serde(default)]
    pub range: Option<String>,
    #[serde(default)]
    pub start: Option<NaiveDate>,
    #[serde(default)]
    pub end: Option<NaiveDate>,
    #[serde(default)]
    pub warehouse: Option<String>,
}
