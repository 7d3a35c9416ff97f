// ============================================================================
// WMS Core - History Service
// File: crates/wms-core/src/services/history_service.rs
// ============================================================================
//! Utilization history as a dense daily series.

use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, error};
use uuid::Uuid;

use crate::calculations::series::build_series_for_range;
use crate::domain::{DailySample, DailyUtilization, DateRange, GroupId};
use crate::error::DomainError;
use crate::repositories::{UtilizationRepository, WarehouseRepository};

/// Result of a history read. Storage failures become `NoData`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum History {
    Series { range: DateRange, points: Vec<DailySample> },
    NoData { range: DateRange },
}

impl History {
    pub fn points(&self) -> &[DailySample] {
        match self {
            Self::Series { points, .. } => points,
            Self::NoData { .. } => &[],
        }
    }

    pub fn is_no_data(&self) -> bool {
        matches!(self, Self::NoData { .. })
    }
}

pub struct HistoryService {
    warehouses: Arc<dyn WarehouseRepository>,
    utilization: Arc<dyn UtilizationRepository>,
}

impl HistoryService {
    pub fn new(warehouses: Arc<dyn WarehouseRepository>, utilization: Arc<dyn UtilizationRepository>) -> Self {
        Self {
            warehouses,
            utilization,
        }
    }

    /// Series over `range` for one warehouse, or for all warehouses when
    /// `warehouse` is `None`.
    pub async fn history(&self, range: DateRange, warehouse: Option<&GroupId>) -> Result<History, DomainError> {
        if range.is_empty() {
            return Ok(History::Series { range, points: Vec::new() });
        }

        let warehouse_id = match warehouse {
            Some(letter) => match self.warehouses.find_by_letter(letter).await {
                Ok(Some(found)) => Some(found.id),
                Ok(None) => return Err(DomainError::WarehouseNotFound(letter.to_string())),
                Err(e) => {
                    error!("Failed to resolve warehouse {} for history: {}", letter, e);
                    return Ok(History::NoData { range });
                }
            },
            None => None,
        };

        match self.load_samples(warehouse_id, range).await {
            Ok(samples) => {
                debug!("Building history {}..{} from {} samples", range.start, range.end, samples.len());
                Ok(History::Series {
                    range,
                    points: build_series_for_range(range, &samples),
                })
            }
            Err(e) => {
                error!("Failed to load utilization history: {}", e);
                Ok(History::NoData { range })
            }
        }
    }

    async fn load_samples(&self, warehouse_id: Option<Uuid>, range: DateRange) -> Result<Vec<DailySample>, DomainError> {
        let seed = self
            .utilization
            .find_latest_before(warehouse_id, range.start)
            .await?;
        let rows = self
            .utilization
            .find_range(warehouse_id, range.start, range.end)
            .await?;

        Ok(seed
            .iter()
            .chain(rows.iter())
            .map(DailyUtilization::sample)
            .collect())
    }
}
