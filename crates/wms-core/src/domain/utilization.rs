//! Daily utilization records

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One point of a utilization series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailySample {
    pub date: NaiveDate,
    pub utilization_percent: f64,
}

impl DailySample {
    pub fn new(date: NaiveDate, utilization_percent: f64) -> Self {
        Self {
            date,
            utilization_percent: utilization_percent.clamp(0.0, 100.0),
        }
    }
}

/// Persisted daily snapshot. `warehouse_id == None` is the all-warehouses row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyUtilization {
    pub id: Uuid,
    pub warehouse_id: Option<Uuid>,
    pub date: NaiveDate,
    pub total_space: i32,
    pub utilized_space: i32,
    pub utilization_percent: f64,

    // Audit fields
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DailyUtilization {
    pub fn sample(&self) -> DailySample {
        DailySample::new(self.date, self.utilization_percent)
    }
}
