//! Daily utilization repository trait (port)

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;
use crate::domain::DailyUtilization;
use crate::error::DomainError;

/// `warehouse_id == None` addresses the all-warehouses rows.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UtilizationRepository: Send + Sync {
    /// Rows with `start <= date <= end`, ascending by date.
    async fn find_range(
        &self,
        warehouse_id: Option<Uuid>,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailyUtilization>, DomainError>;

    /// Most recent row strictly before `date`.
    async fn find_latest_before(
        &self,
        warehouse_id: Option<Uuid>,
        date: NaiveDate,
    ) -> Result<Option<DailyUtilization>, DomainError>;

    /// Insert, or replace the row with the same date and scope.
    async fn upsert(&self, record: &DailyUtilization) -> Result<DailyUtilization, DomainError>;
}
