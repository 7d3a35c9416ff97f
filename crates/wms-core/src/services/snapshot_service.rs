// ============================================================================
// WMS Core - Snapshot Service
// File: crates/wms-core/src/services/snapshot_service.rs
// ============================================================================
//! Daily utilization snapshot, run by the scheduled job.

use chrono::{NaiveDate, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::calculations::UtilizationStats;
use crate::domain::{DailyUtilization, GroupId, SectionStatus};
use crate::error::DomainError;
use crate::repositories::{SectionRepository, UtilizationRepository, WarehouseRepository};

#[derive(Debug, Clone, Serialize)]
pub struct WarehouseSnapshot {
    pub letter: GroupId,
    pub stats: UtilizationStats,
}

#[derive(Debug, Clone, Serialize)]
pub struct SnapshotReport {
    pub date: NaiveDate,
    pub overall: UtilizationStats,
    pub warehouses: Vec<WarehouseSnapshot>,
}

pub struct SnapshotService {
    warehouses: Arc<dyn WarehouseRepository>,
    sections: Arc<dyn SectionRepository>,
    utilization: Arc<dyn UtilizationRepository>,
}

impl SnapshotService {
    pub fn new(
        warehouses: Arc<dyn WarehouseRepository>,
        sections: Arc<dyn SectionRepository>,
        utilization: Arc<dyn UtilizationRepository>,
    ) -> Self {
        Self {
            warehouses,
            sections,
            utilization,
        }
    }

    pub async fn record_today(&self) -> Result<SnapshotReport, DomainError> {
        self.record(Utc::now().date_naive()).await
    }

    /// Compute utilization for `date` and upsert one overall row plus one row
    /// per warehouse. Re-running on the same date replaces the rows.
    pub async fn record(&self, date: NaiveDate) -> Result<SnapshotReport, DomainError> {
        let warehouses = self.warehouses.list().await?;
        let sections = self.sections.list_all().await?;

        let mut by_warehouse: HashMap<Uuid, Vec<SectionStatus>> = HashMap::new();
        for section in &sections {
            by_warehouse
                .entry(section.warehouse_id)
                .or_default()
                .push(section.status);
        }

        let overall = UtilizationStats::from_statuses(sections.iter().map(|s| &s.status));
        self.utilization
            .upsert(&daily_record(None, date, &overall))
            .await?;

        let mut report = SnapshotReport {
            date,
            overall,
            warehouses: Vec::with_capacity(warehouses.len()),
        };

        for warehouse in warehouses {
            let stats = by_warehouse
                .get(&warehouse.id)
                .map(|statuses| UtilizationStats::from_statuses(statuses))
                .unwrap_or_default();
            self.utilization
                .upsert(&daily_record(Some(warehouse.id), date, &stats))
                .await?;
            report.warehouses.push(WarehouseSnapshot {
                letter: warehouse.letter,
                stats,
            });
        }

        info!(
            "Recorded utilization for {}: {}% across {} warehouses",
            date,
            overall.utilization_percent,
            report.warehouses.len()
        );
        Ok(report)
    }
}

fn daily_record(warehouse_id: Option<Uuid>, date: NaiveDate, stats: &UtilizationStats) -> DailyUtilization {
    let now = Utc::now();
    DailyUtilization {
        id: Uuid::new_v4(),
        warehouse_id,
        date,
        total_space: stats.total_sections as i32,
        utilized_space: stats.occupied_sections as i32,
        utilization_percent: f64::from(stats.utilization_percent),
        created_at: now,
        updated_at: now,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{NewWarehouse, Section, SectionKey, Warehouse, WarehouseKind};
    use crate::repositories::{MockSectionRepository, MockUtilizationRepository, MockWarehouseRepository};

    fn warehouse(letter: &str) -> Warehouse {
        Warehouse::new(&NewWarehouse {
            letter: letter.to_string(),
            name: format!("Warehouse {letter}"),
            kind: WarehouseKind::Indoor,
            sections: None,
        })
        .unwrap()
    }

    fn section(owner: &Warehouse, number: u32, status: SectionStatus) -> Section {
        let mut section = Section::new(owner.id, SectionKey::new(owner.letter.clone(), number), number as i32 - 1);
        section.status = status;
        section
    }

    #[tokio::test]
    async fn test_record_writes_overall_and_per_warehouse_rows() {
        let a = warehouse("A");
        let b = warehouse("B");
        let all = vec![
            section(&a, 1, SectionStatus::Occupied),
            section(&a, 2, SectionStatus::Available),
            section(&b, 1, SectionStatus::Occupied),
        ];
        let listed = vec![a.clone(), b.clone()];

        let mut warehouses = MockWarehouseRepository::new();
        warehouses.expect_list().returning(move || Ok(listed.clone()));
        let mut sections = MockSectionRepository::new();
        sections.expect_list_all().returning(move || Ok(all.clone()));

        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let mut utilization = MockUtilizationRepository::new();
        utilization
            .expect_upsert()
            .withf(move |r| r.warehouse_id.is_none() && r.date == date && r.utilization_percent == 67.0)
            .times(1)
            .returning(|r| Ok(r.clone()));
        let a_id = a.id;
        utilization
            .expect_upsert()
            .withf(move |r| r.warehouse_id == Some(a_id) && r.total_space == 2 && r.utilized_space == 1)
            .times(1)
            .returning(|r| Ok(r.clone()));
        let b_id = b.id;
        utilization
            .expect_upsert()
            .withf(move |r| r.warehouse_id == Some(b_id) && r.utilization_percent == 100.0)
            .times(1)
            .returning(|r| Ok(r.clone()));

        let service = SnapshotService::new(Arc::new(warehouses), Arc::new(sections), Arc::new(utilization));
        let report = service.record(date).await.unwrap();

        assert_eq!(report.overall.total_sections, 3);
        assert_eq!(report.warehouses.len(), 2);
        assert_eq!(report.warehouses[0].stats.utilization_percent, 50);
    }

    #[tokio::test]
    async fn test_record_with_no_warehouses() {
        let mut warehouses = MockWarehouseRepository::new();
        warehouses.expect_list().returning(|| Ok(vec![]));
        let mut sections = MockSectionRepository::new();
        sections.expect_list_all().returning(|| Ok(vec![]));
        let mut utilization = MockUtilizationRepository::new();
        utilization
            .expect_upsert()
            .withf(|r| r.total_space == 0 && r.utilization_percent == 0.0)
            .times(1)
            .returning(|r| Ok(r.clone()));

        let service = SnapshotService::new(Arc::new(warehouses), Arc::new(sections), Arc::new(utilization));
        let report = service
            .record(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap())
            .await
            .unwrap();
        assert!(report.warehouses.is_empty());
    }

    #[tokio::test]
    async fn test_record_propagates_storage_errors() {
        let mut warehouses = MockWarehouseRepository::new();
        warehouses
            .expect_list()
            .returning(|| Err(DomainError::DatabaseError("timeout".to_string())));

        let service = SnapshotService::new(
            Arc::new(warehouses),
            Arc::new(MockSectionRepository::new()),
            Arc::new(MockUtilizationRepository::new()),
        );
        let result = service.record(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()).await;
        assert!(matches!(result, Err(DomainError::DatabaseError(_))));
    }
}
