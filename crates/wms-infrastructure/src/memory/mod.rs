//! In-memory repositories backed by `DashMap`.
//!
//! Used by `storage.backend = "memory"` and by the HTTP tests. Data lives
//! only as long as the process.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tracing::debug;
use uuid::Uuid;

use wms_core::domain::{DailyUtilization, GroupId, Section, SectionStatus, Warehouse};
use wms_core::error::DomainError;
use wms_core::repositories::{SectionRepository, UtilizationRepository, WarehouseRepository};

#[derive(Default)]
pub struct MemoryStore {
    warehouses: DashMap<Uuid, Warehouse>,
    letters: DashMap<GroupId, Uuid>,
    sections: DashMap<Uuid, Section>,
    utilization: DashMap<(Option<Uuid>, NaiveDate), DailyUtilization>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl WarehouseRepository for MemoryStore {
    async fn list(&self) -> Result<Vec<Warehouse>, DomainError> {
        let mut all: Vec<Warehouse> = self.warehouses.iter().map(|r| r.value().clone()).collect();
        all.sort_by(|a, b| a.letter.cmp(&b.letter));
        Ok(all)
    }

    async fn find_by_letter(&self, letter: &GroupId) -> Result<Option<Warehouse>, DomainError> {
        let Some(id) = self.letters.get(letter).map(|r| *r.value()) else {
            return Ok(None);
        };
        Ok(self.warehouses.get(&id).map(|r| r.value().clone()))
    }

    async fn create(&self, warehouse: &Warehouse) -> Result<Warehouse, DomainError> {
        match self.letters.entry(warehouse.letter.clone()) {
            Entry::Occupied(_) => Err(DomainError::IdentifierConflict {
                letter: warehouse.letter.to_string(),
                existing: warehouse.letter.to_string(),
            }),
            Entry::Vacant(slot) => {
                slot.insert(warehouse.id);
                self.warehouses.insert(warehouse.id, warehouse.clone());
                debug!("Stored warehouse {}", warehouse.letter);
                Ok(warehouse.clone())
            }
        }
    }

    async fn touch(&self, id: &Uuid, at: DateTime<Utc>) -> Result<(), DomainError> {
        if let Some(mut warehouse) = self.warehouses.get_mut(id) {
            warehouse.touch(at);
        }
        Ok(())
    }

    async fn delete(&self, id: &Uuid) -> Result<(), DomainError> {
        let (_, removed) = self
            .warehouses
            .remove(id)
            .ok_or_else(|| DomainError::WarehouseNotFound(id.to_string()))?;
        self.letters.remove(&removed.letter);
        self.sections.retain(|_, section| section.warehouse_id != *id);
        Ok(())
    }
}

#[async_trait]
impl SectionRepository for MemoryStore {
    async fn list_all(&self) -> Result<Vec<Section>, DomainError> {
        let mut all: Vec<Section> = self.sections.iter().map(|r| r.value().clone()).collect();
        all.sort_by(|a, b| a.key.cmp(&b.key));
        Ok(all)
    }

    async fn list_by_warehouse(&self, warehouse_id: &Uuid) -> Result<Vec<Section>, DomainError> {
        let mut owned: Vec<Section> = self
            .sections
            .iter()
            .filter(|r| r.warehouse_id == *warehouse_id)
            .map(|r| r.value().clone())
            .collect();
        owned.sort_by_key(|s| s.key.number);
        Ok(owned)
    }

    async fn find_by_number(&self, warehouse_id: &Uuid, number: u32) -> Result<Option<Section>, DomainError> {
        Ok(self
            .sections
            .iter()
            .find(|r| r.warehouse_id == *warehouse_id && r.key.number == number)
            .map(|r| r.value().clone()))
    }

    async fn insert_many(&self, sections: &[Section]) -> Result<Vec<Section>, DomainError> {
        for section in sections {
            self.sections.insert(section.id, section.clone());
        }
        Ok(sections.to_vec())
    }

    async fn update_status(&self, id: &Uuid, status: SectionStatus, at: DateTime<Utc>) -> Result<Section, DomainError> {
        let mut section = self
            .sections
            .get_mut(id)
            .ok_or_else(|| DomainError::SectionNotFound(id.to_string()))?;
        section.status = status;
        section.updated_at = at;
        Ok(section.value().clone())
    }

    async fn delete_many(&self, ids: &[Uuid]) -> Result<u64, DomainError> {
        Ok(ids
            .iter()
            .filter(|id| self.sections.remove(*id).is_some())
            .count() as u64)
    }
}

#[async_trait]
impl UtilizationRepository for MemoryStore {
    async fn find_range(
        &self,
        warehouse_id: Option<Uuid>,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailyUtilization>, DomainError> {
        let mut rows: Vec<DailyUtilization> = self
            .utilization
            .iter()
            .filter(|r| r.warehouse_id == warehouse_id && r.date >= start && r.date <= end)
            .map(|r| r.value().clone())
            .collect();
        rows.sort_by_key(|r| r.date);
        Ok(rows)
    }

    async fn find_latest_before(
        &self,
        warehouse_id: Option<Uuid>,
        date: NaiveDate,
    ) -> Result<Option<DailyUtilization>, DomainError> {
        Ok(self
            .utilization
            .iter()
            .filter(|r| r.warehouse_id == warehouse_id && r.date < date)
            .max_by_key(|r| r.date)
            .map(|r| r.value().clone()))
    }

    async fn upsert(&self, record: &DailyUtilization) -> Result<DailyUtilization, DomainError> {
        let key = (record.warehouse_id, record.date);
        let stored = match self.utilization.entry(key) {
            Entry::Occupied(mut existing) => {
                let row = existing.get_mut();
                row.total_space = record.total_space;
                row.utilized_space = record.utilized_space;
                row.utilization_percent = record.utilization_percent;
                row.updated_at = record.updated_at;
                row.clone()
            }
            Entry::Vacant(slot) => slot.insert(record.clone()).value().clone(),
        };
        Ok(stored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wms_core::domain::{NewWarehouse, SectionKey, WarehouseKind};

    fn warehouse(letter: &str) -> Warehouse {
        Warehouse::new(&NewWarehouse {
            letter: letter.to_string(),
            name: format!("Warehouse {letter}"),
            kind: WarehouseKind::Indoor,
            sections: None,
        })
        .unwrap()
    }

    fn record(warehouse_id: Option<Uuid>, day: u32, percent: f64) -> DailyUtilization {
        let now = Utc::now();
        DailyUtilization {
            id: Uuid::new_v4(),
            warehouse_id,
            date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            total_space: 4,
            utilized_space: 0,
            utilization_percent: percent,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_duplicate_letter_is_rejected() {
        let store = MemoryStore::new();
        store.create(&warehouse("A")).await.unwrap();
        let result = store.create(&warehouse("A")).await;
        assert!(matches!(result, Err(DomainError::IdentifierConflict { .. })));
    }

    #[tokio::test]
    async fn test_delete_cascades_sections() {
        let store = MemoryStore::new();
        let a = store.create(&warehouse("A")).await.unwrap();
        let b = store.create(&warehouse("B")).await.unwrap();
        store
            .insert_many(&[
                Section::new(a.id, SectionKey::new(a.letter.clone(), 1), 0),
                Section::new(b.id, SectionKey::new(b.letter.clone(), 1), 0),
            ])
            .await
            .unwrap();

        store.delete(&a.id).await.unwrap();

        let remaining = store.list_all().await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].key.to_string(), "B1");
        assert!(store.find_by_letter(&a.letter).await.unwrap().is_none());
        // the letter is free again
        store.create(&warehouse("A")).await.unwrap();
    }

    #[tokio::test]
    async fn test_upsert_replaces_same_day() {
        let store = MemoryStore::new();
        store.upsert(&record(None, 1, 10.0)).await.unwrap();
        store.upsert(&record(None, 1, 40.0)).await.unwrap();
        store.upsert(&record(None, 3, 60.0)).await.unwrap();

        let rows = store
            .find_range(None, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), NaiveDate::from_ymd_opt(2024, 1, 31).unwrap())
            .await
            .unwrap();
        let values: Vec<f64> = rows.iter().map(|r| r.utilization_percent).collect();
        assert_eq!(values, vec![40.0, 60.0]);
    }

    #[tokio::test]
    async fn test_latest_before_is_scoped() {
        let store = MemoryStore::new();
        let id = Uuid::new_v4();
        store.upsert(&record(None, 1, 10.0)).await.unwrap();
        store.upsert(&record(Some(id), 2, 90.0)).await.unwrap();

        let seed = store
            .find_latest_before(None, NaiveDate::from_ymd_opt(2024, 1, 5).unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(seed.utilization_percent, 10.0);
    }
}
