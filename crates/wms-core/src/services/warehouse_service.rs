// ============================================================================
// WMS Core - Warehouse Service
// File: crates/wms-core/src/services/warehouse_service.rs
// ============================================================================
//! Warehouse and section lifecycle: create, toggle, add/remove sections,
//! delete with a short undo window.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::calculations::aggregator::{self, Scope, StatusMap, UtilizationStats};
use crate::domain::{GroupId, NewWarehouse, Section, SectionKey, Warehouse, WarehouseKind};
use crate::error::DomainError;
use crate::repositories::{SectionRepository, WarehouseRepository};
use crate::state::{UndoMiss, UndoSlot};
use wms_shared::constants::{DEFAULT_INITIAL_SECTIONS, MAX_SECTIONS_PER_REQUEST, SECTIONS_PER_ROW};

/// A deleted warehouse with the sections it owned.
#[derive(Debug, Clone, Serialize)]
pub struct DeletedWarehouse {
    pub warehouse: Warehouse,
    pub sections: Vec<Section>,
}

/// Warehouse plus its current utilization.
#[derive(Debug, Clone, Serialize)]
pub struct WarehouseOverview {
    pub warehouse: Warehouse,
    pub stats: UtilizationStats,
}

/// Clamp a requested section count into `1..=MAX_SECTIONS_PER_REQUEST`.
pub fn clamp_section_count(requested: u32) -> u32 {
    requested.clamp(1, MAX_SECTIONS_PER_REQUEST)
}

pub struct WarehouseService {
    warehouses: Arc<dyn WarehouseRepository>,
    sections: Arc<dyn SectionRepository>,
    undo_window_ms: i64,
    undo: Mutex<UndoSlot<DeletedWarehouse>>,
    // Held from the identifier overlap check until the warehouse row exists.
    identifiers: Mutex<()>,
}

impl WarehouseService {
    pub fn new(
        warehouses: Arc<dyn WarehouseRepository>,
        sections: Arc<dyn SectionRepository>,
        undo_window_ms: i64,
    ) -> Self {
        Self {
            warehouses,
            sections,
            undo_window_ms,
            undo: Mutex::new(UndoSlot::new(undo_window_ms)),
            identifiers: Mutex::new(()),
        }
    }

    pub fn undo_window_ms(&self) -> i64 {
        self.undo_window_ms
    }

    pub async fn list(&self) -> Result<Vec<WarehouseOverview>, DomainError> {
        let warehouses = self.warehouses.list().await?;
        let sections = self.sections.list_all().await?;

        let mut by_warehouse: HashMap<Uuid, Vec<Section>> = HashMap::new();
        for section in sections {
            by_warehouse.entry(section.warehouse_id).or_default().push(section);
        }

        Ok(warehouses
            .into_iter()
            .map(|warehouse| {
                let stats = by_warehouse
                    .get(&warehouse.id)
                    .map(|owned| UtilizationStats::from_statuses(owned.iter().map(|s| &s.status)))
                    .unwrap_or_default();
                WarehouseOverview { warehouse, stats }
            })
            .collect())
    }

    pub async fn get(&self, letter: &GroupId) -> Result<Warehouse, DomainError> {
        self.warehouses
            .find_by_letter(letter)
            .await?
            .ok_or_else(|| DomainError::WarehouseNotFound(letter.to_string()))
    }

    /// Create a warehouse with its initial sections (all available).
    pub async fn create(&self, request: &NewWarehouse) -> Result<(Warehouse, Vec<Section>), DomainError> {
        let warehouse = Warehouse::new(request)?;
        info!("Creating warehouse {} ({})", warehouse.letter, warehouse.name);

        let _identifiers = self.identifiers.lock().await;
        self.ensure_identifier_free(&warehouse.letter).await?;

        let count = clamp_section_count(request.sections.unwrap_or(DEFAULT_INITIAL_SECTIONS));
        let sections: Vec<Section> = (1..=count)
            .map(|number| {
                Section::new(
                    warehouse.id,
                    SectionKey::new(warehouse.letter.clone(), number),
                    number as i32 - 1,
                )
            })
            .collect();
        let (created, sections) = self.insert_with_sections(&warehouse, &sections).await?;

        info!("Warehouse {} created with {} sections", created.letter, sections.len());
        Ok((created, sections))
    }

    pub async fn sections(&self, letter: &GroupId) -> Result<Vec<Section>, DomainError> {
        let warehouse = self.get(letter).await?;
        self.sections.list_by_warehouse(&warehouse.id).await
    }

    /// Append `count` sections (clamped) after the highest existing number.
    pub async fn add_sections(&self, letter: &GroupId, count: u32) -> Result<Vec<Section>, DomainError> {
        let warehouse = self.get(letter).await?;
        let existing = self.sections.list_by_warehouse(&warehouse.id).await?;
        let count = clamp_section_count(count);

        let next_number = existing.iter().map(|s| s.key.number).max().unwrap_or(0) + 1;
        let next_position = existing.iter().map(|s| s.position).max().map_or(0, |p| p + 1);

        let new_sections: Vec<Section> = (0..count)
            .map(|offset| {
                Section::new(
                    warehouse.id,
                    SectionKey::new(warehouse.letter.clone(), next_number + offset),
                    next_position + offset as i32,
                )
            })
            .collect();

        let inserted = self.sections.insert_many(&new_sections).await?;
        self.warehouses.touch(&warehouse.id, Utc::now()).await?;
        debug!("Added {} sections to warehouse {}", inserted.len(), letter);
        Ok(inserted)
    }

    pub async fn toggle_section(&self, letter: &GroupId, number: u32) -> Result<Section, DomainError> {
        let warehouse = self.get(letter).await?;
        let section = self.find_section(&warehouse, number).await?;
        let now = Utc::now();

        let updated = self
            .sections
            .update_status(&section.id, section.status.toggled(), now)
            .await?;
        self.warehouses.touch(&warehouse.id, now).await?;

        debug!("Section {} is now {}", updated.key, updated.status.as_str());
        Ok(updated)
    }

    pub async fn delete_section(&self, letter: &GroupId, number: u32) -> Result<Section, DomainError> {
        let warehouse = self.get(letter).await?;
        let section = self.find_section(&warehouse, number).await?;

        self.sections.delete_many(&[section.id]).await?;
        self.warehouses.touch(&warehouse.id, Utc::now()).await?;
        info!("Deleted section {}", section.key);
        Ok(section)
    }

    /// Remove the highest-numbered row of sections.
    pub async fn delete_last_row(&self, letter: &GroupId) -> Result<Vec<Section>, DomainError> {
        let warehouse = self.get(letter).await?;
        let mut sections = self.sections.list_by_warehouse(&warehouse.id).await?;
        if sections.len() < SECTIONS_PER_ROW {
            return Err(DomainError::NoCompleteRow(letter.to_string()));
        }

        sections.sort_by_key(|s| s.key.number);
        let row = sections.split_off(sections.len() - SECTIONS_PER_ROW);
        let ids: Vec<Uuid> = row.iter().map(|s| s.id).collect();

        self.sections.delete_many(&ids).await?;
        self.warehouses.touch(&warehouse.id, Utc::now()).await?;
        info!("Deleted last row ({} sections) of warehouse {}", row.len(), letter);
        Ok(row)
    }

    pub async fn delete(&self, letter: &GroupId) -> Result<DeletedWarehouse, DomainError> {
        self.delete_at(letter, Utc::now()).await
    }

    /// Delete a warehouse and remember it for undo until the window passes.
    pub async fn delete_at(&self, letter: &GroupId, now: DateTime<Utc>) -> Result<DeletedWarehouse, DomainError> {
        let warehouse = self.get(letter).await?;
        let sections = self.sections.list_by_warehouse(&warehouse.id).await?;

        self.warehouses.delete(&warehouse.id).await?;
        info!("Deleted warehouse {} with {} sections", letter, sections.len());

        let deleted = DeletedWarehouse { warehouse, sections };
        let mut undo = self.undo.lock().await;
        if let Some(discarded) = undo.record(deleted.clone(), now) {
            debug!("Undo for warehouse {} discarded", discarded.warehouse.letter);
        }
        Ok(deleted)
    }

    pub async fn restore(&self, letter: &GroupId) -> Result<DeletedWarehouse, DomainError> {
        self.restore_at(letter, Utc::now()).await
    }

    /// Re-create the most recently deleted warehouse if `letter` matches it and
    /// the undo window is still open. The undo entry is consumed only once the
    /// warehouse and its sections are stored again.
    pub async fn restore_at(&self, letter: &GroupId, now: DateTime<Utc>) -> Result<DeletedWarehouse, DomainError> {
        let mut undo = self.undo.lock().await;
        let pending = undo.current(now).map_err(|miss| match miss {
            UndoMiss::Empty => DomainError::NothingToUndo,
            UndoMiss::Expired => {
                warn!("Undo window expired for warehouse {}", letter);
                DomainError::UndoExpired(letter.to_string())
            }
        })?;
        if &pending.warehouse.letter != letter {
            return Err(DomainError::NothingToUndo);
        }
        let mut deleted = pending.clone();

        let _identifiers = self.identifiers.lock().await;
        self.ensure_identifier_free(letter).await?;

        deleted.warehouse.touch(now);
        let (warehouse, sections) = self
            .insert_with_sections(&deleted.warehouse, &deleted.sections)
            .await?;
        let _ = undo.take(now);
        info!("Restored warehouse {} with {} sections", letter, sections.len());

        Ok(DeletedWarehouse { warehouse, sections })
    }

    /// Current status map and warehouse kinds.
    pub async fn snapshot(&self) -> Result<(StatusMap, BTreeMap<GroupId, WarehouseKind>), DomainError> {
        let warehouses = self.warehouses.list().await?;
        let sections = self.sections.list_all().await?;

        let kinds = warehouses
            .iter()
            .map(|w| (w.letter.clone(), w.kind))
            .collect();
        let statuses = sections.into_iter().map(|s| (s.key, s.status)).collect();
        Ok((statuses, kinds))
    }

    pub async fn stats(&self, scope: &Scope) -> Result<UtilizationStats, DomainError> {
        if let Scope::Warehouse(letter) = scope {
            self.get(letter).await?;
        }
        let (statuses, kinds) = self.snapshot().await?;
        Ok(aggregator::for_scope(&statuses, &kinds, scope))
    }

    async fn find_section(&self, warehouse: &Warehouse, number: u32) -> Result<Section, DomainError> {
        self.sections
            .find_by_number(&warehouse.id, number)
            .await?
            .ok_or_else(|| DomainError::SectionNotFound(format!("{}{}", warehouse.letter, number)))
    }

    /// Store a warehouse row and then its sections. A failed section insert
    /// removes the warehouse row again so no empty warehouse is left behind.
    async fn insert_with_sections(
        &self,
        warehouse: &Warehouse,
        sections: &[Section],
    ) -> Result<(Warehouse, Vec<Section>), DomainError> {
        let created = self.warehouses.create(warehouse).await?;
        match self.sections.insert_many(sections).await {
            Ok(inserted) => Ok((created, inserted)),
            Err(e) => {
                warn!("Section insert for warehouse {} failed, removing it: {}", created.letter, e);
                if let Err(cleanup) = self.warehouses.delete(&created.id).await {
                    error!("Failed to remove warehouse {} after section insert error: {}", created.letter, cleanup);
                }
                Err(e)
            }
        }
    }

    async fn ensure_identifier_free(&self, letter: &GroupId) -> Result<(), DomainError> {
        let existing = self.warehouses.list().await?;
        if let Some(conflict) = existing.iter().find(|w| w.letter.overlaps(letter)) {
            warn!("Warehouse identifier {} conflicts with {}", letter, conflict.letter);
            return Err(DomainError::IdentifierConflict {
                letter: letter.to_string(),
                existing: conflict.letter.to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SectionStatus;
    use crate::repositories::{MockSectionRepository, MockWarehouseRepository};
    use async_trait::async_trait;
    use chrono::TimeZone;
    use mockall::predicate::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex as StdMutex;

    fn group(id: &str) -> GroupId {
        GroupId::parse(id).unwrap()
    }

    fn warehouse(letter: &str, kind: WarehouseKind) -> Warehouse {
        Warehouse::new(&NewWarehouse {
            letter: letter.to_string(),
            name: format!("Warehouse {letter}"),
            kind,
            sections: None,
        })
        .unwrap()
    }

    fn sections_for(warehouse: &Warehouse, statuses: &[SectionStatus]) -> Vec<Section> {
        statuses
            .iter()
            .enumerate()
            .map(|(i, status)| {
                let mut section = Section::new(
                    warehouse.id,
                    SectionKey::new(warehouse.letter.clone(), i as u32 + 1),
                    i as i32,
                );
                section.status = *status;
                section
            })
            .collect()
    }

    fn at(ms: i64) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(1_700_000_000_000 + ms).unwrap()
    }

    fn service(warehouses: MockWarehouseRepository, sections: MockSectionRepository) -> WarehouseService {
        WarehouseService::new(Arc::new(warehouses), Arc::new(sections), 3000)
    }

    #[tokio::test]
    async fn test_create_clamps_section_count() {
        let mut warehouses = MockWarehouseRepository::new();
        warehouses.expect_list().returning(|| Ok(vec![]));
        warehouses.expect_create().returning(|w| Ok(w.clone()));

        let mut sections = MockSectionRepository::new();
        sections
            .expect_insert_many()
            .withf(|s| s.len() == MAX_SECTIONS_PER_REQUEST as usize)
            .returning(|s| Ok(s.to_vec()));

        let (created, created_sections) = service(warehouses, sections)
            .create(&NewWarehouse {
                letter: "F".to_string(),
                name: "Yard F".to_string(),
                kind: WarehouseKind::Outdoor,
                sections: Some(10_000),
            })
            .await
            .unwrap();

        assert_eq!(created.letter, group("F"));
        assert_eq!(created_sections.first().unwrap().key.to_string(), "F1");
        assert!(created_sections.iter().all(|s| s.status == SectionStatus::Available));
    }

    #[tokio::test]
    async fn test_create_rejects_prefix_conflict() {
        let existing = warehouse("A", WarehouseKind::Indoor);
        let mut warehouses = MockWarehouseRepository::new();
        warehouses
            .expect_list()
            .returning(move || Ok(vec![existing.clone()]));
        warehouses.expect_create().never();

        let result = service(warehouses, MockSectionRepository::new())
            .create(&NewWarehouse {
                letter: "AB".to_string(),
                name: "Annex".to_string(),
                kind: WarehouseKind::Indoor,
                sections: None,
            })
            .await;

        assert!(matches!(result, Err(DomainError::IdentifierConflict { .. })));
    }

    #[tokio::test]
    async fn test_create_removes_warehouse_when_sections_fail() {
        let mut warehouses = MockWarehouseRepository::new();
        warehouses.expect_list().returning(|| Ok(vec![]));
        warehouses.expect_create().times(1).returning(|w| Ok(w.clone()));
        warehouses.expect_delete().times(1).returning(|_| Ok(()));

        let mut sections = MockSectionRepository::new();
        sections
            .expect_insert_many()
            .returning(|_| Err(DomainError::DatabaseError("insert failed".into())));

        let result = service(warehouses, sections)
            .create(&NewWarehouse {
                letter: "G".to_string(),
                name: "Yard G".to_string(),
                kind: WarehouseKind::Outdoor,
                sections: Some(2),
            })
            .await;

        assert!(matches!(result, Err(DomainError::DatabaseError(msg)) if msg == "insert failed"));
    }

    /// Warehouse store whose `list` yields, so concurrent creates interleave
    /// between the overlap check and the insert.
    #[derive(Default)]
    struct YieldingWarehouses {
        stored: StdMutex<Vec<Warehouse>>,
    }

    #[async_trait]
    impl WarehouseRepository for YieldingWarehouses {
        async fn list(&self) -> Result<Vec<Warehouse>, DomainError> {
            let snapshot = self.stored.lock().unwrap().clone();
            tokio::task::yield_now().await;
            Ok(snapshot)
        }

        async fn find_by_letter(&self, letter: &GroupId) -> Result<Option<Warehouse>, DomainError> {
            Ok(self.stored.lock().unwrap().iter().find(|w| &w.letter == letter).cloned())
        }

        async fn create(&self, warehouse: &Warehouse) -> Result<Warehouse, DomainError> {
            self.stored.lock().unwrap().push(warehouse.clone());
            Ok(warehouse.clone())
        }

        async fn touch(&self, _id: &Uuid, _at: DateTime<Utc>) -> Result<(), DomainError> {
            Ok(())
        }

        async fn delete(&self, id: &Uuid) -> Result<(), DomainError> {
            self.stored.lock().unwrap().retain(|w| w.id != *id);
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_concurrent_creates_cannot_both_claim_overlapping_identifiers() {
        let store = Arc::new(YieldingWarehouses::default());
        let mut sections = MockSectionRepository::new();
        sections.expect_insert_many().returning(|s| Ok(s.to_vec()));
        let service = WarehouseService::new(store.clone(), Arc::new(sections), 3000);

        let request = |letter: &str| NewWarehouse {
            letter: letter.to_string(),
            name: format!("Warehouse {letter}"),
            kind: WarehouseKind::Indoor,
            sections: Some(1),
        };
        let (a, ab) = (request("A"), request("AB"));

        let (first, second) = tokio::join!(service.create(&a), service.create(&ab));

        assert!(first.is_ok());
        assert!(matches!(second, Err(DomainError::IdentifierConflict { .. })));
        assert_eq!(store.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_add_sections_continues_after_highest_number() {
        let wh = warehouse("B", WarehouseKind::Indoor);
        let mut existing = sections_for(&wh, &[SectionStatus::Available; 3]);
        existing.remove(1); // B2 gone; B1 and B3 remain

        let mut warehouses = MockWarehouseRepository::new();
        let found = wh.clone();
        warehouses
            .expect_find_by_letter()
            .returning(move |_| Ok(Some(found.clone())));
        warehouses.expect_touch().times(1).returning(|_, _| Ok(()));

        let mut sections = MockSectionRepository::new();
        sections
            .expect_list_by_warehouse()
            .with(eq(wh.id))
            .returning(move |_| Ok(existing.clone()));
        sections.expect_insert_many().returning(|s| Ok(s.to_vec()));

        let added = service(warehouses, sections).add_sections(&group("B"), 2).await.unwrap();
        let keys: Vec<String> = added.iter().map(|s| s.key.to_string()).collect();
        assert_eq!(keys, vec!["B4", "B5"]);
        assert_eq!(added[0].position, 3);
    }

    #[tokio::test]
    async fn test_delete_last_row_requires_three_sections() {
        let wh = warehouse("C", WarehouseKind::Indoor);
        let existing = sections_for(&wh, &[SectionStatus::Available; 2]);

        let mut warehouses = MockWarehouseRepository::new();
        warehouses
            .expect_find_by_letter()
            .returning(move |_| Ok(Some(wh.clone())));

        let mut sections = MockSectionRepository::new();
        sections
            .expect_list_by_warehouse()
            .returning(move |_| Ok(existing.clone()));
        sections.expect_delete_many().never();

        let result = service(warehouses, sections).delete_last_row(&group("C")).await;
        assert!(matches!(result, Err(DomainError::NoCompleteRow(_))));
    }

    #[tokio::test]
    async fn test_delete_last_row_removes_highest_numbers() {
        let wh = warehouse("C", WarehouseKind::Indoor);
        let existing = sections_for(&wh, &[SectionStatus::Available; 5]);
        let expected: Vec<Uuid> = existing[2..].iter().map(|s| s.id).collect();

        let mut warehouses = MockWarehouseRepository::new();
        warehouses
            .expect_find_by_letter()
            .returning(move |_| Ok(Some(wh.clone())));
        warehouses.expect_touch().returning(|_, _| Ok(()));

        let mut sections = MockSectionRepository::new();
        sections
            .expect_list_by_warehouse()
            .returning(move |_| Ok(existing.clone()));
        sections
            .expect_delete_many()
            .withf(move |ids| ids.iter().eq(expected.iter()))
            .returning(|ids| Ok(ids.len() as u64));

        let removed = service(warehouses, sections).delete_last_row(&group("C")).await.unwrap();
        let numbers: Vec<u32> = removed.iter().map(|s| s.key.number).collect();
        assert_eq!(numbers, vec![3, 4, 5]);
    }

    #[tokio::test]
    async fn test_toggle_section_flips_status() {
        let wh = warehouse("D", WarehouseKind::Indoor);
        let section = sections_for(&wh, &[SectionStatus::Available]).remove(0);

        let mut warehouses = MockWarehouseRepository::new();
        warehouses
            .expect_find_by_letter()
            .returning(move |_| Ok(Some(wh.clone())));
        warehouses.expect_touch().returning(|_, _| Ok(()));

        let mut sections = MockSectionRepository::new();
        let found = section.clone();
        sections
            .expect_find_by_number()
            .with(always(), eq(1u32))
            .returning(move |_, _| Ok(Some(found.clone())));
        sections
            .expect_update_status()
            .with(eq(section.id), eq(SectionStatus::Occupied), always())
            .returning(move |_, status, _| {
                let mut updated = section.clone();
                updated.status = status;
                Ok(updated)
            });

        let updated = service(warehouses, sections).toggle_section(&group("D"), 1).await.unwrap();
        assert_eq!(updated.status, SectionStatus::Occupied);
    }

    #[tokio::test]
    async fn test_toggle_unknown_section() {
        let wh = warehouse("D", WarehouseKind::Indoor);
        let mut warehouses = MockWarehouseRepository::new();
        warehouses
            .expect_find_by_letter()
            .returning(move |_| Ok(Some(wh.clone())));

        let mut sections = MockSectionRepository::new();
        sections.expect_find_by_number().returning(|_, _| Ok(None));

        let result = service(warehouses, sections).toggle_section(&group("D"), 9).await;
        assert!(matches!(result, Err(DomainError::SectionNotFound(key)) if key == "D9"));
    }

    fn deletable() -> (MockWarehouseRepository, MockSectionRepository, Warehouse) {
        let wh = warehouse("E", WarehouseKind::Outdoor);
        let owned = sections_for(&wh, &[SectionStatus::Occupied, SectionStatus::Available]);

        let mut warehouses = MockWarehouseRepository::new();
        let found = wh.clone();
        warehouses
            .expect_find_by_letter()
            .returning(move |_| Ok(Some(found.clone())));
        warehouses.expect_delete().times(1).returning(|_| Ok(()));

        let mut sections = MockSectionRepository::new();
        sections
            .expect_list_by_warehouse()
            .returning(move |_| Ok(owned.clone()));

        (warehouses, sections, wh)
    }

    #[tokio::test]
    async fn test_restore_within_window() {
        let (mut warehouses, mut sections, wh) = deletable();
        warehouses.expect_list().returning(|| Ok(vec![]));
        warehouses.expect_create().times(1).returning(|w| Ok(w.clone()));
        sections
            .expect_insert_many()
            .withf(|s| s.len() == 2)
            .returning(|s| Ok(s.to_vec()));

        let service = service(warehouses, sections);
        service.delete_at(&group("E"), at(0)).await.unwrap();

        let restored = service.restore_at(&group("E"), at(2999)).await.unwrap();
        assert_eq!(restored.warehouse.id, wh.id);
        assert_eq!(restored.warehouse.last_modified, at(2999));
        assert_eq!(restored.sections[0].status, SectionStatus::Occupied);

        // the slot is consumed
        let again = service.restore_at(&group("E"), at(3000)).await;
        assert!(matches!(again, Err(DomainError::NothingToUndo)));
    }

    #[tokio::test]
    async fn test_restore_retry_after_transient_failure() {
        let (mut warehouses, mut sections, wh) = deletable();
        let calls = AtomicUsize::new(0);
        warehouses.expect_list().returning(move || {
            if calls.fetch_add(1, Ordering::SeqCst) == 0 {
                Err(DomainError::DatabaseError("transient".into()))
            } else {
                Ok(vec![])
            }
        });
        warehouses.expect_create().times(1).returning(|w| Ok(w.clone()));
        sections.expect_insert_many().times(1).returning(|s| Ok(s.to_vec()));

        let service = service(warehouses, sections);
        service.delete_at(&group("E"), at(0)).await.unwrap();

        let first = service.restore_at(&group("E"), at(100)).await;
        assert!(matches!(first, Err(DomainError::DatabaseError(_))));

        let retried = service.restore_at(&group("E"), at(200)).await.unwrap();
        assert_eq!(retried.warehouse.id, wh.id);
        assert_eq!(retried.sections.len(), 2);

        let again = service.restore_at(&group("E"), at(300)).await;
        assert!(matches!(again, Err(DomainError::NothingToUndo)));
    }

    #[tokio::test]
    async fn test_restore_after_window_expires() {
        let (mut warehouses, sections, _) = deletable();
        warehouses.expect_create().never();

        let service = service(warehouses, sections);
        service.delete_at(&group("E"), at(0)).await.unwrap();

        let result = service.restore_at(&group("E"), at(3000)).await;
        assert!(matches!(result, Err(DomainError::UndoExpired(_))));
    }

    #[tokio::test]
    async fn test_restore_other_letter_is_rejected() {
        let (mut warehouses, sections, _) = deletable();
        warehouses.expect_create().never();

        let service = service(warehouses, sections);
        service.delete_at(&group("E"), at(0)).await.unwrap();

        let result = service.restore_at(&group("F"), at(10)).await;
        assert!(matches!(result, Err(DomainError::NothingToUndo)));
    }

    #[tokio::test]
    async fn test_stats_by_scope() {
        let a = warehouse("A", WarehouseKind::Indoor);
        let e = warehouse("E", WarehouseKind::Outdoor);
        let mut all = sections_for(&a, &[SectionStatus::Occupied, SectionStatus::Available]);
        all.extend(sections_for(&e, &[SectionStatus::Occupied]));

        let listed = vec![a.clone(), e.clone()];
        let mut warehouses = MockWarehouseRepository::new();
        warehouses.expect_list().returning(move || Ok(listed.clone()));
        warehouses
            .expect_find_by_letter()
            .returning(move |_| Ok(Some(a.clone())));

        let mut sections = MockSectionRepository::new();
        sections.expect_list_all().returning(move || Ok(all.clone()));

        let service = service(warehouses, sections);
        assert_eq!(service.stats(&Scope::All).await.unwrap().utilization_percent, 67);
        assert_eq!(
            service
                .stats(&Scope::Kind(WarehouseKind::Outdoor))
                .await
                .unwrap()
                .utilization_percent,
            100
        );
        assert_eq!(
            service.stats(&Scope::Warehouse(group("A"))).await.unwrap().total_sections,
            2
        );

        let overview = service.list().await.unwrap();
        assert_eq!(overview.len(), 2);
        assert_eq!(overview[0].stats.utilization_percent, 50);
        assert!(overview[1].stats.is_full());
    }
}
