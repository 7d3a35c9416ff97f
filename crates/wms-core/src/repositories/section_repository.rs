//! Section repository trait (port)

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;
use crate::domain::{Section, SectionStatus};
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SectionRepository: Send + Sync {
    async fn list_all(&self) -> Result<Vec<Section>, DomainError>;
    /// Sections of one warehouse ordered by section number.
    async fn list_by_warehouse(&self, warehouse_id: &Uuid) -> Result<Vec<Section>, DomainError>;
    async fn find_by_number(&self, warehouse_id: &Uuid, number: u32) -> Result<Option<Section>, DomainError>;
    async fn insert_many(&self, sections: &[Section]) -> Result<Vec<Section>, DomainError>;
    async fn update_status(&self, id: &Uuid, status: SectionStatus, at: DateTime<Utc>) -> Result<Section, DomainError>;
    async fn delete_many(&self, ids: &[Uuid]) -> Result<u64, DomainError>;
}
