//! Warehouse repository trait (port)

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;
use crate::domain::{GroupId, Warehouse};
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WarehouseRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Warehouse>, DomainError>;
    async fn find_by_letter(&self, letter: &GroupId) -> Result<Option<Warehouse>, DomainError>;
    /// Rejects an identifier that is already taken with `IdentifierConflict`.
    async fn create(&self, warehouse: &Warehouse) -> Result<Warehouse, DomainError>;
    async fn touch(&self, id: &Uuid, at: DateTime<Utc>) -> Result<(), DomainError>;
    /// Deletes the warehouse and, with it, its sections.
    async fn delete(&self, id: &Uuid) -> Result<(), DomainError>;
}
