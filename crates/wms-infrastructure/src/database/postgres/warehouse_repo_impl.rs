// ============================================================================
// WMS Infrastructure - PostgreSQL Warehouse Repository
// File: crates/wms-infrastructure/src/database/postgres/warehouse_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::{error, info};
use uuid::Uuid;

use wms_core::domain::{GroupId, Warehouse, WarehouseKind};
use wms_core::error::DomainError;
use wms_core::repositories::WarehouseRepository;

pub struct PgWarehouseRepository {
    pool: PgPool,
}

impl PgWarehouseRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal row type for SQLx mapping
#[derive(Debug, FromRow)]
struct WarehouseRow {
    pub id: Uuid,
    pub letter: String,
    pub name: String,
    #[sqlx(rename = "type")]
    pub kind: String,
    pub last_modified: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<WarehouseRow> for Warehouse {
    type Error = DomainError;

    fn try_from(row: WarehouseRow) -> Result<Self, Self::Error> {
        Ok(Warehouse {
            id: row.id,
            letter: GroupId::parse(&row.letter)?,
            name: row.name,
            kind: WarehouseKind::from_str(&row.kind)
                .ok_or_else(|| DomainError::DatabaseError(format!("unknown warehouse type '{}'", row.kind)))?,
            last_modified: row.last_modified,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[async_trait]
impl WarehouseRepository for PgWarehouseRepository {
    async fn list(&self) -> Result<Vec<Warehouse>, DomainError> {
        let rows: Vec<WarehouseRow> = sqlx::query_as(
            r#"
            SELECT id, letter, name, type, last_modified, created_at, updated_at
            FROM warehouses
            ORDER BY letter
            "#
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error listing warehouses: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        rows.into_iter().map(Warehouse::try_from).collect()
    }

    async fn find_by_letter(&self, letter: &GroupId) -> Result<Option<Warehouse>, DomainError> {
        let row: Option<WarehouseRow> = sqlx::query_as(
            r#"
            SELECT id, letter, name, type, last_modified, created_at, updated_at
            FROM warehouses
            WHERE letter = $1
            "#
        )
        .bind(letter.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error finding warehouse {}: {}", letter, e);
            DomainError::DatabaseError(e.to_string())
        })?;

        row.map(Warehouse::try_from).transpose()
    }

    async fn create(&self, warehouse: &Warehouse) -> Result<Warehouse, DomainError> {
        info!("Creating warehouse: {}", warehouse.letter);

        let db_error = |context: &str, e: sqlx::Error| {
            error!("Database error {} warehouse {}: {}", context, warehouse.letter, e);
            DomainError::DatabaseError(e.to_string())
        };

        let mut transaction = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("starting create for", e))?;

        // Serializes overlap checks across server instances; reads stay unblocked.
        sqlx::query("LOCK TABLE warehouses IN SHARE ROW EXCLUSIVE MODE")
            .execute(&mut *transaction)
            .await
            .map_err(|e| db_error("locking for", e))?;

        let overlapping: Option<String> = sqlx::query_scalar(
            r#"
            SELECT letter FROM warehouses
            WHERE starts_with(letter, $1) OR starts_with($1, letter)
            LIMIT 1
            "#
        )
        .bind(warehouse.letter.as_str())
        .fetch_optional(&mut *transaction)
        .await
        .map_err(|e| db_error("checking identifier of", e))?;

        if let Some(existing) = overlapping {
            return Err(DomainError::IdentifierConflict {
                letter: warehouse.letter.to_string(),
                existing,
            });
        }

        let row: WarehouseRow = sqlx::query_as(
            r#"
            INSERT INTO warehouses (id, letter, name, type, last_modified, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, letter, name, type, last_modified, created_at, updated_at
            "#
        )
        .bind(warehouse.id)
        .bind(warehouse.letter.as_str())
        .bind(&warehouse.name)
        .bind(warehouse.kind.as_str())
        .bind(warehouse.last_modified)
        .bind(warehouse.created_at)
        .bind(warehouse.updated_at)
        .fetch_one(&mut *transaction)
        .await
        .map_err(|e| db_error("inserting", e))?;

        transaction
            .commit()
            .await
            .map_err(|e| db_error("committing", e))?;

        row.try_into()
    }

    async fn touch(&self, id: &Uuid, at: DateTime<Utc>) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            UPDATE warehouses
            SET last_modified = $2, updated_at = $2
            WHERE id = $1
            "#
        )
        .bind(id)
        .bind(at)
        .execute(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error touching warehouse: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(())
    }

    async fn delete(&self, id: &Uuid) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM warehouses WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e: sqlx::Error| {
                error!("Database error deleting warehouse: {}", e);
                DomainError::DatabaseError(e.to_string())
            })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::WarehouseNotFound(id.to_string()));
        }
        Ok(())
    }
}
