// ============================================================================
// WMS Infrastructure - PostgreSQL Section Repository
// File: crates/wms-infrastructure/src/database/postgres/section_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::{debug, error};
use uuid::Uuid;

use wms_core::domain::{GroupId, Section, SectionKey, SectionStatus};
use wms_core::error::DomainError;
use wms_core::repositories::SectionRepository;

pub struct PgSectionRepository {
    pool: PgPool,
}

impl PgSectionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Section joined with its warehouse letter
#[derive(Debug, FromRow)]
struct SectionRow {
    pub id: Uuid,
    pub warehouse_id: Uuid,
    pub letter: String,
    pub section_number: i32,
    pub status: String,
    pub position: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<SectionRow> for Section {
    type Error = DomainError;

    fn try_from(row: SectionRow) -> Result<Self, Self::Error> {
        let number = u32::try_from(row.section_number)
            .map_err(|_| DomainError::InvalidSectionKey(format!("{}{}", row.letter, row.section_number)))?;

        Ok(Section {
            id: row.id,
            warehouse_id: row.warehouse_id,
            key: SectionKey::new(GroupId::parse(&row.letter)?, number),
            status: SectionStatus::from_str(&row.status)
                .ok_or_else(|| DomainError::DatabaseError(format!("unknown section status '{}'", row.status)))?,
            position: row.position,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn db_error(context: &str, e: sqlx::Error) -> DomainError {
    error!("Database error {}: {}", context, e);
    DomainError::DatabaseError(e.to_string())
}

#[async_trait]
impl SectionRepository for PgSectionRepository {
    async fn list_all(&self) -> Result<Vec<Section>, DomainError> {
        let rows: Vec<SectionRow> = sqlx::query_as(
            r#"
            SELECT s.id, s.warehouse_id, w.letter, s.section_number, s.status,
                   s.position, s.created_at, s.updated_at
            FROM warehouse_sections s
            JOIN warehouses w ON w.id = s.warehouse_id
            ORDER BY w.letter, s.section_number
            "#
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("listing sections", e))?;

        rows.into_iter().map(Section::try_from).collect()
    }

    async fn list_by_warehouse(&self, warehouse_id: &Uuid) -> Result<Vec<Section>, DomainError> {
        let rows: Vec<SectionRow> = sqlx::query_as(
            r#"
            SELECT s.id, s.warehouse_id, w.letter, s.section_number, s.status,
                   s.position, s.created_at, s.updated_at
            FROM warehouse_sections s
            JOIN warehouses w ON w.id = s.warehouse_id
            WHERE s.warehouse_id = $1
            ORDER BY s.section_number
            "#
        )
        .bind(warehouse_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("listing warehouse sections", e))?;

        rows.into_iter().map(Section::try_from).collect()
    }

    async fn find_by_number(&self, warehouse_id: &Uuid, number: u32) -> Result<Option<Section>, DomainError> {
        let row: Option<SectionRow> = sqlx::query_as(
            r#"
            SELECT s.id, s.warehouse_id, w.letter, s.section_number, s.status,
                   s.position, s.created_at, s.updated_at
            FROM warehouse_sections s
            JOIN warehouses w ON w.id = s.warehouse_id
            WHERE s.warehouse_id = $1 AND s.section_number = $2
            "#
        )
        .bind(warehouse_id)
        .bind(number as i32)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("finding section", e))?;

        row.map(Section::try_from).transpose()
    }

    async fn insert_many(&self, sections: &[Section]) -> Result<Vec<Section>, DomainError> {
        let mut transaction = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("starting section insert", e))?;

        for section in sections {
            sqlx::query(
                r#"
                INSERT INTO warehouse_sections
                    (id, warehouse_id, section_number, status, position, created_at, updated_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                "#
            )
            .bind(section.id)
            .bind(section.warehouse_id)
            .bind(section.key.number as i32)
            .bind(section.status.as_str())
            .bind(section.position)
            .bind(section.created_at)
            .bind(section.updated_at)
            .execute(&mut *transaction)
            .await
            .map_err(|e| db_error("inserting section", e))?;
        }

        transaction
            .commit()
            .await
            .map_err(|e| db_error("committing section insert", e))?;

        debug!("Inserted {} sections", sections.len());
        Ok(sections.to_vec())
    }

    async fn update_status(&self, id: &Uuid, status: SectionStatus, at: DateTime<Utc>) -> Result<Section, DomainError> {
        let row: Option<SectionRow> = sqlx::query_as(
            r#"
            WITH updated AS (
                UPDATE warehouse_sections
                SET status = $2, updated_at = $3
                WHERE id = $1
                RETURNING id, warehouse_id, section_number, status, position, created_at, updated_at
            )
            SELECT u.id, u.warehouse_id, w.letter, u.section_number, u.status,
                   u.position, u.created_at, u.updated_at
            FROM updated u
            JOIN warehouses w ON w.id = u.warehouse_id
            "#
        )
        .bind(id)
        .bind(status.as_str())
        .bind(at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("updating section status", e))?;

        row.ok_or_else(|| DomainError::SectionNotFound(id.to_string()))?
            .try_into()
    }

    async fn delete_many(&self, ids: &[Uuid]) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM warehouse_sections WHERE id = ANY($1)")
            .bind(ids)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("deleting sections", e))?;

        Ok(result.rows_affected())
    }
}
