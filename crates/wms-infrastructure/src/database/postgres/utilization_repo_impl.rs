// ============================================================================
// WMS Infrastructure - PostgreSQL Daily Utilization Repository
// File: crates/wms-infrastructure/src/database/postgres/utilization_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, PgPool};
use tracing::{debug, error};
use uuid::Uuid;

use wms_core::domain::DailyUtilization;
use wms_core::error::DomainError;
use wms_core::repositories::UtilizationRepository;

pub struct PgUtilizationRepository {
    pool: PgPool,
}

impl PgUtilizationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct DailyUtilizationRow {
    pub id: Uuid,
    pub warehouse_id: Option<Uuid>,
    pub date: NaiveDate,
    pub total_space: i32,
    pub utilized_space: i32,
    pub utilization_percent: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<DailyUtilizationRow> for DailyUtilization {
    fn from(row: DailyUtilizationRow) -> Self {
        DailyUtilization {
            id: row.id,
            warehouse_id: row.warehouse_id,
            date: row.date,
            total_space: row.total_space,
            utilized_space: row.utilized_space,
            utilization_percent: row.utilization_percent,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl UtilizationRepository for PgUtilizationRepository {
    async fn find_range(
        &self,
        warehouse_id: Option<Uuid>,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailyUtilization>, DomainError> {
        let rows: Vec<DailyUtilizationRow> = sqlx::query_as(
            r#"
            SELECT id, warehouse_id, date, total_space, utilized_space,
                   utilization_percent, created_at, updated_at
            FROM daily_utilization
            WHERE warehouse_id IS NOT DISTINCT FROM $1
              AND date BETWEEN $2 AND $3
            ORDER BY date
            "#
        )
        .bind(warehouse_id)
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error reading utilization history: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    async fn find_latest_before(
        &self,
        warehouse_id: Option<Uuid>,
        date: NaiveDate,
    ) -> Result<Option<DailyUtilization>, DomainError> {
        let row: Option<DailyUtilizationRow> = sqlx::query_as(
            r#"
            SELECT id, warehouse_id, date, total_space, utilized_space,
                   utilization_percent, created_at, updated_at
            FROM daily_utilization
            WHERE warehouse_id IS NOT DISTINCT FROM $1
              AND date < $2
            ORDER BY date DESC
            LIMIT 1
            "#
        )
        .bind(warehouse_id)
        .bind(date)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error reading utilization seed: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(row.map(|r| r.into()))
    }

    async fn upsert(&self, record: &DailyUtilization) -> Result<DailyUtilization, DomainError> {
        debug!("Upserting utilization for {} ({:?})", record.date, record.warehouse_id);

        let row: DailyUtilizationRow = sqlx::query_as(
            r#"
            INSERT INTO daily_utilization (
                id, warehouse_id, date, total_space, utilized_space,
                utilization_percent, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT ON CONSTRAINT uq_daily_utilization_scope_date DO UPDATE
            SET total_space = EXCLUDED.total_space,
                utilized_space = EXCLUDED.utilized_space,
                utilization_percent = EXCLUDED.utilization_percent,
                updated_at = EXCLUDED.updated_at
            RETURNING id, warehouse_id, date, total_space, utilized_space,
                      utilization_percent, created_at, updated_at
            "#
        )
        .bind(record.id)
        .bind(record.warehouse_id)
        .bind(record.date)
        .bind(record.total_space)
        .bind(record.utilized_space)
        .bind(record.utilization_percent)
        .bind(record.created_at)
        .bind(record.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error upserting utilization: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(row.into())
    }
}
