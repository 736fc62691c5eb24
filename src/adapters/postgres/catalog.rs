//! PostgreSQL implementation of the catalog ports.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::catalog::{Destination, Launchpad, LaunchpadStatus};
use crate::domain::foundation::{DestinationId, DomainError, ErrorCode, LaunchpadId};
use crate::ports::{DestinationCatalog, LaunchpadCatalog, LaunchpadCatalogWriter};

use super::errors::map_db_error;

/// Binds the launchpad id and the active status.
pub(super) const LAUNCHPAD_ACTIVE_SQL: &str =
    "SELECT EXISTS(SELECT 1 FROM launchpads WHERE id = $1 AND status = $2)";

/// Binds the destination id.
pub(super) const DESTINATION_EXISTS_SQL: &str =
    "SELECT EXISTS(SELECT 1 FROM destinations WHERE id = $1)";

/// Launchpads and destinations stored in PostgreSQL.
#[derive(Clone)]
pub struct PostgresCatalog {
    pool: PgPool,
}

impl PostgresCatalog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct LaunchpadRow {
    id: String,
    name: String,
    status: String,
}

impl TryFrom<LaunchpadRow> for Launchpad {
    type Error = DomainError;

    fn try_from(row: LaunchpadRow) -> Result<Self, Self::Error> {
        let id = LaunchpadId::new(row.id).map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Invalid launchpad id: {}", e))
        })?;
        Ok(Launchpad::new(id, row.name, LaunchpadStatus::parse(&row.status)))
    }
}

#[derive(Debug, sqlx::FromRow)]
struct DestinationRow {
    id: Uuid,
    name: String,
}

impl From<DestinationRow> for Destination {
    fn from(row: DestinationRow) -> Self {
        Destination::new(DestinationId::from_uuid(row.id), row.name)
    }
}

#[async_trait]
impl LaunchpadCatalog for PostgresCatalog {
    async fn find(&self, id: &LaunchpadId) -> Result<Option<Launchpad>, DomainError> {
        let row: Option<LaunchpadRow> =
            sqlx::query_as("SELECT id, name, status FROM launchpads WHERE id = $1")
                .bind(id.as_str())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| map_db_error("Failed to find launchpad", e))?;

        row.map(Launchpad::try_from).transpose()
    }

    async fn list_active(&self) -> Result<Vec<Launchpad>, DomainError> {
        let rows: Vec<LaunchpadRow> = sqlx::query_as(
            "SELECT id, name, status FROM launchpads WHERE status = $1 ORDER BY name",
        )
        .bind(LaunchpadStatus::Active.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_db_error("Failed to list launchpads", e))?;

        rows.into_iter().map(Launchpad::try_from).collect()
    }

    async fn exists_active(&self, id: &LaunchpadId) -> Result<bool, DomainError> {
        sqlx::query_scalar::<_, bool>(LAUNCHPAD_ACTIVE_SQL)
            .bind(id.as_str())
            .bind(LaunchpadStatus::Active.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_db_error("Failed to check launchpad", e))
    }
}

#[async_trait]
impl LaunchpadCatalogWriter for PostgresCatalog {
    async fn upsert_launchpad(&self, launchpad: &Launchpad) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO launchpads (id, name, status, updated_at)
            VALUES ($1, $2, $3, now())
            ON CONFLICT (id) DO UPDATE SET
                name = EXCLUDED.name,
                status = EXCLUDED.status,
                updated_at = now()
            "#,
        )
        .bind(launchpad.id.as_str())
        .bind(&launchpad.name)
        .bind(launchpad.status.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| map_db_error("Failed to upsert launchpad", e))?;

        Ok(())
    }
}

#[async_trait]
impl DestinationCatalog for PostgresCatalog {
    async fn exists(&self, id: &DestinationId) -> Result<bool, DomainError> {
        sqlx::query_scalar::<_, bool>(DESTINATION_EXISTS_SQL)
            .bind(id.as_uuid())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_db_error("Failed to check destination", e))
    }

    async fn list(&self) -> Result<Vec<Destination>, DomainError> {
        let rows: Vec<DestinationRow> =
            sqlx::query_as("SELECT id, name FROM destinations ORDER BY name")
                .fetch_all(&self.pool)
                .await
                .map_err(|e| map_db_error("Failed to list destinations", e))?;

        Ok(rows.into_iter().map(Destination::from).collect())
    }
}
