//! Database diagnostics backing `/db-status` and the startup checks.

use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{ConnectionTrait, DbBackend, DbConn, EntityTrait, QueryOrder, Statement};
use sea_orm_migration::{MigratorTrait, seaql_migrations};

use glimpse_core::error::RepoError;
use glimpse_core::ports::{DatabaseProbe, MigrationRevisions};
use glimpse_core::schema::{SchemaDifference, diff_schemas};
use glimpse_migration::Migrator;

use super::postgres_base::repo_err;
use super::schema::{declared_schema, live_schema};

const MIGRATION_TABLE_EXISTS_SQL: &str = r#"
SELECT EXISTS (
    SELECT 1 FROM information_schema.tables
    WHERE table_schema = current_schema() AND table_name = 'seaql_migrations'
) AS present
"#;

/// Name of the last revision shipped with the migrator.
pub fn head_revision() -> Option<String> {
    Migrator::migrations()
        .last()
        .map(|migration| migration.name().to_string())
}

pub struct PostgresProbe {
    db: Arc<DbConn>,
}

impl PostgresProbe {
    pub fn new(db: Arc<DbConn>) -> Self {
        Self { db }
    }

    /// Greatest applied revision, `None` when the migration table is absent
    /// or empty.
    async fn current_revision(&self) -> Result<Option<String>, RepoError> {
        let row = self
            .db
            .query_one(Statement::from_string(DbBackend::Postgres, MIGRATION_TABLE_EXISTS_SQL))
            .await
            .map_err(repo_err)?;
        let present = match row {
            Some(row) => row.try_get::<bool>("", "present").map_err(repo_err)?,
            None => false,
        };
        if !present {
            return Ok(None);
        }

        let latest = seaql_migrations::Entity::find()
            .order_by_desc(seaql_migrations::Column::Version)
            .one(self.db.as_ref())
            .await
            .map_err(repo_err)?;
        Ok(latest.map(|m| m.version))
    }
}

#[async_trait]
impl DatabaseProbe for PostgresProbe {
    async fn ping(&self) -> Result<(), RepoError> {
        self.db
            .execute_unprepared("SELECT 1")
            .await
            .map(|_| ())
            .map_err(|e| RepoError::Connection(e.to_string()))
    }

    async fn migration_revisions(&self) -> Result<MigrationRevisions, RepoError> {
        let current = self.current_revision().await?;
        let head = head_revision();
        tracing::debug!(?current, ?head, "Migration revisions");
        Ok(MigrationRevisions { current, head })
    }

    async fn schema_drift(&self) -> Result<Vec<SchemaDifference>, RepoError> {
        let live = live_schema(self.db.as_ref()).await.map_err(repo_err)?;
        Ok(diff_schemas(&declared_schema(), &live))
    }
}
