use async_trait::async_trait;

use crate::error::RepoError;
use crate::schema::SchemaDifference;

/// Applied and expected migration revisions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationRevisions {
    /// Latest revision recorded by the store, `None` if nothing was applied.
    pub current: Option<String>,
    /// Latest revision known to the migrator.
    pub head: Option<String>,
}

impl MigrationRevisions {
    pub fn is_current(&self) -> bool {
        self.current == self.head
    }
}

/// Read-only diagnostics against the backing store.
#[async_trait]
pub trait DatabaseProbe: Send + Sync {
    /// Run a trivial query.
    async fn ping(&self) -> Result<(), RepoError>;

    async fn migration_revisions(&self) -> Result<MigrationRevisions, RepoError>;

    /// Differences between the declared entity shapes and the live schema.
    async fn schema_drift(&self) -> Result<Vec<SchemaDifference>, RepoError>;
}
