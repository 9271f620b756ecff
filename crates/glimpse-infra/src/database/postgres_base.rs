use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{
    DbConn, DbErr, EntityTrait, Iterable, PrimaryKeyToColumn, PrimaryKeyTrait, QueryOrder, SqlErr,
};

use glimpse_core::error::RepoError;
use glimpse_core::ports::BaseRepository;

/// Generic PostgreSQL repository implementation.
pub struct PostgresBaseRepository<E>
where
    E: EntityTrait,
{
    pub(crate) db: Arc<DbConn>,
    _entity: PhantomData<E>,
}

impl<E> PostgresBaseRepository<E>
where
    E: EntityTrait,
{
    pub fn new(db: Arc<DbConn>) -> Self {
        Self {
            db,
            _entity: PhantomData,
        }
    }
}

/// Classify a SeaORM error.
pub(crate) fn repo_err(err: DbErr) -> RepoError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(msg)) => return RepoError::Constraint(msg),
        Some(SqlErr::ForeignKeyConstraintViolation(msg)) => return RepoError::ForeignKey(msg),
        _ => {}
    }
    match err {
        DbErr::RecordNotFound(_) | DbErr::RecordNotUpdated => RepoError::NotFound,
        DbErr::Conn(e) => RepoError::Connection(e.to_string()),
        DbErr::ConnectionAcquire(e) => RepoError::Connection(e.to_string()),
        other => RepoError::Query(other.to_string()),
    }
}

#[async_trait]
impl<E, T, ID> BaseRepository<T, ID> for PostgresBaseRepository<E>
where
    E: EntityTrait,
    E::Model: Sync + Send,
    E::PrimaryKey: PrimaryKeyTrait<ValueType = ID>,
    ID: Send + Sync + Into<sea_orm::Value> + Clone + Copy + 'static,
    T: From<E::Model> + Send + Sync + 'static,
{
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError> {
        let result = E::find_by_id(id).one(self.db.as_ref()).await.map_err(repo_err)?;

        Ok(result.map(Into::into))
    }

    async fn find_all(&self) -> Result<Vec<T>, RepoError> {
        let mut query = E::find();
        for key in <E::PrimaryKey as Iterable>::iter() {
            query = query.order_by_asc(key.into_column());
        }
        let rows = query.all(self.db.as_ref()).await.map_err(repo_err)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn delete(&self, id: ID) -> Result<(), RepoError> {
        let result = E::delete_by_id(id).exec(self.db.as_ref()).await.map_err(repo_err)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }
}
