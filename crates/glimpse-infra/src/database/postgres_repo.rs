//! PostgreSQL repository implementations.

use async_trait::async_trait;
use sea_orm::ActiveValue::{NotSet, Set, Unchanged};
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, EntityTrait, QueryFilter, QueryOrder,
    TransactionTrait,
};

use glimpse_core::domain::{
    Lead, LeadFilter, NewPost, NewUser, Post, PostChanges, User, UserChanges,
};
use glimpse_core::error::RepoError;
use glimpse_core::ports::{LeadRepository, PostRepository, UserRepository};

use super::entity::lead::{self, Entity as LeadEntity};
use super::entity::post::{self, Entity as PostEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::postgres_base::{PostgresBaseRepository, repo_err};

/// PostgreSQL user repository.
pub type PostgresUserRepository = PostgresBaseRepository<UserEntity>;

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

/// PostgreSQL lead repository.
pub type PostgresLeadRepository = PostgresBaseRepository<LeadEntity>;

fn set_some<V>(value: Option<V>) -> ActiveValue<V>
where
    V: Into<sea_orm::Value>,
{
    value.map(Set).unwrap_or(NotSet)
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, new: NewUser) -> Result<User, RepoError> {
        tracing::debug!(username = %new.username, "Creating user");

        let model = user::ActiveModel {
            username: Set(new.username),
            email: Set(new.email),
            phone: Set(new.phone),
            profile_picture: Set(new.profile_picture),
            ..Default::default()
        }
        .insert(self.db.as_ref())
        .await
        .map_err(repo_err)?;

        Ok(model.into())
    }

    async fn update(&self, id: i32, changes: UserChanges) -> Result<User, RepoError> {
        let model = user::ActiveModel {
            id: Unchanged(id),
            username: set_some(changes.username),
            email: set_some(changes.email),
            phone: set_some(changes.phone.map(Some)),
            is_active: set_some(changes.is_active),
            profile_picture: set_some(changes.profile_picture.map(Some)),
            ..Default::default()
        }
        .update(self.db.as_ref())
        .await
        .map_err(repo_err)?;

        Ok(model.into())
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn create(&self, new: NewPost) -> Result<Post, RepoError> {
        let model = post::ActiveModel {
            user_id: Set(new.user_id),
            title: Set(new.title),
            content: Set(new.content),
            ..Default::default()
        }
        .insert(self.db.as_ref())
        .await
        .map_err(repo_err)?;

        Ok(model.into())
    }

    async fn update(&self, id: i32, changes: PostChanges) -> Result<Post, RepoError> {
        let model = post::ActiveModel {
            id: Unchanged(id),
            title: set_some(changes.title),
            content: set_some(changes.content.map(Some)),
            ..Default::default()
        }
        .update(self.db.as_ref())
        .await
        .map_err(repo_err)?;

        Ok(model.into())
    }

    async fn find_by_user_id(&self, user_id: i32) -> Result<Vec<Post>, RepoError> {
        let result = PostEntity::find()
            .filter(post::Column::UserId.eq(user_id))
            .order_by_asc(post::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(repo_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl LeadRepository for PostgresLeadRepository {
    async fn find(&self, filter: LeadFilter) -> Result<Vec<Lead>, RepoError> {
        let filter = filter.effective();
        tracing::debug!(?filter, "Listing leads");

        let mut query = LeadEntity::find();
        if let Some(id) = filter.id {
            query = query.filter(lead::Column::Id.eq(id));
        }
        if let Some(name) = filter.name {
            query = query.filter(lead::Column::LeadName.eq(name));
        }
        if let Some(source) = filter.source {
            query = query.filter(lead::Column::Source.eq(source));
        }
        if let Some(interest_level) = filter.interest_level {
            query = query.filter(lead::Column::InterestLevel.eq(interest_level));
        }
        if let Some(status) = filter.status {
            query = query.filter(lead::Column::Status.eq(status));
        }
        if let Some(salesperson) = filter.salesperson {
            query = query.filter(lead::Column::Salesperson.eq(salesperson));
        }

        let rows = query
            .order_by_asc(lead::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(repo_err)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn upsert_batch(&self, leads: Vec<Lead>) -> Result<usize, RepoError> {
        let on_conflict = OnConflict::column(lead::Column::Id)
            .update_columns([
                lead::Column::LeadName,
                lead::Column::Email,
                lead::Column::Source,
                lead::Column::InterestLevel,
                lead::Column::Status,
                lead::Column::Salesperson,
            ])
            .to_owned();

        // Dropping the transaction without commit rolls the batch back.
        let txn = self.db.begin().await.map_err(repo_err)?;
        let mut written = 0;
        for row in leads {
            LeadEntity::insert(lead::ActiveModel::from(row))
                .on_conflict(on_conflict.clone())
                .exec_without_returning(&txn)
                .await
                .map_err(repo_err)?;
            written += 1;
        }
        txn.commit().await.map_err(repo_err)?;

        tracing::info!(written, "Lead batch committed");
        Ok(written)
    }
}
