use async_trait::async_trait;

use crate::domain::{Lead, LeadFilter, NewPost, NewUser, Post, PostChanges, User, UserChanges};
use crate::error::RepoError;

/// Generic repository trait defining the read and delete operations every
/// table supports.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// List every entity ordered by ID.
    async fn find_all(&self) -> Result<Vec<T>, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// User repository with domain-specific methods.
#[async_trait]
pub trait UserRepository: BaseRepository<User, i32> {
    async fn create(&self, user: NewUser) -> Result<User, RepoError>;

    /// Returns `RepoError::NotFound` when no user has this id.
    async fn update(&self, id: i32, changes: UserChanges) -> Result<User, RepoError>;
}

/// Post repository.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, i32> {
    /// Returns `RepoError::ForeignKey` when `post.user_id` names no user.
    async fn create(&self, post: NewPost) -> Result<Post, RepoError>;

    /// Applies the changes and refreshes `updated_at`.
    async fn update(&self, id: i32, changes: PostChanges) -> Result<Post, RepoError>;

    async fn find_by_user_id(&self, user_id: i32) -> Result<Vec<Post>, RepoError>;
}

/// Lead repository. Leads are keyed by an externally supplied id and are
/// written only through upserts.
#[async_trait]
pub trait LeadRepository: Send + Sync {
    /// Leads matching the effective form of `filter`, ordered by id.
    async fn find(&self, filter: LeadFilter) -> Result<Vec<Lead>, RepoError>;

    /// Insert-or-replace every lead in order within one unit of work.
    ///
    /// Either every lead is stored or, on error, none is. Returns the number
    /// of leads written.
    async fn upsert_batch(&self, leads: Vec<Lead>) -> Result<usize, RepoError>;
}
