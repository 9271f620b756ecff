//! In-memory implementation of every port, for tests and for running the
//! handlers without PostgreSQL.
//!
//! Enforces the same constraints the migrations put on the real tables:
//! unique usernames and emails, and posts referencing existing users.
//! Data is lost on process restart.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use glimpse_core::domain::{
    Lead, LeadFilter, NewPost, NewUser, Post, PostChanges, User, UserChanges,
};
use glimpse_core::error::RepoError;
use glimpse_core::ports::{
    BaseRepository, DatabaseProbe, LeadRepository, MigrationRevisions, PostRepository,
    UserRepository,
};
use glimpse_core::schema::SchemaDifference;

use crate::database::head_revision;

#[derive(Default)]
struct Tables {
    users: BTreeMap<i32, User>,
    posts: BTreeMap<i32, Post>,
    leads: BTreeMap<i32, Lead>,
    next_user_id: i32,
    next_post_id: i32,
}

/// All three tables behind one async RwLock.
#[derive(Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
    unavailable: AtomicBool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent operation fail as if the database were down.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), RepoError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(RepoError::Connection("connection refused".to_string()));
        }
        Ok(())
    }
}

fn check_unique_user(
    tables: &Tables,
    id: Option<i32>,
    username: &str,
    email: &str,
) -> Result<(), RepoError> {
    for user in tables.users.values() {
        if Some(user.id) == id {
            continue;
        }
        if user.username == username {
            return Err(RepoError::Constraint("username already exists".to_string()));
        }
        if user.email == email {
            return Err(RepoError::Constraint("email already exists".to_string()));
        }
    }
    Ok(())
}

#[async_trait]
impl BaseRepository<User, i32> for InMemoryStore {
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, RepoError> {
        self.check_available()?;
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<User>, RepoError> {
        self.check_available()?;
        Ok(self.tables.read().await.users.values().cloned().collect())
    }

    async fn delete(&self, id: i32) -> Result<(), RepoError> {
        self.check_available()?;
        let mut tables = self.tables.write().await;
        if tables.posts.values().any(|p| p.user_id == id) {
            return Err(RepoError::ForeignKey(format!("posts still reference user {}", id)));
        }
        tables.users.remove(&id).map(|_| ()).ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn create(&self, new: NewUser) -> Result<User, RepoError> {
        self.check_available()?;
        let mut tables = self.tables.write().await;
        check_unique_user(&tables, None, &new.username, &new.email)?;

        tables.next_user_id += 1;
        let user = User {
            id: tables.next_user_id,
            username: new.username,
            email: new.email,
            phone: new.phone,
            last_login: None,
            is_active: true,
            created_at: Utc::now().naive_utc(),
            profile_picture: new.profile_picture,
        };
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update(&self, id: i32, changes: UserChanges) -> Result<User, RepoError> {
        self.check_available()?;
        let mut tables = self.tables.write().await;
        let mut user = tables.users.get(&id).cloned().ok_or(RepoError::NotFound)?;
        changes.apply(&mut user);
        check_unique_user(&tables, Some(id), &user.username, &user.email)?;
        tables.users.insert(id, user.clone());
        Ok(user)
    }
}

#[async_trait]
impl BaseRepository<Post, i32> for InMemoryStore {
    async fn find_by_id(&self, id: i32) -> Result<Option<Post>, RepoError> {
        self.check_available()?;
        Ok(self.tables.read().await.posts.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Post>, RepoError> {
        self.check_available()?;
        Ok(self.tables.read().await.posts.values().cloned().collect())
    }

    async fn delete(&self, id: i32) -> Result<(), RepoError> {
        self.check_available()?;
        let mut tables = self.tables.write().await;
        tables.posts.remove(&id).map(|_| ()).ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl PostRepository for InMemoryStore {
    async fn create(&self, new: NewPost) -> Result<Post, RepoError> {
        self.check_available()?;
        let mut tables = self.tables.write().await;
        if !tables.users.contains_key(&new.user_id) {
            return Err(RepoError::ForeignKey(format!("user {} does not exist", new.user_id)));
        }

        tables.next_post_id += 1;
        let now = Utc::now().naive_utc();
        let post = Post {
            id: tables.next_post_id,
            user_id: new.user_id,
            title: new.title,
            content: new.content,
            created_at: now,
            updated_at: now,
        };
        tables.posts.insert(post.id, post.clone());
        Ok(post)
    }

    async fn update(&self, id: i32, changes: PostChanges) -> Result<Post, RepoError> {
        self.check_available()?;
        let mut tables = self.tables.write().await;
        let post = tables.posts.get_mut(&id).ok_or(RepoError::NotFound)?;
        changes.apply(post);
        post.updated_at = Utc::now().naive_utc();
        Ok(post.clone())
    }

    async fn find_by_user_id(&self, user_id: i32) -> Result<Vec<Post>, RepoError> {
        self.check_available()?;
        let tables = self.tables.read().await;
        Ok(tables
            .posts
            .values()
            .filter(|p| p.user_id == user_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl LeadRepository for InMemoryStore {
    async fn find(&self, filter: LeadFilter) -> Result<Vec<Lead>, RepoError> {
        self.check_available()?;
        let filter = filter.effective();
        let tables = self.tables.read().await;
        Ok(tables
            .leads
            .values()
            .filter(|lead| filter.matches(lead))
            .cloned()
            .collect())
    }

    async fn upsert_batch(&self, leads: Vec<Lead>) -> Result<usize, RepoError> {
        self.check_available()?;
        let mut tables = self.tables.write().await;
        let written = leads.len();
        for lead in leads {
            tables.leads.insert(lead.id, lead);
        }
        Ok(written)
    }
}

#[async_trait]
impl DatabaseProbe for InMemoryStore {
    async fn ping(&self) -> Result<(), RepoError> {
        self.check_available()
    }

    async fn migration_revisions(&self) -> Result<MigrationRevisions, RepoError> {
        self.check_available()?;
        let head = head_revision();
        Ok(MigrationRevisions {
            current: head.clone(),
            head,
        })
    }

    async fn schema_drift(&self) -> Result<Vec<SchemaDifference>, RepoError> {
        self.check_available()?;
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(username: &str, email: &str) -> NewUser {
        NewUser {
            username: username.to_string(),
            email: email.to_string(),
            phone: None,
            profile_picture: None,
        }
    }

    fn lead(id: i32, name: &str) -> Lead {
        Lead {
            id,
            lead_name: Some(name.to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_user_ids_auto_increment() {
        let store = InMemoryStore::new();
        let first = UserRepository::create(&store, new_user("ada", "ada@x.io")).await.unwrap();
        let second = UserRepository::create(&store, new_user("grace", "grace@x.io")).await.unwrap();
        assert_eq!((first.id, second.id), (1, 2));
        assert!(first.is_active);
    }

    #[tokio::test]
    async fn test_duplicate_email_is_a_constraint_violation() {
        let store = InMemoryStore::new();
        UserRepository::create(&store, new_user("ada", "ada@x.io")).await.unwrap();
        let err = UserRepository::create(&store, new_user("ada2", "ada@x.io"))
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::Constraint(_)));
    }

    #[tokio::test]
    async fn test_post_requires_existing_user() {
        let store = InMemoryStore::new();
        let err = PostRepository::create(
            &store,
            NewPost {
                user_id: 42,
                title: "Hello".to_string(),
                content: None,
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, RepoError::ForeignKey(_)));
    }

    #[tokio::test]
    async fn test_upsert_overwrites_by_id() {
        let store = InMemoryStore::new();
        store.upsert_batch(vec![lead(1, "Old"), lead(2, "Other")]).await.unwrap();
        store.upsert_batch(vec![lead(1, "New")]).await.unwrap();

        let leads = store.find(LeadFilter::default()).await.unwrap();
        assert_eq!(leads, vec![lead(1, "New"), lead(2, "Other")]);
    }

    #[tokio::test]
    async fn test_unavailable_store_fails_every_call() {
        let store = InMemoryStore::new();
        store.set_unavailable(true);
        assert!(matches!(store.ping().await, Err(RepoError::Connection(_))));
        assert!(store.find(LeadFilter::default()).await.is_err());
    }
}
