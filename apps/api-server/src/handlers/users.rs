//! User handlers.

use actix_web::{HttpResponse, web};

use glimpse_core::domain::{NewUser, User, UserChanges};
use glimpse_core::error::{DomainError, RepoError};
use glimpse_core::ports::BaseRepository;
use glimpse_shared::dto::{DeleteResponse, PostRead, UserCreate, UserRead, UserUpdate};

use super::posts::post_read;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn user_read(user: User) -> UserRead {
    UserRead {
        id: user.id,
        username: user.username,
        email: user.email,
        phone: user.phone,
        last_login: user.last_login,
        is_active: user.is_active,
        created_at: user.created_at,
        profile_picture: user.profile_picture,
    }
}

fn not_found(id: i32) -> AppError {
    DomainError::NotFound {
        entity_type: "User",
        id,
    }
    .into()
}

/// GET /users/
pub async fn list_users(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let users = state.users.find_all().await?;

    Ok(HttpResponse::Ok().json(users.into_iter().map(user_read).collect::<Vec<_>>()))
}

/// POST /users/
pub async fn create_user(
    state: web::Data<AppState>,
    body: web::Json<UserCreate>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let new = NewUser {
        username: req.username,
        email: req.email,
        phone: req.phone,
        profile_picture: req.profile_picture,
    };
    new.validate()?;

    let user = state.users.create(new).await?;
    tracing::info!(user_id = user.id, "User created");

    Ok(HttpResponse::Created().json(user_read(user)))
}

/// GET /users/{id}
pub async fn get_user(state: web::Data<AppState>, path: web::Path<i32>) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let user = state.users.find_by_id(id).await?.ok_or_else(|| not_found(id))?;

    Ok(HttpResponse::Ok().json(user_read(user)))
}

/// PATCH /users/{id}
pub async fn update_user(
    state: web::Data<AppState>,
    path: web::Path<i32>,
    body: web::Json<UserUpdate>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let req = body.into_inner();
    let changes = UserChanges {
        username: req.username,
        email: req.email,
        phone: req.phone,
        is_active: req.is_active,
        profile_picture: req.profile_picture,
    };
    changes.validate()?;

    match state.users.update(id, changes).await {
        Ok(user) => Ok(HttpResponse::Ok().json(user_read(user))),
        Err(RepoError::NotFound) => Err(not_found(id)),
        Err(e) => Err(e.into()),
    }
}

/// DELETE /users/{id}
///
/// Refused with 409 while posts still reference the user.
pub async fn delete_user(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    match state.users.delete(id).await {
        Ok(()) => Ok(HttpResponse::Ok().json(DeleteResponse {
            id,
            message: "User deleted successfully".to_string(),
        })),
        Err(RepoError::NotFound) => Err(not_found(id)),
        Err(RepoError::ForeignKey(_)) => Err(AppError::Conflict(format!(
            "User {} still has posts",
            id
        ))),
        Err(e) => Err(e.into()),
    }
}

/// GET /users/{id}/posts
pub async fn user_posts(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    if state.users.find_by_id(id).await?.is_none() {
        return Err(not_found(id));
    }

    let posts: Vec<PostRead> = state
        .posts
        .find_by_user_id(id)
        .await?
        .into_iter()
        .map(post_read)
        .collect();

    Ok(HttpResponse::Ok().json(posts))
}
