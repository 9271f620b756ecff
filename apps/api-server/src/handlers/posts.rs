//! Post handlers.

use actix_web::{HttpResponse, web};

use glimpse_core::domain::{NewPost, Post, PostChanges};
use glimpse_core::error::{DomainError, RepoError};
use glimpse_core::ports::BaseRepository;
use glimpse_shared::dto::{DeleteResponse, PostCreate, PostRead, PostUpdate};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

pub(super) fn post_read(post: Post) -> PostRead {
    PostRead {
        id: post.id,
        user_id: post.user_id,
        title: post.title,
        content: post.content,
        created_at: post.created_at,
        updated_at: post.updated_at,
    }
}

fn not_found(id: i32) -> AppError {
    DomainError::NotFound {
        entity_type: "Post",
        id,
    }
    .into()
}

fn unknown_user(user_id: i32) -> AppError {
    AppError::BadRequest(format!("User with id {} does not exist", user_id))
}

/// GET /posts/
pub async fn list_posts(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state.posts.find_all().await?;

    Ok(HttpResponse::Ok().json(posts.into_iter().map(post_read).collect::<Vec<_>>()))
}

/// POST /posts/
pub async fn create_post(
    state: web::Data<AppState>,
    body: web::Json<PostCreate>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let new = NewPost {
        user_id: req.user_id,
        title: req.title,
        content: req.content,
    };
    new.validate()?;

    if state.users.find_by_id(new.user_id).await?.is_none() {
        return Err(unknown_user(new.user_id));
    }

    let user_id = new.user_id;
    let post = match state.posts.create(new).await {
        Ok(post) => post,
        // The user was deleted between the check and the insert.
        Err(RepoError::ForeignKey(_)) => return Err(unknown_user(user_id)),
        Err(e) => return Err(e.into()),
    };
    tracing::info!(post_id = post.id, user_id, "Post created");

    Ok(HttpResponse::Created().json(post_read(post)))
}

/// GET /posts/{id}
pub async fn get_post(state: web::Data<AppState>, path: web::Path<i32>) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let post = state.posts.find_by_id(id).await?.ok_or_else(|| not_found(id))?;

    Ok(HttpResponse::Ok().json(post_read(post)))
}

/// PATCH /posts/{id}
pub async fn update_post(
    state: web::Data<AppState>,
    path: web::Path<i32>,
    body: web::Json<PostUpdate>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let req = body.into_inner();
    let changes = PostChanges {
        title: req.title,
        content: req.content,
    };
    changes.validate()?;

    match state.posts.update(id, changes).await {
        Ok(post) => Ok(HttpResponse::Ok().json(post_read(post))),
        Err(RepoError::NotFound) => Err(not_found(id)),
        Err(e) => Err(e.into()),
    }
}

/// DELETE /posts/{id}
pub async fn delete_post(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    match state.posts.delete(id).await {
        Ok(()) => Ok(HttpResponse::Ok().json(DeleteResponse {
            id,
            message: "Post deleted successfully".to_string(),
        })),
        Err(RepoError::NotFound) => Err(not_found(id)),
        Err(e) => Err(e.into()),
    }
}
