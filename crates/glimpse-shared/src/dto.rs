//! Data Transfer Objects - request/response types for the API.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// `GET /` body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// `GET /db-status` body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DbStatusResponse {
    pub status: String,
    pub message: String,
}

/// Request to create a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserCreate {
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub profile_picture: Option<String>,
}

/// Request to update a user. Every field is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserUpdate {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub profile_picture: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRead {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub phone: Option<String>,
    pub last_login: Option<NaiveDateTime>,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub profile_picture: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostCreate {
    pub user_id: i32,
    pub title: String,
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostUpdate {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostRead {
    pub id: i32,
    pub user_id: i32,
    pub title: String,
    pub content: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Confirmation returned after a delete.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub id: i32,
    pub message: String,
}

/// Query string of `GET /leads/`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LeadQuery {
    pub id: Option<i32>,
    pub name: Option<String>,
    pub source: Option<String>,
    pub interest_level: Option<String>,
    pub status: Option<String>,
    pub salesperson: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadRead {
    pub id: i32,
    pub lead_name: Option<String>,
    pub email: Option<String>,
    pub source: Option<String>,
    pub interest_level: Option<String>,
    pub status: Option<String>,
    pub salesperson: Option<String>,
}

/// `POST /files/` body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    pub filename: Option<String>,
    pub processed_count: usize,
    pub status: String,
}
