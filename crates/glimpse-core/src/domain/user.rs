use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::{check_email, check_len};
use crate::error::DomainError;

/// User entity - represents an account in the system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub phone: Option<String>,
    pub last_login: Option<NaiveDateTime>,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub profile_picture: Option<String>,
}

/// Fields supplied when creating a user. The store assigns the id,
/// `is_active` and `created_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub phone: Option<String>,
    pub profile_picture: Option<String>,
}

impl NewUser {
    pub fn validate(&self) -> Result<(), DomainError> {
        check_len("username", &self.username, 1, 26)?;
        check_email(&self.email)?;
        if let Some(phone) = &self.phone {
            check_len("phone", phone, 0, 20)?;
        }
        if let Some(picture) = &self.profile_picture {
            check_len("profile_picture", picture, 0, 255)?;
        }
        Ok(())
    }
}

/// Partial update of a user. `None` leaves the column untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserChanges {
    pub username: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub is_active: Option<bool>,
    pub profile_picture: Option<String>,
}

impl UserChanges {
    pub fn is_empty(&self) -> bool {
        self.username.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.is_active.is_none()
            && self.profile_picture.is_none()
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.is_empty() {
            return Err(DomainError::Validation("No fields to update".to_string()));
        }
        if let Some(username) = &self.username {
            check_len("username", username, 3, 26)?;
        }
        if let Some(email) = &self.email {
            check_email(email)?;
        }
        if let Some(phone) = &self.phone {
            check_len("phone", phone, 0, 20)?;
        }
        if let Some(picture) = &self.profile_picture {
            check_len("profile_picture", picture, 3, 255)?;
        }
        Ok(())
    }

    /// Apply the changes to an in-memory user.
    pub fn apply(self, user: &mut User) {
        if let Some(username) = self.username {
            user.username = username;
        }
        if let Some(email) = self.email {
            user.email = email;
        }
        if let Some(phone) = self.phone {
            user.phone = Some(phone);
        }
        if let Some(is_active) = self.is_active {
            user.is_active = is_active;
        }
        if let Some(picture) = self.profile_picture {
            user.profile_picture = Some(picture);
        }
    }
}
