//! Domain entities - the core business objects.

mod lead;
mod post;
mod user;

pub use lead::{Lead, LeadFilter, LEAD_TEXT_MAX};
pub use post::{NewPost, Post, PostChanges};
pub use user::{NewUser, User, UserChanges};

use crate::error::DomainError;

/// Checks that `value` holds between `min` and `max` characters.
pub(crate) fn check_len(
    field: &str,
    value: &str,
    min: usize,
    max: usize,
) -> Result<(), DomainError> {
    let len = value.chars().count();
    if len < min {
        return Err(DomainError::Validation(format!(
            "{field} must be at least {min} characters"
        )));
    }
    if len > max {
        return Err(DomainError::Validation(format!(
            "{field} must be at most {max} characters"
        )));
    }
    Ok(())
}

fn check_email(email: &str) -> Result<(), DomainError> {
    check_len("email", email, 1, 100)?;
    if !email.contains('@') {
        return Err(DomainError::Validation("Invalid email address".to_string()));
    }
    Ok(())
}
