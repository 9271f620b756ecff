use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::check_len;
use crate::error::DomainError;

/// Post entity - a titled piece of text owned by a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: i32,
    pub user_id: i32,
    pub title: String,
    pub content: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub user_id: i32,
    pub title: String,
    pub content: Option<String>,
}

impl NewPost {
    pub fn validate(&self) -> Result<(), DomainError> {
        check_len("title", &self.title, 1, 200)
    }
}

/// Partial update of a post.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostChanges {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl PostChanges {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.title.is_none() && self.content.is_none() {
            return Err(DomainError::Validation("No fields to update".to_string()));
        }
        if let Some(title) = &self.title {
            check_len("title", title, 1, 200)?;
        }
        Ok(())
    }

    /// Apply the changes to an in-memory post. The caller refreshes
    /// `updated_at`.
    pub fn apply(self, post: &mut Post) {
        if let Some(title) = self.title {
            post.title = title;
        }
        if let Some(content) = self.content {
            post.content = Some(content);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_bounds() {
        let mut post = NewPost {
            user_id: 1,
            title: String::new(),
            content: None,
        };
        assert!(post.validate().is_err());

        post.title = "t".repeat(200);
        assert!(post.validate().is_ok());

        post.title.push('t');
        assert!(post.validate().is_err());
    }

    #[test]
    fn test_changes_require_a_field() {
        assert!(PostChanges::default().validate().is_err());
        let changes = PostChanges {
            content: Some("body".to_string()),
            ..Default::default()
        };
        assert!(changes.validate().is_ok());
    }
}
