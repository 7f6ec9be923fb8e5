/// Data models for blog-service
///
/// Row types map directly onto the tables in `migrations/`; post and comment
/// rows carry the author username (joined in the repositories) so the
/// presentation layer never needs a second lookup. Draft types are the
/// validated payloads accepted by the mutation services.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// Registered user. Creation and authentication live outside this service;
/// only the unique username and the token-subject id matter here.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

/// Named category a post may belong to.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Group {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub description: String,
}

/// Authored post. Authorship is immutable: edits change text, group and
/// image only.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Post {
    pub id: i64,
    pub author_id: Uuid,
    pub author_username: String,
    pub group_id: Option<i64>,
    pub text: String,
    pub image_key: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Comment attached to exactly one post; never edited after creation.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Comment {
    pub id: i64,
    pub post_id: i64,
    pub author_id: Uuid,
    pub author_username: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// Directed follow edge (follower receives followed author's posts).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FollowRecord {
    pub follower_id: Uuid,
    pub followed_id: Uuid,
    pub created_at: DateTime<Utc>,
}

fn non_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("Text must not be empty".into());
        return Err(err);
    }
    Ok(())
}

/// Payload for creating or editing a post. The same shape serves both paths,
/// mirroring a single form backing create and edit views.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PostDraft {
    #[validate(custom(function = "non_blank"))]
    pub text: String,
    pub group_id: Option<i64>,
    pub image_key: Option<String>,
}

/// Payload for creating a comment. The author is always the acting user,
/// never client-supplied.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CommentDraft {
    #[validate(custom(function = "non_blank"))]
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_post_text_is_rejected() {
        let draft = PostDraft {
            text: "   ".into(),
            group_id: None,
            image_key: None,
        };
        let errors = draft.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("text"));
    }

    #[test]
    fn non_blank_post_text_is_accepted() {
        let draft = PostDraft {
            text: "hello".into(),
            group_id: Some(1),
            image_key: None,
        };
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn blank_comment_text_is_rejected() {
        let draft = CommentDraft { text: "".into() };
        assert!(draft.validate().is_err());
    }
}
