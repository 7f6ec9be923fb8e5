/// Comment service - validated comment creation
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::db::{comment_repo, post_repo};
use crate::error::{AppError, Result};
use crate::models::{Comment, CommentDraft};

#[derive(Clone)]
pub struct CommentService {
    pool: PgPool,
}

impl CommentService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a comment on an existing post. The author is always the acting
    /// user; a client-supplied author field does not exist in the draft.
    pub async fn add_comment(
        &self,
        actor: Uuid,
        post_id: i64,
        draft: &CommentDraft,
    ) -> Result<Comment> {
        draft.validate()?;

        post_repo::find_by_id(&self.pool, post_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("post {}", post_id)))?;

        let comment = comment_repo::create_comment(&self.pool, post_id, actor, &draft.text).await?;

        Ok(comment)
    }
}
