use crate::models::Comment;
use sqlx::PgPool;
use uuid::Uuid;

/// Create a new comment on a post
pub async fn create_comment(
    pool: &PgPool,
    post_id: i64,
    author_id: Uuid,
    text: &str,
) -> Result<Comment, sqlx::Error> {
    let comment = sqlx::query_as::<_, Comment>(
        r#"
        WITH inserted AS (
            INSERT INTO comments (post_id, author_id, text)
            VALUES ($1, $2, $3)
            RETURNING id, post_id, author_id, text, created_at
        )
        SELECT c.id, c.post_id, c.author_id, u.username AS author_username,
               c.text, c.created_at
        FROM inserted c
        JOIN users u ON u.id = c.author_id
        "#,
    )
    .bind(post_id)
    .bind(author_id)
    .bind(text)
    .fetch_one(pool)
    .await?;

    Ok(comment)
}

/// All comments for a post in conversation order (oldest first)
pub async fn list_by_post(pool: &PgPool, post_id: i64) -> Result<Vec<Comment>, sqlx::Error> {
    let comments = sqlx::query_as::<_, Comment>(
        r#"
        SELECT c.id, c.post_id, c.author_id, u.username AS author_username,
               c.text, c.created_at
        FROM comments c
        JOIN users u ON u.id = c.author_id
        WHERE c.post_id = $1
        ORDER BY c.created_at ASC, c.id ASC
        "#,
    )
    .bind(post_id)
    .fetch_all(pool)
    .await?;

    Ok(comments)
}

/// Count comments for a post
pub async fn count_by_post(pool: &PgPool, post_id: i64) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM comments WHERE post_id = $1")
        .bind(post_id)
        .fetch_one(pool)
        .await
}
