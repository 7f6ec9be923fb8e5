/// Post repository.
///
/// Every listing query orders by `created_at DESC, id ASC`: newest first,
/// with timestamp ties broken by insertion order so repeated reads are
/// stable.
use crate::models::Post;
use sqlx::PgPool;
use uuid::Uuid;

const POST_COLUMNS: &str = r#"
    p.id, p.author_id, u.username AS author_username,
    p.group_id, p.text, p.image_key, p.created_at
"#;

/// Create a new post
pub async fn create_post(
    pool: &PgPool,
    author_id: Uuid,
    text: &str,
    group_id: Option<i64>,
    image_key: Option<&str>,
) -> Result<Post, sqlx::Error> {
    let post = sqlx::query_as::<_, Post>(
        r#"
        WITH inserted AS (
            INSERT INTO posts (author_id, text, group_id, image_key)
            VALUES ($1, $2, $3, $4)
            RETURNING id, author_id, group_id, text, image_key, created_at
        )
        SELECT p.id, p.author_id, u.username AS author_username,
               p.group_id, p.text, p.image_key, p.created_at
        FROM inserted p
        JOIN users u ON u.id = p.author_id
        "#,
    )
    .bind(author_id)
    .bind(text)
    .bind(group_id)
    .bind(image_key)
    .fetch_one(pool)
    .await?;

    Ok(post)
}

/// Find a post by id
pub async fn find_by_id(pool: &PgPool, post_id: i64) -> Result<Option<Post>, sqlx::Error> {
    let post = sqlx::query_as::<_, Post>(&format!(
        r#"
        SELECT {POST_COLUMNS}
        FROM posts p
        JOIN users u ON u.id = p.author_id
        WHERE p.id = $1
        "#
    ))
    .bind(post_id)
    .fetch_optional(pool)
    .await?;

    Ok(post)
}

/// Global feed slice, newest first
pub async fn list_all(pool: &PgPool, limit: i64, offset: i64) -> Result<Vec<Post>, sqlx::Error> {
    let posts = sqlx::query_as::<_, Post>(&format!(
        r#"
        SELECT {POST_COLUMNS}
        FROM posts p
        JOIN users u ON u.id = p.author_id
        ORDER BY p.created_at DESC, p.id ASC
        LIMIT $1 OFFSET $2
        "#
    ))
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok(posts)
}

/// Count all posts
pub async fn count_all(pool: &PgPool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM posts")
        .fetch_one(pool)
        .await
}

/// Posts in one group, newest first
pub async fn list_by_group(
    pool: &PgPool,
    group_id: i64,
    limit: i64,
    offset: i64,
) -> Result<Vec<Post>, sqlx::Error> {
    let posts = sqlx::query_as::<_, Post>(&format!(
        r#"
        SELECT {POST_COLUMNS}
        FROM posts p
        JOIN users u ON u.id = p.author_id
        WHERE p.group_id = $1
        ORDER BY p.created_at DESC, p.id ASC
        LIMIT $2 OFFSET $3
        "#
    ))
    .bind(group_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok(posts)
}

/// Count posts in one group
pub async fn count_by_group(pool: &PgPool, group_id: i64) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM posts WHERE group_id = $1")
        .bind(group_id)
        .fetch_one(pool)
        .await
}

/// Posts by one author, newest first
pub async fn list_by_author(
    pool: &PgPool,
    author_id: Uuid,
    limit: i64,
    offset: i64,
) -> Result<Vec<Post>, sqlx::Error> {
    let posts = sqlx::query_as::<_, Post>(&format!(
        r#"
        SELECT {POST_COLUMNS}
        FROM posts p
        JOIN users u ON u.id = p.author_id
        WHERE p.author_id = $1
        ORDER BY p.created_at DESC, p.id ASC
        LIMIT $2 OFFSET $3
        "#
    ))
    .bind(author_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok(posts)
}

/// Count posts by one author
pub async fn count_by_author(pool: &PgPool, author_id: Uuid) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM posts WHERE author_id = $1")
        .bind(author_id)
        .fetch_one(pool)
        .await
}

/// Posts authored by anyone the given user follows, newest first
pub async fn list_followed(
    pool: &PgPool,
    follower_id: Uuid,
    limit: i64,
    offset: i64,
) -> Result<Vec<Post>, sqlx::Error> {
    let posts = sqlx::query_as::<_, Post>(&format!(
        r#"
        SELECT {POST_COLUMNS}
        FROM posts p
        JOIN users u ON u.id = p.author_id
        WHERE p.author_id IN (
            SELECT followed_id FROM follows WHERE follower_id = $1
        )
        ORDER BY p.created_at DESC, p.id ASC
        LIMIT $2 OFFSET $3
        "#
    ))
    .bind(follower_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok(posts)
}

/// Count posts authored by anyone the given user follows
pub async fn count_followed(pool: &PgPool, follower_id: Uuid) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*) FROM posts
        WHERE author_id IN (SELECT followed_id FROM follows WHERE follower_id = $1)
        "#,
    )
    .bind(follower_id)
    .fetch_one(pool)
    .await
}

/// Update a post's mutable fields. Authorship never changes; the author
/// filter in the WHERE clause makes a non-author update a no-op at the
/// storage level as well.
pub async fn update_post(
    pool: &PgPool,
    post_id: i64,
    author_id: Uuid,
    text: &str,
    group_id: Option<i64>,
    image_key: Option<&str>,
) -> Result<Option<Post>, sqlx::Error> {
    let post = sqlx::query_as::<_, Post>(
        r#"
        WITH updated AS (
            UPDATE posts
            SET text = $1, group_id = $2, image_key = $3
            WHERE id = $4 AND author_id = $5
            RETURNING id, author_id, group_id, text, image_key, created_at
        )
        SELECT p.id, p.author_id, u.username AS author_username,
               p.group_id, p.text, p.image_key, p.created_at
        FROM updated p
        JOIN users u ON u.id = p.author_id
        "#,
    )
    .bind(text)
    .bind(group_id)
    .bind(image_key)
    .bind(post_id)
    .bind(author_id)
    .fetch_optional(pool)
    .await?;

    Ok(post)
}

/// Delete a post owned by the author; comments cascade via FK.
/// Returns true if a row was removed.
pub async fn delete_post(
    pool: &PgPool,
    post_id: i64,
    author_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let affected = sqlx::query("DELETE FROM posts WHERE id = $1 AND author_id = $2")
        .bind(post_id)
        .bind(author_id)
        .execute(pool)
        .await?
        .rows_affected();

    Ok(affected > 0)
}
