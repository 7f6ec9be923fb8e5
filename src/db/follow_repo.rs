/// Follow graph repository.
///
/// Uniqueness of the (follower, followed) pair is the table's composite
/// primary key, so concurrent duplicate follow requests cannot produce a
/// duplicate edge; `ON CONFLICT DO NOTHING` makes the write idempotent.
use sqlx::{PgPool, Row};
use uuid::Uuid;

/// Idempotent create follow; returns true if a new edge was inserted.
pub async fn follow(
    pool: &PgPool,
    follower_id: Uuid,
    followed_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let affected = sqlx::query(
        r#"
        INSERT INTO follows (follower_id, followed_id)
        VALUES ($1, $2)
        ON CONFLICT (follower_id, followed_id) DO NOTHING
        "#,
    )
    .bind(follower_id)
    .bind(followed_id)
    .execute(pool)
    .await?
    .rows_affected();

    Ok(affected > 0)
}

/// Idempotent delete; returns true if an edge was removed.
pub async fn unfollow(
    pool: &PgPool,
    follower_id: Uuid,
    followed_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let affected = sqlx::query(
        r#"
        DELETE FROM follows
        WHERE follower_id = $1 AND followed_id = $2
        "#,
    )
    .bind(follower_id)
    .bind(followed_id)
    .execute(pool)
    .await?
    .rows_affected();

    Ok(affected > 0)
}

/// Existence check against the indexed unique pair
pub async fn is_following(
    pool: &PgPool,
    follower_id: Uuid,
    followed_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let row = sqlx::query(
        "SELECT EXISTS(SELECT 1 FROM follows WHERE follower_id = $1 AND followed_id = $2)",
    )
    .bind(follower_id)
    .bind(followed_id)
    .fetch_one(pool)
    .await?;

    Ok(row.get::<bool, _>(0))
}

/// Authors the given user follows, newest edge first
pub async fn following_of(pool: &PgPool, follower_id: Uuid) -> Result<Vec<Uuid>, sqlx::Error> {
    let rows = sqlx::query_as::<_, (Uuid,)>(
        r#"
        SELECT followed_id FROM follows
        WHERE follower_id = $1
        ORDER BY created_at DESC
        "#,
    )
    .bind(follower_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(|(id,)| id).collect())
}

/// Followers count for an author
pub async fn followers_count(pool: &PgPool, followed_id: Uuid) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM follows WHERE followed_id = $1")
        .bind(followed_id)
        .fetch_one(pool)
        .await
}
