use crate::models::User;
use sqlx::PgPool;
use uuid::Uuid;

/// Find a user by unique username
pub async fn find_by_username(pool: &PgPool, username: &str) -> Result<Option<User>, sqlx::Error> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, username, created_at
        FROM users
        WHERE username = $1
        "#,
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Find a user by id
pub async fn find_by_id(pool: &PgPool, user_id: Uuid) -> Result<Option<User>, sqlx::Error> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, username, created_at
        FROM users
        WHERE id = $1
        "#,
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Create a user row. Registration itself lives in the identity service;
/// this exists for provisioning and test fixtures.
pub async fn create_user(pool: &PgPool, id: Uuid, username: &str) -> Result<User, sqlx::Error> {
    let user = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (id, username)
        VALUES ($1, $2)
        RETURNING id, username, created_at
        "#,
    )
    .bind(id)
    .bind(username)
    .fetch_one(pool)
    .await?;

    Ok(user)
}
