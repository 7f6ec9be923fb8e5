use crate::models::Group;
use sqlx::PgPool;

/// Find a group by unique slug
pub async fn find_by_slug(pool: &PgPool, slug: &str) -> Result<Option<Group>, sqlx::Error> {
    let group = sqlx::query_as::<_, Group>(
        r#"
        SELECT id, title, slug, description
        FROM groups
        WHERE slug = $1
        "#,
    )
    .bind(slug)
    .fetch_optional(pool)
    .await?;

    Ok(group)
}

/// Create a group
pub async fn create_group(
    pool: &PgPool,
    title: &str,
    slug: &str,
    description: &str,
) -> Result<Group, sqlx::Error> {
    let group = sqlx::query_as::<_, Group>(
        r#"
        INSERT INTO groups (title, slug, description)
        VALUES ($1, $2, $3)
        RETURNING id, title, slug, description
        "#,
    )
    .bind(title)
    .bind(slug)
    .bind(description)
    .fetch_one(pool)
    .await?;

    Ok(group)
}

/// List all groups ordered by title
pub async fn list_groups(pool: &PgPool) -> Result<Vec<Group>, sqlx::Error> {
    let groups = sqlx::query_as::<_, Group>(
        r#"
        SELECT id, title, slug, description
        FROM groups
        ORDER BY title
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(groups)
}
