/// Database access layer
///
/// Repositories are plain async query functions over `&PgPool`. They return
/// `sqlx::Error` and leave the mapping to domain errors to the services
/// layer.
pub mod comment_repo;
pub mod follow_repo;
pub mod group_repo;
pub mod post_repo;
pub mod user_repo;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::config::DatabaseConfig;

/// Create the connection pool and apply pending migrations.
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    Ok(pool)
}
