//! Shared fixtures for database-backed integration tests.
//!
//! Tests are skipped unless TEST_DATABASE_URL points at a disposable
//! PostgreSQL database; migrations are applied on first connect. Cache
//! tests additionally need TEST_REDIS_URL.
#![allow(dead_code)]

use redis::aio::ConnectionManager;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use uuid::Uuid;

use blog_service::cache::HomeCache;
use blog_service::db::{group_repo, post_repo, user_repo};
use blog_service::models::{Group, Post, User};

pub async fn try_pool() -> Option<PgPool> {
    let url = match std::env::var("TEST_DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            eprintln!("TEST_DATABASE_URL not set; skipping database test");
            return None;
        }
    };

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&url)
        .await
        .expect("connect to test database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("apply migrations");

    Some(pool)
}

pub async fn try_home_cache() -> Option<HomeCache> {
    let url = match std::env::var("TEST_REDIS_URL") {
        Ok(url) => url,
        Err(_) => {
            eprintln!("TEST_REDIS_URL not set; skipping cache test");
            return None;
        }
    };

    let client = redis::Client::open(url).expect("parse test Redis URL");
    let manager = ConnectionManager::new(client)
        .await
        .expect("connect to test Redis");

    Some(HomeCache::new(manager, 60))
}

pub async fn cleanup(pool: &PgPool) {
    sqlx::query("TRUNCATE follows, comments, posts, groups, users RESTART IDENTITY CASCADE")
        .execute(pool)
        .await
        .expect("truncate test tables");
}

pub async fn create_user(pool: &PgPool, username: &str) -> User {
    user_repo::create_user(pool, Uuid::new_v4(), username)
        .await
        .expect("create test user")
}

pub async fn create_group(pool: &PgPool, title: &str, slug: &str) -> Group {
    group_repo::create_group(pool, title, slug, "test group")
        .await
        .expect("create test group")
}

pub async fn create_post(pool: &PgPool, author: &User, text: &str) -> Post {
    post_repo::create_post(pool, author.id, text, None, None)
        .await
        .expect("create test post")
}

/// Insert a post with an explicit age so ordering assertions never depend on
/// sub-microsecond timestamp ties.
pub async fn create_post_aged(
    pool: &PgPool,
    author: &User,
    text: &str,
    group_id: Option<i64>,
    minutes_ago: i32,
) -> i64 {
    sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO posts (author_id, text, group_id, created_at)
        VALUES ($1, $2, $3, NOW() - make_interval(mins => $4))
        RETURNING id
        "#,
    )
    .bind(author.id)
    .bind(text)
    .bind(group_id)
    .bind(minutes_ago)
    .fetch_one(pool)
    .await
    .expect("create aged test post")
}
