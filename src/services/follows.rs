/// Follow service - follow graph mutations and the personalized feed
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::{follow_repo, post_repo, user_repo};
use crate::error::{AppError, Result};
use crate::metrics::FOLLOW_EVENTS;
use crate::models::{Post, User};
use crate::pagination::{Page, Paginator};

#[derive(Clone)]
pub struct FollowService {
    pool: PgPool,
    paginator: Paginator,
}

impl FollowService {
    pub fn new(pool: PgPool, paginator: Paginator) -> Self {
        Self { pool, paginator }
    }

    /// Resolve a username or report not-found.
    pub async fn author_by_username(&self, username: &str) -> Result<User> {
        user_repo::find_by_username(&self.pool, username)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("user '{}'", username)))
    }

    /// Idempotent follow. Following yourself is a silent no-op, matching the
    /// guard at the mutation boundary; the store's CHECK constraint closes
    /// the race behind it. Returns true if a new edge was created.
    pub async fn follow(&self, follower: Uuid, author: Uuid) -> Result<bool> {
        if follower == author {
            return Ok(false);
        }

        let created = follow_repo::follow(&self.pool, follower, author).await?;
        if created {
            FOLLOW_EVENTS.with_label_values(&["follow"]).inc();
        }

        Ok(created)
    }

    /// Idempotent unfollow; absent edge is a no-op.
    pub async fn unfollow(&self, follower: Uuid, author: Uuid) -> Result<bool> {
        let removed = follow_repo::unfollow(&self.pool, follower, author).await?;
        if removed {
            FOLLOW_EVENTS.with_label_values(&["unfollow"]).inc();
        }

        Ok(removed)
    }

    pub async fn is_following(&self, follower: Uuid, author: Uuid) -> Result<bool> {
        Ok(follow_repo::is_following(&self.pool, follower, author).await?)
    }

    /// Posts authored by anyone the user follows, newest first.
    pub async fn feed_page(&self, user: Uuid, requested: i64) -> Result<Page<Post>> {
        let total = post_repo::count_followed(&self.pool, user).await? as u64;
        let bounds = self.paginator.locate(total, requested);
        let posts = post_repo::list_followed(&self.pool, user, bounds.limit, bounds.offset).await?;

        Ok(Page::from_bounds(posts, bounds, total))
    }
}
