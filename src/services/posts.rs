/// Post service - feed assembly and guarded post mutations
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::cache::HomeCache;
use crate::db::{comment_repo, group_repo, post_repo, user_repo};
use crate::error::{AppError, Result};
use crate::metrics::POST_MUTATIONS;
use crate::models::{Comment, Group, Post, PostDraft, User};
use crate::pagination::{Page, Paginator};

/// Outcome of an edit attempt. A non-author edit is not an error: the caller
/// redirects to the read-only detail view and nothing is persisted.
#[derive(Debug)]
pub enum EditOutcome {
    Updated(Post),
    NotAuthor { post_id: i64 },
}

/// Outcome of a delete attempt, mirroring [`EditOutcome`].
#[derive(Debug)]
pub enum DeleteOutcome {
    Deleted { author_username: String },
    NotAuthor { post_id: i64 },
}

#[derive(Clone)]
pub struct PostService {
    pool: PgPool,
    cache: Option<HomeCache>,
    paginator: Paginator,
}

impl PostService {
    pub fn new(pool: PgPool, paginator: Paginator) -> Self {
        Self {
            pool,
            cache: None,
            paginator,
        }
    }

    pub fn with_cache(pool: PgPool, paginator: Paginator, cache: HomeCache) -> Self {
        Self {
            pool,
            cache: Some(cache),
            paginator,
        }
    }

    /// Global feed. Page 1 is served from the home cache when warm; every
    /// cache failure degrades to a direct database read.
    pub async fn home_page(&self, requested: i64) -> Result<Page<Post>> {
        let wants_first = requested <= 1;

        if wants_first {
            if let Some(cache) = &self.cache {
                match cache.read().await {
                    Ok(Some(page)) => return Ok(page),
                    Ok(None) => {}
                    Err(err) => tracing::debug!("home cache read failed: {}", err),
                }
            }
        }

        let total = post_repo::count_all(&self.pool).await? as u64;
        let bounds = self.paginator.locate(total, requested);
        let posts = post_repo::list_all(&self.pool, bounds.limit, bounds.offset).await?;
        let page = Page::from_bounds(posts, bounds, total);

        if page.number == 1 {
            if let Some(cache) = &self.cache {
                if let Err(err) = cache.write(&page).await {
                    tracing::debug!("home cache write failed: {}", err);
                }
            }
        }

        Ok(page)
    }

    /// Posts in one group; unknown slug is a not-found condition.
    pub async fn group_page(&self, slug: &str, requested: i64) -> Result<(Group, Page<Post>)> {
        let group = group_repo::find_by_slug(&self.pool, slug)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("group '{}'", slug)))?;

        let total = post_repo::count_by_group(&self.pool, group.id).await? as u64;
        let bounds = self.paginator.locate(total, requested);
        let posts = post_repo::list_by_group(&self.pool, group.id, bounds.limit, bounds.offset)
            .await?;

        Ok((group, Page::from_bounds(posts, bounds, total)))
    }

    /// An author's posts plus their total count; unknown username is a
    /// not-found condition.
    pub async fn profile_page(
        &self,
        username: &str,
        requested: i64,
    ) -> Result<(User, i64, Page<Post>)> {
        let author = user_repo::find_by_username(&self.pool, username)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("user '{}'", username)))?;

        let total = post_repo::count_by_author(&self.pool, author.id).await?;
        let bounds = self.paginator.locate(total as u64, requested);
        let posts = post_repo::list_by_author(&self.pool, author.id, bounds.limit, bounds.offset)
            .await?;
        let page = Page::from_bounds(posts, bounds, total as u64);

        Ok((author, total, page))
    }

    pub async fn get_post(&self, post_id: i64) -> Result<Post> {
        post_repo::find_by_id(&self.pool, post_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("post {}", post_id)))
    }

    /// Post detail: the post, its comments in conversation order, and the
    /// author's total post count.
    pub async fn post_detail(&self, post_id: i64) -> Result<(Post, Vec<Comment>, i64)> {
        let post = self.get_post(post_id).await?;
        let comments = comment_repo::list_by_post(&self.pool, post_id).await?;
        let author_posts = post_repo::count_by_author(&self.pool, post.author_id).await?;

        Ok((post, comments, author_posts))
    }

    /// Groups available for the post form.
    pub async fn groups(&self) -> Result<Vec<Group>> {
        Ok(group_repo::list_groups(&self.pool).await?)
    }

    /// Validate and persist a new post. On validation failure nothing is
    /// persisted and the field errors are returned to the caller.
    pub async fn create_post(&self, author_id: Uuid, draft: &PostDraft) -> Result<Post> {
        draft.validate()?;

        let post = post_repo::create_post(
            &self.pool,
            author_id,
            &draft.text,
            draft.group_id,
            draft.image_key.as_deref(),
        )
        .await?;

        POST_MUTATIONS.with_label_values(&["create"]).inc();
        self.invalidate_home().await;

        Ok(post)
    }

    /// Edit an existing post. Only the original author may mutate it; any
    /// other actor gets a `NotAuthor` outcome and the row stays untouched.
    pub async fn edit_post(
        &self,
        actor: Uuid,
        post_id: i64,
        draft: &PostDraft,
    ) -> Result<EditOutcome> {
        let post = self.get_post(post_id).await?;

        if post.author_id != actor {
            return Ok(EditOutcome::NotAuthor { post_id });
        }

        draft.validate()?;

        let updated = post_repo::update_post(
            &self.pool,
            post_id,
            actor,
            &draft.text,
            draft.group_id,
            draft.image_key.as_deref(),
        )
        .await?
        .ok_or_else(|| AppError::NotFound(format!("post {}", post_id)))?;

        POST_MUTATIONS.with_label_values(&["edit"]).inc();
        self.invalidate_home().await;

        Ok(EditOutcome::Updated(updated))
    }

    /// Delete a post; comments cascade at the store level.
    pub async fn delete_post(&self, actor: Uuid, post_id: i64) -> Result<DeleteOutcome> {
        let post = self.get_post(post_id).await?;

        if post.author_id != actor {
            return Ok(DeleteOutcome::NotAuthor { post_id });
        }

        let deleted = post_repo::delete_post(&self.pool, post_id, actor).await?;
        if !deleted {
            return Err(AppError::NotFound(format!("post {}", post_id)));
        }

        POST_MUTATIONS.with_label_values(&["delete"]).inc();
        self.invalidate_home().await;

        Ok(DeleteOutcome::Deleted {
            author_username: post.author_username,
        })
    }

    async fn invalidate_home(&self) {
        if let Some(cache) = &self.cache {
            if let Err(err) = cache.invalidate().await {
                tracing::debug!("home cache invalidation failed: {}", err);
            }
        }
    }
}
