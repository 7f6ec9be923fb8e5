/// Post handlers - feed pages, post detail, and guarded mutations
use actix_web::{web, HttpResponse};
use serde::{Deserialize, Deserializer};

use crate::error::{AppError, Result};
use crate::middleware::{MaybeUserId, UserId};
use crate::models::PostDraft;
use crate::services::{DeleteOutcome, EditOutcome, FollowService, PostService};

use super::{post_detail_url, profile_url, see_other};

/// `?page=N` on every list endpoint; 1-based, clamped. A non-numeric value
/// is treated like a missing one and serves page 1, so no list endpoint
/// ever rejects a request over its page parameter.
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    #[serde(default, deserialize_with = "lenient_page")]
    pub page: Option<i64>,
}

fn lenient_page<'de, D>(deserializer: D) -> std::result::Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| value.parse().ok()))
}

impl PageQuery {
    pub fn number(&self) -> i64 {
        self.page.unwrap_or(1)
    }
}

/// Global feed page context
pub async fn index(
    service: web::Data<PostService>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse> {
    let page = service.home_page(query.number()).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "page": page })))
}

/// Posts of one group
pub async fn group_posts(
    service: web::Data<PostService>,
    slug: web::Path<String>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse> {
    let (group, page) = service.group_page(&slug, query.number()).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "group": group,
        "page": page,
    })))
}

/// An author's profile: their posts, post count, and whether the viewer
/// follows them (always false for anonymous viewers).
pub async fn profile(
    posts: web::Data<PostService>,
    follows: web::Data<FollowService>,
    username: web::Path<String>,
    query: web::Query<PageQuery>,
    viewer: MaybeUserId,
) -> Result<HttpResponse> {
    let (author, posts_count, page) = posts.profile_page(&username, query.number()).await?;

    let following = match viewer.0 {
        Some(viewer_id) => follows.is_following(viewer_id, author.id).await?,
        None => false,
    };

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "author": author,
        "posts_count": posts_count,
        "following": following,
        "page": page,
    })))
}

/// Single post with its comments
pub async fn post_detail(
    service: web::Data<PostService>,
    post_id: web::Path<i64>,
) -> Result<HttpResponse> {
    let (post, comments, author_posts_count) = service.post_detail(*post_id).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "post": post,
        "comments": comments,
        "author_posts_count": author_posts_count,
    })))
}

/// Blank form context for the create view
pub async fn post_create_form(service: web::Data<PostService>) -> Result<HttpResponse> {
    let groups = service.groups().await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "form": { "text": "", "group_id": null, "image_key": null },
        "groups": groups,
    })))
}

/// Create a post; on success redirect to the author's profile. On validation
/// failure nothing is persisted and the submitted input comes back with
/// field-level errors.
pub async fn post_create(
    service: web::Data<PostService>,
    user: UserId,
    draft: web::Json<PostDraft>,
) -> Result<HttpResponse> {
    match service.create_post(user.0, &draft).await {
        Ok(post) => Ok(see_other(profile_url(&post.author_username))),
        Err(AppError::Validation(errors)) => Ok(HttpResponse::BadRequest().json(
            serde_json::json!({
                "errors": errors,
                "form": &*draft,
            }),
        )),
        Err(other) => Err(other),
    }
}

/// Pre-filled form context for the edit view. A non-author lands back on the
/// read-only detail view.
pub async fn post_edit_form(
    service: web::Data<PostService>,
    post_id: web::Path<i64>,
    user: UserId,
) -> Result<HttpResponse> {
    let post = service.get_post(*post_id).await?;

    if post.author_id != user.0 {
        return Ok(see_other(post_detail_url(post.id)));
    }

    let groups = service.groups().await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "form": {
            "text": post.text,
            "group_id": post.group_id,
            "image_key": post.image_key,
        },
        "post_id": post.id,
        "is_edit": true,
        "groups": groups,
    })))
}

/// Edit a post. Author-only: any other actor is redirected to the detail
/// view without mutation and without a surfaced error.
pub async fn post_edit(
    service: web::Data<PostService>,
    post_id: web::Path<i64>,
    user: UserId,
    draft: web::Json<PostDraft>,
) -> Result<HttpResponse> {
    match service.edit_post(user.0, *post_id, &draft).await {
        Ok(EditOutcome::Updated(post)) => Ok(see_other(post_detail_url(post.id))),
        Ok(EditOutcome::NotAuthor { post_id }) => Ok(see_other(post_detail_url(post_id))),
        Err(AppError::Validation(errors)) => Ok(HttpResponse::BadRequest().json(
            serde_json::json!({
                "errors": errors,
                "form": &*draft,
            }),
        )),
        Err(other) => Err(other),
    }
}

/// Delete a post (author-only); comments cascade.
pub async fn post_delete(
    service: web::Data<PostService>,
    post_id: web::Path<i64>,
    user: UserId,
) -> Result<HttpResponse> {
    match service.delete_post(user.0, *post_id).await? {
        DeleteOutcome::Deleted { author_username } => {
            Ok(see_other(profile_url(&author_username)))
        }
        DeleteOutcome::NotAuthor { post_id } => Ok(see_other(post_detail_url(post_id))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(query: &str) -> PageQuery {
        web::Query::<PageQuery>::from_query(query)
            .expect("page parameter must never reject a request")
            .into_inner()
    }

    #[test]
    fn numeric_page_is_used() {
        assert_eq!(parse("page=3").number(), 3);
        assert_eq!(parse("page=-2").number(), -2);
    }

    #[test]
    fn missing_page_defaults_to_first() {
        assert_eq!(parse("").number(), 1);
    }

    #[test]
    fn non_numeric_page_falls_back_to_first() {
        assert_eq!(parse("page=abc").number(), 1);
        assert_eq!(parse("page=").number(), 1);
        assert_eq!(parse("page=2.5").number(), 1);
    }
}
