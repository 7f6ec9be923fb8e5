/// Follow handlers - personalized feed and follow graph mutations
use actix_web::{web, HttpResponse};

use crate::error::Result;
use crate::middleware::UserId;
use crate::services::FollowService;

use super::posts::PageQuery;
use super::{profile_url, see_other};

/// Paginated feed of posts by authors the acting user follows
pub async fn follow_index(
    service: web::Data<FollowService>,
    user: UserId,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse> {
    let page = service.feed_page(user.0, query.number()).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "page": page })))
}

/// Follow an author (idempotent; self-follow is a no-op), then return to
/// their profile.
pub async fn profile_follow(
    service: web::Data<FollowService>,
    username: web::Path<String>,
    user: UserId,
) -> Result<HttpResponse> {
    let author = service.author_by_username(&username).await?;
    service.follow(user.0, author.id).await?;

    Ok(see_other(profile_url(&author.username)))
}

/// Unfollow an author (idempotent), then return to their profile.
pub async fn profile_unfollow(
    service: web::Data<FollowService>,
    username: web::Path<String>,
    user: UserId,
) -> Result<HttpResponse> {
    let author = service.author_by_username(&username).await?;
    service.unfollow(user.0, author.id).await?;

    Ok(see_other(profile_url(&author.username)))
}
