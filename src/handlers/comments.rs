/// Comment handlers
use actix_web::{web, HttpResponse};

use crate::error::{AppError, Result};
use crate::middleware::UserId;
use crate::models::CommentDraft;
use crate::services::CommentService;

use super::{post_detail_url, see_other};

/// Create a comment on a post; the author is always the acting user.
/// Redirects back to the detail view, like the original post/redirect/get
/// flow.
pub async fn add_comment(
    service: web::Data<CommentService>,
    post_id: web::Path<i64>,
    user: UserId,
    draft: web::Json<CommentDraft>,
) -> Result<HttpResponse> {
    match service.add_comment(user.0, *post_id, &draft).await {
        Ok(comment) => Ok(see_other(post_detail_url(comment.post_id))),
        Err(AppError::Validation(errors)) => Ok(HttpResponse::BadRequest().json(
            serde_json::json!({
                "errors": errors,
                "form": &*draft,
            }),
        )),
        Err(other) => Err(other),
    }
}
