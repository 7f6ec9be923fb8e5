/// HTTP request handlers
///
/// Handlers return JSON page contexts; the presentation layer (external)
/// renders them. Redirects use 303 See Other after mutations and after
/// permission no-ops, mirroring the original post/redirect/get flow.
pub mod comments;
pub mod follows;
pub mod posts;

use actix_web::http::header::LOCATION;
use actix_web::HttpResponse;
use sqlx::PgPool;

pub use comments::add_comment;
pub use follows::{follow_index, profile_follow, profile_unfollow};
pub use posts::{
    group_posts, index, post_create, post_create_form, post_delete, post_detail, post_edit,
    post_edit_form, profile,
};

pub(crate) fn see_other(location: String) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((LOCATION, location))
        .finish()
}

pub(crate) fn profile_url(username: &str) -> String {
    format!("/profile/{}/", username)
}

pub(crate) fn post_detail_url(post_id: i64) -> String {
    format!("/posts/{}/", post_id)
}

/// Health check: the service is up and can reach its database.
pub async fn health(pool: actix_web::web::Data<PgPool>) -> HttpResponse {
    match sqlx::query("SELECT 1").fetch_one(pool.get_ref()).await {
        Ok(_) => HttpResponse::Ok().json(serde_json::json!({
            "status": "ok",
            "service": "blog-service",
            "version": env!("CARGO_PKG_VERSION"),
        })),
        Err(e) => HttpResponse::ServiceUnavailable().json(serde_json::json!({
            "status": "unhealthy",
            "error": format!("database connection failed: {}", e),
            "service": "blog-service",
        })),
    }
}
