//! Route configuration
//!
//! Centralized route setup extracted from main.rs. Public pages are
//! registered first; everything behind the auth middleware redirects
//! unauthenticated visitors to the login endpoint with a return path.

use actix_web::web;

use crate::handlers;
use crate::metrics;
use crate::middleware::AuthMiddleware;

/// Configure all routes for the application
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        // Operational endpoints
        .route("/healthz", web::get().to(handlers::health))
        .route("/metrics", web::get().to(metrics::serve_metrics))
        // Public pages
        .route("/", web::get().to(handlers::index))
        .route("/group/{slug}/", web::get().to(handlers::group_posts))
        .route("/profile/{username}/", web::get().to(handlers::profile))
        .route("/posts/{id}/", web::get().to(handlers::post_detail))
        // Auth-required pages
        .service(
            web::scope("")
                .wrap(AuthMiddleware)
                .route("/create/", web::get().to(handlers::post_create_form))
                .route("/create/", web::post().to(handlers::post_create))
                .route("/posts/{id}/edit/", web::get().to(handlers::post_edit_form))
                .route("/posts/{id}/edit/", web::post().to(handlers::post_edit))
                .route("/posts/{id}/delete/", web::post().to(handlers::post_delete))
                .route("/posts/{id}/comment/", web::post().to(handlers::add_comment))
                .route("/follow/", web::get().to(handlers::follow_index))
                .route(
                    "/profile/{username}/follow/",
                    web::post().to(handlers::profile_follow),
                )
                .route(
                    "/profile/{username}/unfollow/",
                    web::post().to(handlers::profile_unfollow),
                ),
        );
}
