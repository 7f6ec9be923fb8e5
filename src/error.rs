/// Error types for blog-service
///
/// Errors are converted to HTTP responses for clients. Two failure classes
/// deliberately do not surface as error payloads: a missing session becomes a
/// redirect to the login page with a return path, and a non-author edit is a
/// typed outcome in the services layer, never an error.
use actix_web::http::header::LOCATION;
use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use thiserror::Error;
use validator::ValidationErrors;

/// Result type for blog-service operations
pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    /// Resource not found (unknown post id, group slug, or username)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Request payload failed validation; nothing was persisted
    #[error("Validation failed")]
    Validation(#[from] ValidationErrors),

    /// No valid bearer token; recovered by redirecting to login
    #[error("Authentication required")]
    Unauthenticated { location: String },

    /// Database operation failed
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Cache operation failed
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// Bad request
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Unauthenticated access, recovered by a redirect to `login_url` carrying
    /// the original path in a `next` parameter.
    pub fn unauthenticated(login_url: &str, next: &str) -> Self {
        AppError::Unauthenticated {
            location: format!("{}?next={}", login_url, urlencoding::encode(next)),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthenticated { .. } => StatusCode::FOUND,
            AppError::Database(_) | AppError::Cache(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::Unauthenticated { location } => HttpResponse::Found()
                .insert_header((LOCATION, location.clone()))
                .finish(),
            AppError::Validation(errors) => {
                HttpResponse::BadRequest().json(serde_json::json!({
                    "error": "Validation failed",
                    "fields": errors,
                    "status": StatusCode::BAD_REQUEST.as_u16(),
                }))
            }
            other => {
                let status = other.status_code();
                HttpResponse::build(status).json(serde_json::json!({
                    "error": other.to_string(),
                    "status": status.as_u16(),
                }))
            }
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_taxonomy() {
        assert_eq!(
            AppError::NotFound("post 1".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Internal("boom".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::BadRequest("nope".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn unauthenticated_redirects_to_login_with_return_path() {
        let err = AppError::unauthenticated("/auth/login", "/follow/");
        assert_eq!(err.status_code(), StatusCode::FOUND);

        let resp = err.error_response();
        let location = resp
            .headers()
            .get(LOCATION)
            .and_then(|v| v.to_str().ok())
            .unwrap();
        assert_eq!(location, "/auth/login?next=%2Ffollow%2F");
    }
}
