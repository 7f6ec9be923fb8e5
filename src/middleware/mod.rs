/// HTTP middleware for blog-service
///
/// Bearer-token authentication. Session management lives outside this
/// service; the middleware only validates the token and stores the acting
/// user id in request extensions. Unauthenticated access to a guarded route
/// is recovered by a redirect to the login endpoint with a `next` return
/// path, never surfaced as a bare 401.
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{web, Error, FromRequest, HttpMessage, HttpRequest};
use futures::future::LocalBoxFuture;
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use std::future::{ready, Ready};
use std::rc::Rc;
use uuid::Uuid;

use crate::config::Config;
use crate::error::AppError;

/// Bearer token claims; `sub` is the user id.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
}

/// Extracted user identifier stored in request extensions after auth.
#[derive(Debug, Clone)]
pub struct UserId(pub Uuid);

/// Optional identity for public routes that personalize when a token is
/// present (e.g. the `following` flag on a profile page).
#[derive(Debug, Clone)]
pub struct MaybeUserId(pub Option<Uuid>);

/// Strip the Bearer scheme from an Authorization header value.
fn bearer_token(header: &str) -> Option<&str> {
    header.strip_prefix("Bearer ")
}

/// Validate a token and extract the user id from its subject.
pub fn decode_user(token: &str, secret: &str) -> Option<Uuid> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .ok()?;

    Uuid::parse_str(&data.claims.sub).ok()
}

fn user_from_headers(req: &HttpRequest, secret: &str) -> Option<Uuid> {
    let header = req.headers().get("Authorization")?.to_str().ok()?;
    decode_user(bearer_token(header)?, secret)
}

/// Actix middleware guarding auth-required routes. Failure redirects to
/// login with the original path as the return target.
pub struct AuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
        }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();

        Box::pin(async move {
            let config = req
                .app_data::<web::Data<Config>>()
                .ok_or_else(|| AppError::Internal("configuration missing".to_string()))?;

            let login_url = config.auth.login_url.clone();
            let secret = config.auth.jwt_secret.clone();
            let next = req.path().to_string();

            let token = req
                .headers()
                .get("Authorization")
                .and_then(|h| h.to_str().ok())
                .and_then(bearer_token);

            let user_id = token
                .and_then(|t| decode_user(t, &secret))
                .ok_or_else(|| AppError::unauthenticated(&login_url, &next))?;

            req.extensions_mut().insert(UserId(user_id));

            service.call(req).await
        })
    }
}

impl FromRequest for UserId {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<UserId>()
                .cloned()
                .ok_or_else(|| AppError::Internal("user id missing from request".to_string()).into()),
        )
    }
}

impl FromRequest for MaybeUserId {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let from_extensions = req.extensions().get::<UserId>().map(|u| u.0);
        let user = from_extensions.or_else(|| {
            req.app_data::<web::Data<Config>>()
                .and_then(|config| user_from_headers(req, &config.auth.jwt_secret))
        });

        ready(Ok(MaybeUserId(user)))
    }
}
