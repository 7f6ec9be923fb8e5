/// Blog Service Library
///
/// A blogging platform: users author posts, organize them into groups,
/// comment on posts, and follow other authors to receive a personalized feed.
///
/// # Modules
///
/// - `handlers`: HTTP request handlers returning JSON page contexts
/// - `models`: Data structures for users, groups, posts, comments, follows
/// - `services`: Business logic layer (mutation guards, feed assembly)
/// - `db`: Database access layer and repositories
/// - `pagination`: Fixed-size page slicing with clamp semantics
/// - `cache`: Home page caching and invalidation
/// - `middleware`: Bearer-token authentication with login redirects
/// - `error`: Error types and handling
/// - `config`: Configuration management
/// - `metrics`: Observability and metrics collection
pub mod cache;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod models;
pub mod pagination;
pub mod routes;
pub mod services;

pub use config::Config;
pub use error::{AppError, Result};
