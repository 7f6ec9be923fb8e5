use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use redis::aio::ConnectionManager;
use std::io;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use blog_service::cache::HomeCache;
use blog_service::db;
use blog_service::pagination::Paginator;
use blog_service::routes;
use blog_service::services::{CommentService, FollowService, PostService};
use blog_service::Config;

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!("Configuration loading failed: {}", e);
            eprintln!("ERROR: Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!("Starting blog-service v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Environment: {}", config.app.env);

    // Database pool + migrations
    let pool = match db::connect(&config.database).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("Database initialization failed: {}", e);
            eprintln!("ERROR: Failed to initialize database: {}", e);
            std::process::exit(1);
        }
    };
    tracing::info!("Connected to database, migrations applied");

    // Home page cache. A missing Redis degrades to uncached reads rather
    // than refusing to start.
    let paginator = Paginator::new(config.pagination.posts_per_page);
    let home_cache = match redis::Client::open(config.cache.url.clone()) {
        Ok(client) => match ConnectionManager::new(client).await {
            Ok(manager) => {
                tracing::info!("Connected to Redis, home cache enabled");
                Some(HomeCache::new(manager, config.cache.home_ttl_secs))
            }
            Err(e) => {
                tracing::warn!("Redis unavailable ({}); home cache disabled", e);
                None
            }
        },
        Err(e) => {
            tracing::warn!("Invalid Redis URL ({}); home cache disabled", e);
            None
        }
    };

    let post_service = match home_cache {
        Some(cache) => PostService::with_cache(pool.clone(), paginator, cache),
        None => PostService::new(pool.clone(), paginator),
    };
    let comment_service = CommentService::new(pool.clone());
    let follow_service = FollowService::new(pool.clone(), paginator);

    let bind_address = format!("{}:{}", config.app.host, config.app.port);
    tracing::info!("Starting HTTP server at {}", bind_address);

    let allowed_origins = config.cors.allowed_origins.clone();
    let config_data = web::Data::new(config);
    let pool_data = web::Data::new(pool);
    let post_data = web::Data::new(post_service);
    let comment_data = web::Data::new(comment_service);
    let follow_data = web::Data::new(follow_service);

    HttpServer::new(move || {
        let mut cors = Cors::default();
        for origin in allowed_origins.split(',') {
            let origin = origin.trim();
            if origin == "*" {
                cors = cors.allow_any_origin();
            } else {
                cors = cors.allowed_origin(origin);
            }
        }
        cors = cors.allow_any_method().allow_any_header().max_age(3600);

        App::new()
            .app_data(config_data.clone())
            .app_data(pool_data.clone())
            .app_data(post_data.clone())
            .app_data(comment_data.clone())
            .app_data(follow_data.clone())
            .wrap(cors)
            .wrap(tracing_actix_web::TracingLogger::default())
            .configure(routes::configure)
    })
    .bind(&bind_address)?
    .run()
    .await
}
