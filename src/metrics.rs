/// Metrics collection for blog-service
use actix_web::HttpResponse;
use once_cell::sync::Lazy;
use prometheus::{register_int_counter_vec, Encoder, IntCounterVec, TextEncoder};

/// Home page cache events, labeled hit/miss/error
pub static HOME_CACHE_EVENTS: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "blog_home_cache_events_total",
        "Home page cache events",
        &["outcome"]
    )
    .expect("register blog_home_cache_events_total")
});

/// Post mutations, labeled create/edit/delete
pub static POST_MUTATIONS: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "blog_post_mutations_total",
        "Successful post mutations",
        &["kind"]
    )
    .expect("register blog_post_mutations_total")
});

/// Follow graph mutations, labeled follow/unfollow
pub static FOLLOW_EVENTS: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "blog_follow_events_total",
        "Follow graph mutations",
        &["kind"]
    )
    .expect("register blog_follow_events_total")
});

/// Render all registered metrics in the Prometheus text format.
pub fn gather_metrics() -> String {
    let encoder = TextEncoder::new();
    let families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&families, &mut buffer) {
        tracing::error!("Failed to encode metrics: {}", e);
        return String::new();
    }
    String::from_utf8(buffer).unwrap_or_default()
}

/// `/metrics` endpoint
pub async fn serve_metrics() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/plain; version=0.0.4")
        .body(gather_metrics())
}
