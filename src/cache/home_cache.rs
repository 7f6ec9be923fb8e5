use redis::{aio::ConnectionManager, AsyncCommands};
use std::time::Duration;
use tracing::debug;

use crate::error::{AppError, Result};
use crate::metrics::HOME_CACHE_EVENTS;
use crate::models::Post;
use crate::pagination::Page;

/// Redis-backed cache for the first page of the global feed.
///
/// Only page 1 is cached: it is the page every anonymous visitor hits.
/// Entries expire after the configured TTL and are invalidated explicitly by
/// every post mutation, so a deleted post never outlives the cache knowingly.
#[derive(Clone)]
pub struct HomeCache {
    redis: ConnectionManager,
    ttl: Duration,
}

impl HomeCache {
    pub fn new(redis: ConnectionManager, ttl_secs: u64) -> Self {
        Self {
            redis,
            ttl: Duration::from_secs(ttl_secs.max(1)),
        }
    }

    fn key() -> &'static str {
        "home:v1:page:1"
    }

    pub async fn read(&self) -> Result<Option<Page<Post>>> {
        let mut conn = self.redis.clone();

        match conn.get::<_, Option<String>>(Self::key()).await {
            Ok(Some(data)) => {
                HOME_CACHE_EVENTS.with_label_values(&["hit"]).inc();
                debug!("home cache HIT");
                serde_json::from_str::<Page<Post>>(&data)
                    .map(Some)
                    .map_err(|e| AppError::Internal(format!("cache deserialization error: {}", e)))
            }
            Ok(None) => {
                HOME_CACHE_EVENTS.with_label_values(&["miss"]).inc();
                debug!("home cache MISS");
                Ok(None)
            }
            Err(e) => {
                HOME_CACHE_EVENTS.with_label_values(&["error"]).inc();
                Err(AppError::Cache(e))
            }
        }
    }

    pub async fn write(&self, page: &Page<Post>) -> Result<()> {
        let data = serde_json::to_string(page)
            .map_err(|e| AppError::Internal(format!("cache serialization error: {}", e)))?;

        let mut conn = self.redis.clone();
        conn.set_ex::<_, _, ()>(Self::key(), data, self.ttl.as_secs())
            .await
            .map_err(AppError::Cache)?;

        debug!("home cache WRITE with TTL {:?}", self.ttl);
        Ok(())
    }

    /// Invalidation hook, called by every post mutation.
    pub async fn invalidate(&self) -> Result<()> {
        let mut conn = self.redis.clone();
        conn.del::<_, ()>(Self::key())
            .await
            .map_err(AppError::Cache)?;

        debug!("home cache INVALIDATE");
        Ok(())
    }
}
