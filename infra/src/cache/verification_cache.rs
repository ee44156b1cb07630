//! Redis-backed expiring store for verification data
//!
//! Implements the `CacheStoreTrait` port over [`RedisClient`]. The
//! service layer owns the key scheme; this adapter only moves values
//! with their TTLs. Redis expires entries on its own, which is what
//! makes it the source of truth for an active, unconsumed code.

use async_trait::async_trait;

use vm_core::services::verification::CacheStoreTrait;

use crate::cache::RedisClient;

/// Expiring store for live verification codes and rate-limit markers
#[derive(Clone)]
pub struct VerificationCache {
    /// Redis client for cache operations
    redis_client: RedisClient,
}

impl VerificationCache {
    /// Create a new verification cache over an established client
    pub fn new(redis_client: RedisClient) -> Self {
        Self { redis_client }
    }
}

#[async_trait]
impl CacheStoreTrait for VerificationCache {
    async fn put(&self, key: &str, value: &str, ttl_seconds: u64) -> Result<(), String> {
        self.redis_client
            .set_with_expiry(key, value, ttl_seconds)
            .await
            .map_err(|e| e.to_string())
    }

    async fn get(&self, key: &str) -> Result<Option<String>, String> {
        self.redis_client.get(key).await.map_err(|e| e.to_string())
    }

    async fn delete(&self, key: &str) -> Result<(), String> {
        self.redis_client
            .delete(key)
            .await
            .map(|_| ())
            .map_err(|e| e.to_string())
    }

    async fn exists(&self, key: &str) -> Result<bool, String> {
        self.redis_client
            .exists(key)
            .await
            .map_err(|e| e.to_string())
    }

    async fn ttl(&self, key: &str) -> Result<Option<i64>, String> {
        self.redis_client.ttl(key).await.map_err(|e| e.to_string())
    }
}
