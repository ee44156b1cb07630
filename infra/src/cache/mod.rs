//! Cache module for Redis-based storage
//!
//! Provides the Redis client and the expiring store used for live
//! verification codes and rate-limit markers.

pub mod redis_client;
pub mod verification_cache;

pub use redis_client::RedisClient;
pub use verification_cache::VerificationCache;

// Re-export commonly used types
pub use vm_shared::config::cache::CacheConfig;
