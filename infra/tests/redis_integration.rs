//! Integration tests for the Redis cache store
//!
//! These tests require a running Redis instance to execute.
//! Run with: cargo test -p vm_infra --test redis_integration -- --ignored

use vm_core::services::verification::CacheStoreTrait;
use vm_infra::cache::{CacheConfig, RedisClient, VerificationCache};

async fn connect() -> VerificationCache {
    let config = CacheConfig::from_env();
    let client = RedisClient::new(config)
        .await
        .expect("Failed to connect to Redis");
    VerificationCache::new(client)
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn test_put_get_delete_roundtrip() {
    let cache = connect().await;
    let key = "test:verification_code:a@x.com:register";

    cache.put(key, "123456", 300).await.unwrap();
    assert_eq!(cache.get(key).await.unwrap(), Some("123456".to_string()));
    assert!(cache.exists(key).await.unwrap());

    cache.delete(key).await.unwrap();
    assert_eq!(cache.get(key).await.unwrap(), None);
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn test_put_overwrites_and_resets_ttl() {
    let cache = connect().await;
    let key = "test:verification_code:b@x.com:login";

    cache.put(key, "111111", 60).await.unwrap();
    cache.put(key, "222222", 300).await.unwrap();

    assert_eq!(cache.get(key).await.unwrap(), Some("222222".to_string()));
    let ttl = cache.ttl(key).await.unwrap().unwrap();
    assert!(ttl > 60, "TTL should have been reset by the overwrite");

    cache.delete(key).await.unwrap();
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn test_entry_expires_on_its_own() {
    let cache = connect().await;
    let key = "test:verification_code:c@x.com:register";

    cache.put(key, "123456", 1).await.unwrap();
    tokio::time::sleep(std::time::Duration::from_millis(1500)).await;

    assert_eq!(cache.get(key).await.unwrap(), None);
    assert!(!cache.exists(key).await.unwrap());
    assert_eq!(cache.ttl(key).await.unwrap(), None);
}
