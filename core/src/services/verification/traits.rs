//! Storage and delivery ports implemented by the infrastructure layer

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::entities::verification_code::{CodePurpose, VerificationCode};

use super::types::VerificationStats;

/// Trait for the expiring key-value store (the fast path).
///
/// The store enforces expiry itself: `get` after an entry's TTL has
/// elapsed returns `None`, and `put` is a total overwrite with TTL
/// reset. Callers must assume single-key atomicity and nothing more.
#[async_trait]
pub trait CacheStoreTrait: Send + Sync {
    /// Store a value under a key with a TTL in seconds
    async fn put(&self, key: &str, value: &str, ttl_seconds: u64) -> Result<(), String>;
    /// Fetch a value; `None` if absent or expired
    async fn get(&self, key: &str) -> Result<Option<String>, String>;
    /// Remove a key (no-op if absent)
    async fn delete(&self, key: &str) -> Result<(), String>;
    /// Check whether a live entry exists for a key
    async fn exists(&self, key: &str) -> Result<bool, String>;
    /// Remaining TTL in seconds; `None` if the key has no live entry
    async fn ttl(&self, key: &str) -> Result<Option<i64>, String>;
}

/// Trait for the durable verification-code record store (the fallback
/// and audit path). Tolerant of lagging behind the cache.
#[async_trait]
pub trait CodeRepositoryTrait: Send + Sync {
    /// Append an issuance record
    async fn insert(&self, record: &VerificationCode) -> Result<(), String>;

    /// Most recently issued unused, unexpired record for the pair
    async fn find_active(
        &self,
        email: &str,
        purpose: CodePurpose,
    ) -> Result<Option<VerificationCode>, String>;

    /// Mark a record consumed. Returns `true` only for the call that
    /// actually flipped `used`; a record already consumed yields `false`.
    async fn mark_used(&self, id: Uuid) -> Result<bool, String>;

    /// Mark the active record matching this exact code as consumed.
    /// Same exclusivity contract as [`mark_used`](Self::mark_used).
    async fn mark_code_used(
        &self,
        email: &str,
        purpose: CodePurpose,
        code: &str,
    ) -> Result<bool, String>;

    /// Delete every record whose expiry lies before `cutoff`, returning
    /// the number of rows removed. Invoked by the cleanup job only.
    async fn delete_expired_before(&self, cutoff: DateTime<Utc>) -> Result<u64, String>;

    /// Issuance statistics for one email address
    async fn issued_stats(&self, email: &str) -> Result<VerificationStats, String>;
}

/// Trait for the email delivery service
#[async_trait]
pub trait EmailServiceTrait: Send + Sync {
    /// Deliver a verification code to an address for the given flow
    async fn send_verification_code(
        &self,
        email: &str,
        code: &str,
        purpose: CodePurpose,
    ) -> Result<(), String>;
}
