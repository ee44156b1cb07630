//! Per-identity send-rate limiter
//!
//! A single expiring marker in the cache store is the entire state:
//! its presence means the identity is cooling down, its TTL is the
//! remaining wait. The marker is identity-scoped, not purpose-scoped,
//! so a send for one flow gates all flows.

use std::sync::Arc;

use tracing::debug;

use crate::errors::{DomainError, DomainResult};

use super::keys;
use super::traits::CacheStoreTrait;

/// Cool-down gate over the expiring marker
pub struct RateLimiter<C: CacheStoreTrait> {
    cache: Arc<C>,
    window_minutes: i64,
}

impl<C: CacheStoreTrait> RateLimiter<C> {
    /// Create a rate limiter with the given cool-down window
    pub fn new(cache: Arc<C>, window_minutes: i64) -> Self {
        Self {
            cache,
            window_minutes,
        }
    }

    /// Whether a live marker currently blocks this identity.
    ///
    /// A store failure propagates: the check must complete before any
    /// code is generated, so an outage here blocks issuance.
    pub async fn is_limited(&self, email: &str) -> DomainResult<bool> {
        self.cache
            .exists(&keys::rate_limit_key(email))
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to check rate limit: {}", e),
            })
    }

    /// Write the marker, unconditionally overwriting any prior one.
    /// Every send attempt that reaches this point restarts the window.
    pub async fn mark_sent(&self, email: &str) -> DomainResult<()> {
        let ttl_seconds = (self.window_minutes.max(0) as u64) * 60;
        self.cache
            .put(&keys::rate_limit_key(email), "1", ttl_seconds)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to set rate limit marker: {}", e),
            })?;

        debug!(
            window_minutes = self.window_minutes,
            "Rate limit marker set"
        );
        Ok(())
    }

    /// Minutes until the marker expires, rounded up for user messaging.
    /// Falls back to the configured window when the TTL is unreadable.
    pub async fn remaining_minutes(&self, email: &str) -> i64 {
        match self.cache.ttl(&keys::rate_limit_key(email)).await {
            Ok(Some(seconds)) if seconds > 0 => (seconds + 59) / 60,
            _ => self.window_minutes,
        }
    }
}
