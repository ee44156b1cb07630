//! Main verification service implementation

use std::sync::Arc;

use chrono::Utc;
use constant_time_eq::constant_time_eq;
use tracing::{debug, error, info, warn};

use vm_shared::config::VerificationConfig;
use vm_shared::utils::email::mask_email;

use crate::domain::entities::verification_code::{CodePurpose, VerificationCode};
use crate::errors::{DomainError, DomainResult};

use super::generator;
use super::keys;
use super::rate_limiter::RateLimiter;
use super::traits::{CacheStoreTrait, CodeRepositoryTrait, EmailServiceTrait};
use super::types::VerificationStats;

/// Verification service coordinating the cache, the database and the
/// email delivery service.
///
/// The cache holds the single live code per (email, purpose) pair and
/// is authoritative for the common case; the database is an append-only
/// fallback that may lag behind. The service never holds a lock across
/// the two stores: every step is one independent store operation, and
/// each is attempted exactly once.
pub struct VerificationCodeService<C, R, N>
where
    C: CacheStoreTrait,
    R: CodeRepositoryTrait,
    N: EmailServiceTrait,
{
    /// Expiring store for live codes and rate-limit markers
    cache: Arc<C>,
    /// Durable record store, best-effort on the issue path
    repository: Arc<R>,
    /// Email delivery service
    email_service: Arc<N>,
    /// Cool-down gate sharing the cache store
    rate_limiter: RateLimiter<C>,
    /// Policy configuration
    config: VerificationConfig,
}

impl<C, R, N> VerificationCodeService<C, R, N>
where
    C: CacheStoreTrait,
    R: CodeRepositoryTrait,
    N: EmailServiceTrait,
{
    /// Create a new verification service
    pub fn new(
        cache: Arc<C>,
        repository: Arc<R>,
        email_service: Arc<N>,
        config: VerificationConfig,
    ) -> Self {
        let rate_limiter = RateLimiter::new(Arc::clone(&cache), config.rate_limit_minutes);

        Self {
            cache,
            repository,
            email_service,
            rate_limiter,
            config,
        }
    }

    /// Issue a verification code and deliver it by email.
    ///
    /// Step order matters:
    /// 1. rate-limit check (an outage here blocks issuance)
    /// 2. generate the code
    /// 3. write it to the cache with the configured TTL
    /// 4. set the rate-limit marker - after the cache write so a failed
    ///    write does not consume the send quota, before delivery so a
    ///    failed send still counts against the window
    /// 5. best-effort database insert (logged, never fails the call)
    /// 6. deliver by email
    pub async fn issue(&self, email: &str, purpose: CodePurpose) -> DomainResult<()> {
        if self.rate_limiter.is_limited(email).await? {
            let minutes = self.rate_limiter.remaining_minutes(email).await;
            warn!(
                email = %mask_email(email),
                event = "issue_rate_limited",
                remaining_minutes = minutes,
                "Verification code request inside cool-down window"
            );
            return Err(DomainError::RateLimited { minutes });
        }

        let code = generator::generate_code(self.config.code_length);

        self.cache
            .put(
                &keys::code_key(email, purpose),
                &code,
                self.config.expire_seconds(),
            )
            .await
            .map_err(|e| {
                error!(
                    email = %mask_email(email),
                    error = %e,
                    event = "code_storage_failed",
                    "Failed to store verification code in cache"
                );
                DomainError::Internal {
                    message: format!("Failed to store verification code: {}", e),
                }
            })?;

        self.rate_limiter.mark_sent(email).await?;

        let record = VerificationCode::new(email, purpose, code.as_str(), self.config.expire_minutes);
        if let Err(e) = self.repository.insert(&record).await {
            // Database lag never fails issuance; the cache entry is
            // authoritative for the code's lifetime
            error!(
                email = %mask_email(email),
                purpose = %purpose,
                error = %e,
                event = "code_record_insert_failed",
                "Failed to persist verification code record, continuing"
            );
        }

        self.email_service
            .send_verification_code(email, &code, purpose)
            .await
            .map_err(|e| {
                error!(
                    email = %mask_email(email),
                    purpose = %purpose,
                    error = %e,
                    event = "code_delivery_failed",
                    "Failed to deliver verification code"
                );
                DomainError::DeliveryFailed { message: e }
            })?;

        info!(
            email = %mask_email(email),
            purpose = %purpose,
            event = "code_issued",
            "Verification code issued"
        );
        Ok(())
    }

    /// Validate a code against the cache first, falling back to the
    /// database only when the cache has no live entry (or is down).
    ///
    /// A mismatch against a live cache entry fails immediately: the
    /// cached code is the only currently valid one, and consulting the
    /// database would let a stale earlier issuance through.
    ///
    /// Returns a plain bool; the caller cannot distinguish wrong from
    /// expired or absent.
    pub async fn validate(&self, email: &str, code: &str, purpose: CodePurpose) -> bool {
        let key = keys::code_key(email, purpose);

        match self.cache.get(&key).await {
            Ok(Some(stored)) => {
                if !codes_match(&stored, code) {
                    warn!(
                        email = %mask_email(email),
                        purpose = %purpose,
                        event = "code_mismatch",
                        "Verification code does not match live entry"
                    );
                    return false;
                }

                if let Err(e) = self.cache.delete(&key).await {
                    warn!(
                        email = %mask_email(email),
                        error = %e,
                        "Failed to delete consumed code from cache"
                    );
                }

                // Best-effort: keep the database row in step so the
                // fallback path can never accept this code again. The
                // outcome does not change the validation result.
                if let Err(e) = self
                    .repository
                    .mark_code_used(email, purpose, code)
                    .await
                {
                    warn!(
                        email = %mask_email(email),
                        purpose = %purpose,
                        error = %e,
                        event = "code_record_update_failed",
                        "Failed to mark verification code record used"
                    );
                }

                info!(
                    email = %mask_email(email),
                    purpose = %purpose,
                    event = "code_validated",
                    "Verification code validated from cache"
                );
                true
            }
            Ok(None) => self.validate_from_database(email, code, purpose).await,
            Err(e) => {
                warn!(
                    email = %mask_email(email),
                    error = %e,
                    event = "cache_unavailable",
                    "Cache unavailable, falling back to database validation"
                );
                self.validate_from_database(email, code, purpose).await
            }
        }
    }

    /// Remove expired rows from the database. The cache needs no sweep,
    /// its entries expire on their own.
    ///
    /// Returns the number of rows removed; failures are logged and
    /// reported as zero.
    pub async fn clean_expired_codes(&self) -> u64 {
        match self.repository.delete_expired_before(Utc::now()).await {
            Ok(deleted) => {
                if deleted > 0 {
                    info!(deleted, "Cleaned up expired verification codes");
                }
                deleted
            }
            Err(e) => {
                error!(error = %e, "Failed to clean up expired verification codes");
                0
            }
        }
    }

    /// Best-effort issuance statistics for an address. Returns `None`
    /// when the database cannot answer.
    pub async fn stats(&self, email: &str) -> Option<VerificationStats> {
        match self.repository.issued_stats(email).await {
            Ok(stats) => Some(stats),
            Err(e) => {
                error!(
                    email = %mask_email(email),
                    error = %e,
                    "Failed to read verification statistics"
                );
                None
            }
        }
    }

    /// Fallback validation against the durable store.
    ///
    /// The record must match the code, be unexpired, and this call must
    /// be the one that flips `used` - a concurrent validation losing the
    /// conditional update is rejected, keeping the code single-use.
    async fn validate_from_database(&self, email: &str, code: &str, purpose: CodePurpose) -> bool {
        let record = match self.repository.find_active(email, purpose).await {
            Ok(Some(record)) => record,
            Ok(None) => {
                debug!(
                    email = %mask_email(email),
                    purpose = %purpose,
                    "No active verification code record found"
                );
                return false;
            }
            Err(e) => {
                error!(
                    email = %mask_email(email),
                    error = %e,
                    "Database validation failed"
                );
                return false;
            }
        };

        if !codes_match(&record.code, code) {
            warn!(
                email = %mask_email(email),
                purpose = %purpose,
                event = "code_mismatch",
                "Verification code does not match database record"
            );
            return false;
        }

        if record.is_expired() {
            // find_active filters on expiry, but the clock may have
            // moved past expires_at since the read
            return false;
        }

        match self.repository.mark_used(record.id).await {
            Ok(true) => {
                info!(
                    email = %mask_email(email),
                    purpose = %purpose,
                    event = "code_validated",
                    "Verification code validated from database"
                );
                true
            }
            Ok(false) => {
                warn!(
                    email = %mask_email(email),
                    purpose = %purpose,
                    "Verification code was already consumed"
                );
                false
            }
            Err(e) => {
                error!(
                    email = %mask_email(email),
                    error = %e,
                    "Failed to mark verification code used"
                );
                false
            }
        }
    }
}

/// Constant-time code comparison, length checked first
fn codes_match(stored: &str, provided: &str) -> bool {
    stored.len() == provided.len() && constant_time_eq(stored.as_bytes(), provided.as_bytes())
}
