//! Verification service module for email-based authentication
//!
//! This module provides the complete verification-code workflow:
//! - code generation and delivery by email
//! - Redis-first storage with database fallback
//! - per-identity send rate limiting
//! - periodic cleanup of expired database rows

pub mod cleanup;
pub mod generator;
mod keys;
pub mod rate_limiter;
mod service;
mod traits;
mod types;

#[cfg(test)]
mod tests;

pub use cleanup::{CleanupConfig, CodeCleanupJob};
pub use rate_limiter::RateLimiter;
pub use service::VerificationCodeService;
pub use traits::{CacheStoreTrait, CodeRepositoryTrait, EmailServiceTrait};
pub use types::VerificationStats;
