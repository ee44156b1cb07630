//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `cache` - Redis connection configuration
//! - `database` - Database connection and pool configuration
//! - `email` - SMTP delivery configuration
//! - `verification` - Verification-code policy (length, TTL, rate limit)

pub mod cache;
pub mod database;
pub mod email;
pub mod verification;

// Re-export commonly used types
pub use cache::CacheConfig;
pub use database::DatabaseConfig;
pub use email::EmailConfig;
pub use verification::VerificationConfig;
