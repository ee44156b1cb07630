//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer for the VeriMail
//! verification service. It provides concrete implementations for the
//! storage and delivery ports defined in `vm_core`:
//!
//! - **Database**: MySQL verification-code repository using SQLx
//! - **Cache**: Redis client and the expiring code/marker store
//! - **Email**: SMTP delivery via lettre, plus a console mock
//!
//! ## Features
//!
//! - `mysql`: Enable the MySQL repository (default)
//! - `redis-cache`: Enable the Redis cache store (default)
//! - `smtp-email`: Enable SMTP delivery via lettre (default)

/// Cache module - Redis client and expiring store
#[cfg(feature = "redis-cache")]
pub mod cache;

/// Database module - MySQL implementations using SQLx
#[cfg(feature = "mysql")]
pub mod database;

/// Email module - verification-code delivery services
pub mod email;

/// Configuration management for infrastructure services
pub mod config {
    //! Bundles the per-service configs and loads them from the
    //! environment (`.env` honored via dotenvy).

    use serde::{Deserialize, Serialize};

    pub use vm_shared::config::{
        cache::CacheConfig, database::DatabaseConfig, email::EmailConfig,
        verification::VerificationConfig,
    };

    /// Infrastructure configuration settings
    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct InfrastructureConfig {
        /// Database configuration
        pub database: DatabaseConfig,
        /// Redis cache configuration
        pub cache: CacheConfig,
        /// SMTP delivery configuration
        pub email: EmailConfig,
        /// Verification-code policy
        pub verification: VerificationConfig,
    }

    impl Default for InfrastructureConfig {
        fn default() -> Self {
            Self {
                database: DatabaseConfig::default(),
                cache: CacheConfig::default(),
                email: EmailConfig::default(),
                verification: VerificationConfig::default(),
            }
        }
    }

    /// Load infrastructure configuration from environment variables
    pub fn load_config() -> InfrastructureConfig {
        dotenvy::dotenv().ok(); // Load .env file if present

        InfrastructureConfig {
            database: DatabaseConfig::from_env(),
            cache: CacheConfig::from_env(),
            email: EmailConfig::from_env(),
            verification: VerificationConfig::from_env(),
        }
    }
}

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Email delivery error
    #[error("Email service error: {0}")]
    Email(String),

    /// General infrastructure error
    #[error("Infrastructure error: {0}")]
    General(String),
}
