//! Domain-specific error types for verification-code operations
//!
//! User-visible errors carry bilingual (English and Chinese) messages;
//! internal errors carry the failing detail for logs only.

use thiserror::Error;

/// Core domain errors for the verification subsystem
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Too many requests. Please try again in {minutes} minute(s) | 发送过于频繁，请{minutes}分钟后再试")]
    RateLimited { minutes: i64 },

    #[error("Failed to deliver verification code | 验证码发送失败")]
    DeliveryFailed { message: String },

    #[error("Verification code is invalid or expired | 验证码无效或已过期")]
    InvalidOrExpired,

    #[error("Internal error: {message}")]
    Internal { message: String },
}

pub type DomainResult<T> = Result<T, DomainError>;
