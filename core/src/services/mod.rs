//! Business services

pub mod verification;

pub use verification::{
    CacheStoreTrait, CleanupConfig, CodeCleanupJob, CodeRepositoryTrait, EmailServiceTrait,
    RateLimiter, VerificationCodeService, VerificationStats,
};
