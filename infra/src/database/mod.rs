//! Database module - MySQL implementations using SQLx
//!
//! This module provides the database access layer:
//! - Connection pool management
//! - The verification-code repository

pub mod connection;
pub mod repositories;

// Re-export commonly used types
pub use connection::DatabasePool;
pub use repositories::VerificationCodeRepository;
