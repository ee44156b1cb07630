//! # VeriMail Core
//!
//! Core business logic and domain layer for the VeriMail backend.
//! This crate contains the verification-code domain entity, the service
//! orchestrating issuance and validation, the storage/delivery ports the
//! infrastructure layer implements, and the domain error types.

pub mod domain;
pub mod errors;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use services::*;
