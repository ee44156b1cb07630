//! Repository implementations

pub mod verification_code_repository;

pub use verification_code_repository::VerificationCodeRepository;
