//! Email delivery module
//!
//! Implementations of the `EmailServiceTrait` port:
//!
//! - **SMTP**: production delivery via lettre (feature `smtp-email`)
//! - **Mock**: console output for development and testing
//!
//! Delivery failures are reported to the caller as typed errors and
//! never touch the stored verification state.

pub mod mock;
#[cfg(feature = "smtp-email")]
pub mod smtp;
mod templates;

pub use mock::MockEmailService;
#[cfg(feature = "smtp-email")]
pub use smtp::SmtpEmailService;
pub use templates::VerificationEmailContent;
