//! Mock email service implementation
//!
//! Logs verification emails to the console instead of sending them.
//! Used in development environments and the demo example.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use vm_core::domain::entities::verification_code::CodePurpose;
use vm_core::services::verification::EmailServiceTrait;
use vm_shared::utils::email::{is_valid_email, mask_email};

/// Mock email service for development and testing
#[derive(Clone)]
pub struct MockEmailService {
    /// Counter for tracking number of messages sent
    message_count: Arc<AtomicU64>,
    /// Whether to simulate delivery failures
    simulate_failure: bool,
}

impl MockEmailService {
    /// Create a new mock email service
    pub fn new() -> Self {
        Self {
            message_count: Arc::new(AtomicU64::new(0)),
            simulate_failure: false,
        }
    }

    /// Create a mock that fails every send
    pub fn failing() -> Self {
        Self {
            message_count: Arc::new(AtomicU64::new(0)),
            simulate_failure: true,
        }
    }

    /// Get the total number of messages sent
    pub fn message_count(&self) -> u64 {
        self.message_count.load(Ordering::SeqCst)
    }
}

impl Default for MockEmailService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EmailServiceTrait for MockEmailService {
    async fn send_verification_code(
        &self,
        email: &str,
        code: &str,
        purpose: CodePurpose,
    ) -> Result<(), String> {
        if self.simulate_failure {
            return Err("Simulated email delivery failure".to_string());
        }

        if !is_valid_email(email) {
            return Err(format!("Invalid email address: {}", mask_email(email)));
        }

        self.message_count.fetch_add(1, Ordering::SeqCst);

        // The code is printed on purpose: this mock exists so devs can
        // complete the flow without an SMTP server
        info!(
            email = %mask_email(email),
            purpose = %purpose,
            code = code,
            "[MOCK EMAIL] verification code"
        );

        Ok(())
    }
}
