//! SMTP email service implementation

use async_trait::async_trait;
use lettre::{
    message::{header::ContentType, Mailbox, MultiPart, SinglePart},
    transport::smtp::{
        authentication::Credentials,
        client::{Tls, TlsParameters},
    },
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use tracing::{debug, error};

use vm_core::domain::entities::verification_code::CodePurpose;
use vm_core::services::verification::EmailServiceTrait;
use vm_shared::config::email::EmailConfig;
use vm_shared::utils::email::{is_valid_email, mask_email};

use crate::InfrastructureError;

use super::templates::VerificationEmailContent;

/// SMTP-backed email delivery service
pub struct SmtpEmailService {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    expire_minutes: i64,
}

impl SmtpEmailService {
    /// Create a new SMTP email service from configuration.
    ///
    /// Port 465 uses implicit TLS (SMTPS); every other port negotiates
    /// STARTTLS when TLS is enabled.
    pub fn new(config: &EmailConfig, expire_minutes: i64) -> Result<Self, InfrastructureError> {
        let mut builder = if config.use_tls {
            let tls_params = TlsParameters::new(config.smtp_host.clone()).map_err(|e| {
                InfrastructureError::Config(format!("TLS configuration error: {}", e))
            })?;

            if config.smtp_port == 465 {
                AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)
                    .map_err(|e| InfrastructureError::Config(format!("SMTP relay error: {}", e)))?
                    .port(config.smtp_port)
                    .tls(Tls::Wrapper(tls_params))
            } else {
                AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)
                    .map_err(|e| InfrastructureError::Config(format!("SMTP relay error: {}", e)))?
                    .port(config.smtp_port)
                    .tls(Tls::Required(tls_params))
            }
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.smtp_host)
                .port(config.smtp_port)
        };

        if !config.username.is_empty() {
            builder = builder.credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ));
        }

        let from_str = match &config.from_name {
            Some(name) => format!("{} <{}>", name, config.from_address),
            None => config.from_address.clone(),
        };
        let from: Mailbox = from_str
            .parse()
            .map_err(|e| InfrastructureError::Config(format!("Invalid from address: {}", e)))?;

        Ok(Self {
            transport: builder.build(),
            from,
            expire_minutes,
        })
    }
}

#[async_trait]
impl EmailServiceTrait for SmtpEmailService {
    async fn send_verification_code(
        &self,
        email: &str,
        code: &str,
        purpose: CodePurpose,
    ) -> Result<(), String> {
        if !is_valid_email(email) {
            return Err(format!("Invalid email address: {}", mask_email(email)));
        }

        let content = VerificationEmailContent::new(code, purpose, self.expire_minutes);

        let to: Mailbox = email
            .parse()
            .map_err(|e| format!("Invalid recipient address: {}", e))?;

        let message = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(content.subject)
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_PLAIN)
                            .body(content.text),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_HTML)
                            .body(content.html),
                    ),
            )
            .map_err(|e| format!("Failed to build email: {}", e))?;

        self.transport.send(message).await.map_err(|e| {
            error!(
                email = %mask_email(email),
                error = %e,
                "SMTP delivery failed"
            );
            e.to_string()
        })?;

        debug!(
            email = %mask_email(email),
            purpose = %purpose,
            "Verification email handed to SMTP server"
        );

        Ok(())
    }
}
