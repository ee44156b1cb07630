//! Email delivery configuration module

use serde::{Deserialize, Serialize};

/// SMTP email delivery configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EmailConfig {
    /// SMTP server hostname
    pub smtp_host: String,

    /// SMTP server port (465 implies implicit TLS, otherwise STARTTLS)
    pub smtp_port: u16,

    /// SMTP username (empty disables authentication)
    #[serde(default)]
    pub username: String,

    /// SMTP password
    #[serde(default)]
    pub password: String,

    /// Whether to negotiate TLS with the server
    #[serde(default = "default_use_tls")]
    pub use_tls: bool,

    /// From address used for verification mail
    pub from_address: String,

    /// Display name for the From header
    #[serde(default)]
    pub from_name: Option<String>,
}

fn default_use_tls() -> bool {
    true
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            smtp_host: String::from("localhost"),
            smtp_port: 587,
            username: String::new(),
            password: String::new(),
            use_tls: default_use_tls(),
            from_address: String::from("no-reply@verimail.local"),
            from_name: Some(String::from("VeriMail")),
        }
    }
}

impl EmailConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self {
            smtp_host: std::env::var("SMTP_HOST").unwrap_or_else(|_| "localhost".to_string()),
            smtp_port: std::env::var("SMTP_PORT")
                .unwrap_or_else(|_| "587".to_string())
                .parse()
                .unwrap_or(587),
            username: std::env::var("SMTP_USERNAME").unwrap_or_default(),
            password: std::env::var("SMTP_PASSWORD").unwrap_or_default(),
            use_tls: std::env::var("SMTP_USE_TLS")
                .map(|v| v != "false" && v != "0")
                .unwrap_or(true),
            from_address: std::env::var("SMTP_FROM_ADDRESS")
                .unwrap_or_else(|_| "no-reply@verimail.local".to_string()),
            from_name: std::env::var("SMTP_FROM_NAME").ok(),
        }
    }
}
