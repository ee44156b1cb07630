//! Verification code entity for email-based authentication.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The authentication flow a verification code is scoped to.
///
/// A code issued for one purpose never validates an attempt for another,
/// even for the same email address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CodePurpose {
    Register,
    Login,
    ResetPassword,
}

impl CodePurpose {
    /// Stable string form, used in cache keys and database rows
    pub fn as_str(&self) -> &'static str {
        match self {
            CodePurpose::Register => "register",
            CodePurpose::Login => "login",
            CodePurpose::ResetPassword => "reset_password",
        }
    }
}

impl fmt::Display for CodePurpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CodePurpose {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "register" => Ok(CodePurpose::Register),
            "login" => Ok(CodePurpose::Login),
            "reset_password" => Ok(CodePurpose::ResetPassword),
            other => Err(format!("Unknown verification purpose: {}", other)),
        }
    }
}

/// Verification code entity, the durable record of one issuance.
///
/// `used` is monotonic: it only ever transitions from `false` to `true`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationCode {
    /// Unique identifier for the verification code
    pub id: Uuid,

    /// Email address this code was sent to
    pub email: String,

    /// Authentication flow this code is scoped to
    pub purpose: CodePurpose,

    /// The numeric verification code
    pub code: String,

    /// Whether the code has been successfully consumed
    pub used: bool,

    /// Timestamp when the code was issued
    pub issued_at: DateTime<Utc>,

    /// Timestamp when the code expires
    pub expires_at: DateTime<Utc>,
}

impl VerificationCode {
    /// Creates a new verification code record expiring `expire_minutes`
    /// from now.
    pub fn new(
        email: impl Into<String>,
        purpose: CodePurpose,
        code: impl Into<String>,
        expire_minutes: i64,
    ) -> Self {
        let now = Utc::now();

        Self {
            id: Uuid::new_v4(),
            email: email.into(),
            purpose,
            code: code.into(),
            used: false,
            issued_at: now,
            expires_at: now + Duration::minutes(expire_minutes),
        }
    }

    /// Checks if the verification code has passed its expiry timestamp
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }

    /// Checks if the code can still be consumed (unused and unexpired)
    pub fn is_active(&self) -> bool {
        !self.used && !self.is_expired()
    }

    /// Marks the verification code as consumed
    pub fn mark_used(&mut self) {
        self.used = true;
    }

    /// Time remaining until expiry, zero if already expired
    pub fn time_until_expiration(&self) -> Duration {
        let now = Utc::now();
        if self.expires_at > now {
            self.expires_at - now
        } else {
            Duration::zero()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_verification_code() {
        let code = VerificationCode::new("user@example.com", CodePurpose::Register, "123456", 5);

        assert_eq!(code.email, "user@example.com");
        assert_eq!(code.purpose, CodePurpose::Register);
        assert_eq!(code.code, "123456");
        assert!(!code.used);
        assert!(!code.is_expired());
        assert!(code.is_active());
        assert_eq!(code.expires_at, code.issued_at + Duration::minutes(5));
    }

    #[test]
    fn test_zero_ttl_is_expired() {
        let code = VerificationCode::new("user@example.com", CodePurpose::Login, "123456", 0);

        std::thread::sleep(std::time::Duration::from_millis(10));

        assert!(code.is_expired());
        assert!(!code.is_active());
        assert_eq!(code.time_until_expiration(), Duration::zero());
    }

    #[test]
    fn test_mark_used_makes_inactive() {
        let mut code =
            VerificationCode::new("user@example.com", CodePurpose::ResetPassword, "654321", 5);

        code.mark_used();

        assert!(code.used);
        assert!(!code.is_active());
        assert!(!code.is_expired());
    }

    #[test]
    fn test_purpose_string_roundtrip() {
        for purpose in [
            CodePurpose::Register,
            CodePurpose::Login,
            CodePurpose::ResetPassword,
        ] {
            let parsed: CodePurpose = purpose.as_str().parse().unwrap();
            assert_eq!(parsed, purpose);
        }
        assert!("session".parse::<CodePurpose>().is_err());
    }

    #[test]
    fn test_serialization() {
        let code = VerificationCode::new("user@example.com", CodePurpose::Register, "000042", 5);

        let json = serde_json::to_string(&code).unwrap();
        assert!(json.contains("\"register\""));

        let deserialized: VerificationCode = serde_json::from_str(&json).unwrap();
        assert_eq!(code, deserialized);
    }
}
