//! Verification-code policy configuration

use serde::{Deserialize, Serialize};

/// Default number of digits in a verification code
pub const DEFAULT_CODE_LENGTH: usize = 6;

/// Default code lifetime in minutes
pub const DEFAULT_EXPIRE_MINUTES: i64 = 5;

/// Default per-identity send cool-down in minutes
pub const DEFAULT_RATE_LIMIT_MINUTES: i64 = 1;

/// Policy knobs for verification-code issuance
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VerificationConfig {
    /// Number of digits in a generated code
    pub code_length: usize,

    /// Minutes until an issued code expires
    pub expire_minutes: i64,

    /// Minutes an identity must wait between sends
    pub rate_limit_minutes: i64,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            code_length: DEFAULT_CODE_LENGTH,
            expire_minutes: DEFAULT_EXPIRE_MINUTES,
            rate_limit_minutes: DEFAULT_RATE_LIMIT_MINUTES,
        }
    }
}

impl VerificationConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let code_length = std::env::var("VERIFICATION_CODE_LENGTH")
            .unwrap_or_else(|_| DEFAULT_CODE_LENGTH.to_string())
            .parse()
            .unwrap_or(DEFAULT_CODE_LENGTH);
        let expire_minutes = std::env::var("VERIFICATION_EXPIRE_MINUTES")
            .unwrap_or_else(|_| DEFAULT_EXPIRE_MINUTES.to_string())
            .parse()
            .unwrap_or(DEFAULT_EXPIRE_MINUTES);
        let rate_limit_minutes = std::env::var("VERIFICATION_RATE_LIMIT_MINUTES")
            .unwrap_or_else(|_| DEFAULT_RATE_LIMIT_MINUTES.to_string())
            .parse()
            .unwrap_or(DEFAULT_RATE_LIMIT_MINUTES);

        Self {
            code_length,
            expire_minutes,
            rate_limit_minutes,
        }
    }

    /// Code lifetime expressed in seconds, for store TTLs
    pub fn expire_seconds(&self) -> u64 {
        (self.expire_minutes.max(0) as u64) * 60
    }

    /// Rate-limit window expressed in seconds, for marker TTLs
    pub fn rate_limit_seconds(&self) -> u64 {
        (self.rate_limit_minutes.max(0) as u64) * 60
    }
}
