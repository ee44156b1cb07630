//! Cache key scheme for verification data
//!
//! Key namespaces:
//! - `verification_code:{email}:{purpose}` - the active code for a pair
//! - `verification_code:rate_limit:{email}` - the per-identity send marker

use crate::domain::entities::verification_code::CodePurpose;

const CODE_PREFIX: &str = "verification_code:";
const RATE_LIMIT_PREFIX: &str = "verification_code:rate_limit:";

/// Key holding the active code for an (email, purpose) pair
pub(crate) fn code_key(email: &str, purpose: CodePurpose) -> String {
    format!("{}{}:{}", CODE_PREFIX, email, purpose.as_str())
}

/// Key holding the send-rate marker for an email address.
/// Identity-scoped: one marker gates all purposes.
pub(crate) fn rate_limit_key(email: &str) -> String {
    format!("{}{}", RATE_LIMIT_PREFIX, email)
}
