//! Types for verification service results

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Best-effort issuance statistics for one email address
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationStats {
    /// Total number of codes ever issued to this address
    pub total_issued: u64,
    /// When the most recent code was issued, if any
    pub last_issued_at: Option<DateTime<Utc>>,
}
