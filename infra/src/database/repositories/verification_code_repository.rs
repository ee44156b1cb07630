//! Verification-code database repository
//!
//! Durable, append-only record of issued codes. The cache is the fast
//! path; these rows answer validation only when the cache entry is
//! gone, and they feed the cleanup job and the issuance statistics.
//!
//! Expected schema:
//!
//! ```sql
//! CREATE TABLE verification_codes (
//!     id         CHAR(36)     NOT NULL PRIMARY KEY,
//!     email      VARCHAR(255) NOT NULL,
//!     purpose    VARCHAR(32)  NOT NULL,
//!     code       VARCHAR(16)  NOT NULL,
//!     used       BOOLEAN      NOT NULL DEFAULT FALSE,
//!     issued_at  DATETIME(3)  NOT NULL,
//!     expires_at DATETIME(3)  NOT NULL,
//!     INDEX idx_email_purpose_issued (email, purpose, issued_at)
//! );
//! ```

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{mysql::MySqlRow, MySqlPool, Row};
use tracing::{debug, error, info};
use uuid::Uuid;

use vm_core::domain::entities::verification_code::{CodePurpose, VerificationCode};
use vm_core::services::verification::{CodeRepositoryTrait, VerificationStats};
use vm_shared::utils::email::mask_email;

/// MySQL-backed verification-code repository
pub struct VerificationCodeRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl VerificationCodeRepository {
    /// Create a new repository over an established pool
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_record(row: &MySqlRow) -> Result<VerificationCode, String> {
        let id: String = row
            .try_get("id")
            .map_err(|e| format!("Failed to read id: {}", e))?;
        let purpose: String = row
            .try_get("purpose")
            .map_err(|e| format!("Failed to read purpose: {}", e))?;

        Ok(VerificationCode {
            id: Uuid::parse_str(&id).map_err(|e| format!("Malformed record id: {}", e))?,
            email: row
                .try_get("email")
                .map_err(|e| format!("Failed to read email: {}", e))?,
            purpose: purpose.parse::<CodePurpose>()?,
            code: row
                .try_get("code")
                .map_err(|e| format!("Failed to read code: {}", e))?,
            used: row
                .try_get("used")
                .map_err(|e| format!("Failed to read used flag: {}", e))?,
            issued_at: row
                .try_get("issued_at")
                .map_err(|e| format!("Failed to read issued_at: {}", e))?,
            expires_at: row
                .try_get("expires_at")
                .map_err(|e| format!("Failed to read expires_at: {}", e))?,
        })
    }
}

#[async_trait]
impl CodeRepositoryTrait for VerificationCodeRepository {
    async fn insert(&self, record: &VerificationCode) -> Result<(), String> {
        let query = r#"
            INSERT INTO verification_codes (
                id, email, purpose, code, used, issued_at, expires_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(record.id.to_string())
            .bind(&record.email)
            .bind(record.purpose.as_str())
            .bind(&record.code)
            .bind(record.used)
            .bind(record.issued_at)
            .bind(record.expires_at)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!(
                    email = %mask_email(&record.email),
                    error = %e,
                    "Failed to insert verification code record"
                );
                format!("Failed to insert verification code: {}", e)
            })?;

        debug!(
            email = %mask_email(&record.email),
            purpose = %record.purpose,
            "Stored verification code record"
        );

        Ok(())
    }

    async fn find_active(
        &self,
        email: &str,
        purpose: CodePurpose,
    ) -> Result<Option<VerificationCode>, String> {
        // Defensive on duplicates: overwrite semantics should leave at
        // most one active row, but the newest wins if more exist
        let query = r#"
            SELECT id, email, purpose, code, used, issued_at, expires_at
            FROM verification_codes
            WHERE email = ? AND purpose = ? AND used = FALSE AND expires_at > ?
            ORDER BY issued_at DESC
            LIMIT 1
        "#;

        let row = sqlx::query(query)
            .bind(email)
            .bind(purpose.as_str())
            .bind(Utc::now())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                error!(
                    email = %mask_email(email),
                    error = %e,
                    "Failed to query active verification code"
                );
                format!("Failed to query active verification code: {}", e)
            })?;

        match row {
            Some(row) => Ok(Some(Self::row_to_record(&row)?)),
            None => {
                debug!(
                    email = %mask_email(email),
                    purpose = %purpose,
                    "No active verification code record"
                );
                Ok(None)
            }
        }
    }

    async fn mark_used(&self, id: Uuid) -> Result<bool, String> {
        // Conditional update: only the call that finds used = FALSE
        // flips it, so concurrent validations cannot both win
        let query = "UPDATE verification_codes SET used = TRUE WHERE id = ? AND used = FALSE";

        let result = sqlx::query(query)
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| format!("Failed to mark verification code used: {}", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn mark_code_used(
        &self,
        email: &str,
        purpose: CodePurpose,
        code: &str,
    ) -> Result<bool, String> {
        let query = r#"
            UPDATE verification_codes
            SET used = TRUE
            WHERE email = ? AND purpose = ? AND code = ?
              AND used = FALSE AND expires_at > ?
            ORDER BY issued_at DESC
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(email)
            .bind(purpose.as_str())
            .bind(code)
            .bind(Utc::now())
            .execute(&self.pool)
            .await
            .map_err(|e| format!("Failed to mark verification code used: {}", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_expired_before(&self, cutoff: DateTime<Utc>) -> Result<u64, String> {
        let query = "DELETE FROM verification_codes WHERE expires_at < ?";

        let result = sqlx::query(query)
            .bind(cutoff)
            .execute(&self.pool)
            .await
            .map_err(|e| format!("Failed to delete expired verification codes: {}", e))?;

        let deleted = result.rows_affected();
        if deleted > 0 {
            info!(deleted, "Deleted expired verification code records");
        }

        Ok(deleted)
    }

    async fn issued_stats(&self, email: &str) -> Result<VerificationStats, String> {
        let query = r#"
            SELECT COUNT(*) AS total_issued, MAX(issued_at) AS last_issued_at
            FROM verification_codes
            WHERE email = ?
        "#;

        let row = sqlx::query(query)
            .bind(email)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| format!("Failed to read verification statistics: {}", e))?;

        let total_issued: i64 = row
            .try_get("total_issued")
            .map_err(|e| format!("Failed to read total_issued: {}", e))?;
        let last_issued_at: Option<DateTime<Utc>> = row
            .try_get("last_issued_at")
            .map_err(|e| format!("Failed to read last_issued_at: {}", e))?;

        Ok(VerificationStats {
            total_issued: total_issued.max(0) as u64,
            last_issued_at,
        })
    }
}
