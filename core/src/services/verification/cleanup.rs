//! Periodic cleanup of expired verification-code rows
//!
//! The cache expires its own entries; only the database accumulates
//! dead rows. Two cadences run the same sweep: a frequent one keeping
//! the table small and a daily one as a backstop. Both are idempotent
//! and advisory - overlapping or skipped runs cost storage, never
//! correctness.

use std::sync::Arc;

use chrono::Utc;
use tracing::{error, info, warn};

use super::traits::CodeRepositoryTrait;

/// Configuration for the verification-code cleanup job
#[derive(Debug, Clone)]
pub struct CleanupConfig {
    /// Seconds between frequent sweeps
    pub sweep_interval_seconds: u64,
    /// Seconds between deep sweeps
    pub deep_sweep_interval_seconds: u64,
    /// Whether background cleanup runs at all
    pub enabled: bool,
}

impl Default for CleanupConfig {
    fn default() -> Self {
        Self {
            sweep_interval_seconds: 3600,       // hourly
            deep_sweep_interval_seconds: 86400, // daily
            enabled: true,
        }
    }
}

/// Background job sweeping expired rows from the durable store
pub struct CodeCleanupJob<R: CodeRepositoryTrait> {
    repository: Arc<R>,
    config: CleanupConfig,
}

impl<R: CodeRepositoryTrait> CodeCleanupJob<R> {
    /// Create a new cleanup job
    pub fn new(repository: Arc<R>, config: CleanupConfig) -> Self {
        Self { repository, config }
    }

    /// Run a single sweep, deleting every row past its expiry.
    ///
    /// Returns the number of rows removed; failures are logged and
    /// reported as zero, the next cadence tick will catch up.
    pub async fn run_sweep(&self) -> u64 {
        if !self.config.enabled {
            return 0;
        }

        match self.repository.delete_expired_before(Utc::now()).await {
            Ok(deleted) => {
                if deleted > 0 {
                    info!(deleted, "Expired verification codes swept");
                }
                deleted
            }
            Err(e) => {
                error!(error = %e, "Verification code sweep failed");
                0
            }
        }
    }

    /// Start both sweep cadences as background tasks.
    ///
    /// No lock is shared with the request path; the sweeps only ever
    /// touch rows already past their expiry.
    pub fn start_background_tasks(self: Arc<Self>)
    where
        R: 'static,
    {
        if !self.config.enabled {
            warn!("Verification code cleanup is disabled");
            return;
        }

        let frequent = Arc::clone(&self);
        let frequent_interval =
            std::time::Duration::from_secs(self.config.sweep_interval_seconds);
        tokio::spawn(async move {
            info!(
                interval_seconds = frequent.config.sweep_interval_seconds,
                "Verification code cleanup started"
            );

            let mut ticker = tokio::time::interval(frequent_interval);
            loop {
                ticker.tick().await;
                frequent.run_sweep().await;
            }
        });

        let deep = self;
        let deep_interval =
            std::time::Duration::from_secs(deep.config.deep_sweep_interval_seconds);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(deep_interval);
            loop {
                ticker.tick().await;
                info!("Running deep verification code sweep");
                deep.run_sweep().await;
            }
        });
    }
}
