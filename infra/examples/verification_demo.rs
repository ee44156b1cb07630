//! End-to-end wiring demo for the verification service
//!
//! Requires live Redis and MySQL instances (REDIS_URL / DATABASE_URL);
//! email delivery uses the console mock so no SMTP server is needed.
//!
//! Run with: cargo run -p vm_infra --example verification_demo

use std::sync::Arc;

use vm_core::domain::entities::verification_code::CodePurpose;
use vm_core::services::verification::{CleanupConfig, CodeCleanupJob, VerificationCodeService};
use vm_infra::cache::{RedisClient, VerificationCache};
use vm_infra::config::load_config;
use vm_infra::database::{DatabasePool, VerificationCodeRepository};
use vm_infra::email::MockEmailService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = load_config();

    let redis_client = RedisClient::new(config.cache.clone()).await?;
    let cache = Arc::new(VerificationCache::new(redis_client));

    let pool = DatabasePool::new(config.database.clone()).await?;
    let repository = Arc::new(VerificationCodeRepository::new(pool.pool().clone()));

    let email_service = Arc::new(MockEmailService::new());

    let service = VerificationCodeService::new(
        cache,
        Arc::clone(&repository),
        email_service,
        config.verification.clone(),
    );

    // Background sweeps of expired database rows
    let cleanup = Arc::new(CodeCleanupJob::new(repository, CleanupConfig::default()));
    cleanup.start_background_tasks();

    let email = "demo@example.com";

    println!("Issuing a registration code for {}...", email);
    service.issue(email, CodePurpose::Register).await?;
    println!("Issued - the mock email service logged the code above.");

    println!("Validating a wrong code...");
    let accepted = service.validate(email, "000000", CodePurpose::Register).await;
    println!("Wrong code accepted: {}", accepted);

    match service.issue(email, CodePurpose::Login).await {
        Ok(()) => println!("Unexpected: second send inside the cool-down succeeded"),
        Err(e) => println!("Second send rejected as expected: {}", e),
    }

    if let Some(stats) = service.stats(email).await {
        println!(
            "Stats for {}: {} issued, last at {:?}",
            email, stats.total_issued, stats.last_issued_at
        );
    }

    Ok(())
}
