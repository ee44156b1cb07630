//! Mock implementations for testing the verification service

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::domain::entities::verification_code::{CodePurpose, VerificationCode};
use crate::services::verification::traits::{
    CacheStoreTrait, CodeRepositoryTrait, EmailServiceTrait,
};
use crate::services::verification::types::VerificationStats;

// Mock expiring key-value store. Entries carry an absolute expiry so
// zero-TTL writes read back as already gone, like a real store.
pub struct MockCacheStore {
    pub entries: Arc<Mutex<HashMap<String, (String, DateTime<Utc>)>>>,
    fail: AtomicBool,
}

impl MockCacheStore {
    pub fn new(should_fail: bool) -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
            fail: AtomicBool::new(should_fail),
        }
    }

    pub fn set_should_fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    /// Drop an entry regardless of TTL, simulating cache eviction
    pub fn evict(&self, key: &str) {
        self.entries.lock().unwrap().remove(key);
    }

    fn live_value(&self, key: &str) -> Option<(String, DateTime<Utc>)> {
        let mut entries = self.entries.lock().unwrap();
        let expired =
            matches!(entries.get(key), Some((_, expires_at)) if *expires_at <= Utc::now());
        if expired {
            entries.remove(key);
            return None;
        }
        entries.get(key).cloned()
    }

    fn check_fail(&self) -> Result<(), String> {
        if self.fail.load(Ordering::SeqCst) {
            Err("Cache store error".to_string())
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl CacheStoreTrait for MockCacheStore {
    async fn put(&self, key: &str, value: &str, ttl_seconds: u64) -> Result<(), String> {
        self.check_fail()?;
        let expires_at = Utc::now() + Duration::seconds(ttl_seconds as i64);
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), (value.to_string(), expires_at));
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>, String> {
        self.check_fail()?;
        Ok(self.live_value(key).map(|(value, _)| value))
    }

    async fn delete(&self, key: &str) -> Result<(), String> {
        self.check_fail()?;
        self.entries.lock().unwrap().remove(key);
        Ok(())
    }

    async fn exists(&self, key: &str) -> Result<bool, String> {
        self.check_fail()?;
        Ok(self.live_value(key).is_some())
    }

    async fn ttl(&self, key: &str) -> Result<Option<i64>, String> {
        self.check_fail()?;
        Ok(self
            .live_value(key)
            .map(|(_, expires_at)| (expires_at - Utc::now()).num_seconds().max(0)))
    }
}

// Mock email delivery service recording every sent code
pub struct MockEmailService {
    pub sent: Arc<Mutex<Vec<(String, String, CodePurpose)>>>,
    pub should_fail: bool,
}

impl MockEmailService {
    pub fn new(should_fail: bool) -> Self {
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
            should_fail,
        }
    }

    /// Last code delivered to an address, any purpose
    pub fn last_sent_code(&self, email: &str) -> Option<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(to, _, _)| to == email)
            .map(|(_, code, _)| code.clone())
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
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
        if self.should_fail {
            return Err("Email service error".to_string());
        }
        self.sent
            .lock()
            .unwrap()
            .push((email.to_string(), code.to_string(), purpose));
        Ok(())
    }
}

// Mock durable record store backed by a plain Vec
pub struct MockCodeRepository {
    pub rows: Arc<Mutex<Vec<VerificationCode>>>,
    fail: AtomicBool,
}

impl MockCodeRepository {
    pub fn new(should_fail: bool) -> Self {
        Self {
            rows: Arc::new(Mutex::new(Vec::new())),
            fail: AtomicBool::new(should_fail),
        }
    }

    pub fn set_should_fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn row_count(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    fn check_fail(&self) -> Result<(), String> {
        if self.fail.load(Ordering::SeqCst) {
            Err("Repository error".to_string())
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl CodeRepositoryTrait for MockCodeRepository {
    async fn insert(&self, record: &VerificationCode) -> Result<(), String> {
        self.check_fail()?;
        self.rows.lock().unwrap().push(record.clone());
        Ok(())
    }

    async fn find_active(
        &self,
        email: &str,
        purpose: CodePurpose,
    ) -> Result<Option<VerificationCode>, String> {
        self.check_fail()?;
        let now = Utc::now();
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.email == email && r.purpose == purpose && !r.used && r.expires_at > now)
            .max_by_key(|r| r.issued_at)
            .cloned())
    }

    async fn mark_used(&self, id: Uuid) -> Result<bool, String> {
        self.check_fail()?;
        let mut rows = self.rows.lock().unwrap();
        match rows.iter_mut().find(|r| r.id == id && !r.used) {
            Some(row) => {
                row.used = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn mark_code_used(
        &self,
        email: &str,
        purpose: CodePurpose,
        code: &str,
    ) -> Result<bool, String> {
        self.check_fail()?;
        let now = Utc::now();
        let mut rows = self.rows.lock().unwrap();
        let candidate = rows
            .iter_mut()
            .filter(|r| {
                r.email == email
                    && r.purpose == purpose
                    && r.code == code
                    && !r.used
                    && r.expires_at > now
            })
            .max_by_key(|r| r.issued_at);
        match candidate {
            Some(row) => {
                row.used = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_expired_before(&self, cutoff: DateTime<Utc>) -> Result<u64, String> {
        self.check_fail()?;
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|r| r.expires_at >= cutoff);
        Ok((before - rows.len()) as u64)
    }

    async fn issued_stats(&self, email: &str) -> Result<VerificationStats, String> {
        self.check_fail()?;
        let rows = self.rows.lock().unwrap();
        let mine: Vec<_> = rows.iter().filter(|r| r.email == email).collect();
        Ok(VerificationStats {
            total_issued: mine.len() as u64,
            last_issued_at: mine.iter().map(|r| r.issued_at).max(),
        })
    }
}
