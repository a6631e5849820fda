//! Mock implementation of VerificationCodeRepository for testing

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::verification_code::VerificationCode;
use crate::errors::DomainError;

use super::trait_::VerificationCodeRepository;

/// Mock verification code repository for testing
pub struct MockVerificationCodeRepository {
    codes: Arc<RwLock<HashMap<Uuid, VerificationCode>>>,
}

impl MockVerificationCodeRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            codes: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Number of codes currently stored for an email (test helper)
    pub async fn count_for_email(&self, email: &str) -> usize {
        let codes = self.codes.read().await;
        codes.values().filter(|c| c.email == email).count()
    }

    /// Overwrite a stored code record directly (test helper)
    pub async fn put(&self, code: VerificationCode) {
        self.codes.write().await.insert(code.id, code);
    }
}

impl Default for MockVerificationCodeRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VerificationCodeRepository for MockVerificationCodeRepository {
    async fn replace_for_email(
        &self,
        code: VerificationCode,
    ) -> Result<VerificationCode, DomainError> {
        let mut codes = self.codes.write().await;
        codes.retain(|_, c| c.email != code.email);
        codes.insert(code.id, code.clone());
        Ok(code)
    }

    async fn find_latest_unconsumed(
        &self,
        email: &str,
    ) -> Result<Option<VerificationCode>, DomainError> {
        let codes = self.codes.read().await;
        Ok(codes
            .values()
            .filter(|c| c.email == email && !c.consumed)
            .max_by(|a, b| {
                a.created_at
                    .cmp(&b.created_at)
                    .then_with(|| a.id.cmp(&b.id))
            })
            .cloned())
    }

    async fn mark_consumed(&self, id: Uuid) -> Result<(), DomainError> {
        let mut codes = self.codes.write().await;
        match codes.get_mut(&id) {
            Some(code) => {
                code.consumed = true;
                Ok(())
            }
            None => Err(DomainError::NotFound {
                resource: "VerificationCode".to_string(),
            }),
        }
    }

    async fn increment_attempts(&self, id: Uuid) -> Result<i32, DomainError> {
        let mut codes = self.codes.write().await;
        match codes.get_mut(&id) {
            Some(code) => {
                code.attempts += 1;
                Ok(code.attempts)
            }
            None => Err(DomainError::NotFound {
                resource: "VerificationCode".to_string(),
            }),
        }
    }

    async fn latest_created_at(
        &self,
        email: &str,
    ) -> Result<Option<DateTime<Utc>>, DomainError> {
        let codes = self.codes.read().await;
        Ok(codes
            .values()
            .filter(|c| c.email == email)
            .map(|c| c.created_at)
            .max())
    }

    async fn delete_for_email(&self, email: &str) -> Result<u64, DomainError> {
        let mut codes = self.codes.write().await;
        let before = codes.len();
        codes.retain(|_, c| c.email != email);
        Ok((before - codes.len()) as u64)
    }
}
