//! Verification code repository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::entities::verification_code::VerificationCode;
use crate::errors::DomainError;

/// Repository trait for VerificationCode persistence
///
/// Each operation is atomic with respect to a single email. The store
/// enforces the "only the latest code is valid" policy: inserting a code
/// deletes every earlier code for the same email in the same transaction.
#[async_trait]
pub trait VerificationCodeRepository: Send + Sync {
    /// Atomically delete all codes for the email and insert the given one
    ///
    /// This is the single-writer guarantee that prevents two concurrent
    /// issuers from both leaving a "latest" code behind.
    async fn replace_for_email(
        &self,
        code: VerificationCode,
    ) -> Result<VerificationCode, DomainError>;

    /// Find the newest unconsumed code for an email
    ///
    /// Ordering is newest-first by creation timestamp, tie-broken by id.
    async fn find_latest_unconsumed(
        &self,
        email: &str,
    ) -> Result<Option<VerificationCode>, DomainError>;

    /// Mark a code as consumed
    async fn mark_consumed(&self, id: Uuid) -> Result<(), DomainError>;

    /// Increment the failed-attempt counter, returning the new count
    async fn increment_attempts(&self, id: Uuid) -> Result<i32, DomainError>;

    /// Creation timestamp of the most recent code for an email, if any
    ///
    /// Used for the per-email resend cooldown.
    async fn latest_created_at(&self, email: &str)
        -> Result<Option<DateTime<Utc>>, DomainError>;

    /// Delete every code for an email, returning how many were removed
    async fn delete_for_email(&self, email: &str) -> Result<u64, DomainError>;
}
