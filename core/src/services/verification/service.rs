//! Main verification service implementation

use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::verification_code::{CodePurpose, VerificationCode};
use crate::errors::{AuthError, DomainResult};
use crate::repositories::VerificationCodeRepository;

use super::config::VerificationServiceConfig;
use super::traits::MailerTrait;
use super::types::IssuedCode;

/// Verification service for handling email verification codes
///
/// At most one usable code exists per email at any time: issuing a new code
/// deletes all earlier ones in the same store transaction.
pub struct VerificationService<V: VerificationCodeRepository, M: MailerTrait> {
    /// Repository for verification code persistence
    code_repository: Arc<V>,
    /// Email delivery capability
    mailer: Arc<M>,
    /// Service configuration
    config: VerificationServiceConfig,
}

impl<V: VerificationCodeRepository, M: MailerTrait> VerificationService<V, M> {
    /// Create a new verification service
    pub fn new(
        code_repository: Arc<V>,
        mailer: Arc<M>,
        config: VerificationServiceConfig,
    ) -> Self {
        Self {
            code_repository,
            mailer,
            config,
        }
    }

    /// Issue a fresh verification code for an email and dispatch it
    ///
    /// The store write happens before dispatch, and a dispatch failure fails
    /// the whole operation; a code that was stored but never delivered is
    /// simply replaced on the next request.
    pub async fn issue_code(
        &self,
        email: &str,
        user_id: Option<Uuid>,
        display_name: Option<&str>,
        purpose: CodePurpose,
    ) -> DomainResult<IssuedCode> {
        let verification_code = VerificationCode::new_with_expiration(
            email.to_string(),
            user_id,
            purpose,
            self.config.code_expiration_minutes,
        );

        tracing::info!(
            email = email,
            event = "code_issued",
            purpose = purpose.as_str(),
            code_id = %verification_code.id,
            "Issuing verification code"
        );

        let verification_code = self
            .code_repository
            .replace_for_email(verification_code)
            .await?;

        let message_id = self
            .mailer
            .send_code(email, &verification_code.code, display_name, purpose)
            .await
            .map_err(|e| {
                tracing::error!(
                    email = email,
                    error = %e,
                    event = "code_dispatch_failed",
                    "Failed to dispatch verification email"
                );
                AuthError::EmailDeliveryFailure
            })?;

        Ok(IssuedCode {
            verification_code,
            message_id,
        })
    }

    /// Consume a verification code
    ///
    /// Loads the newest unconsumed code for the email and checks, in order:
    /// existence, expiry, attempt budget, then the code itself. A failed
    /// comparison burns one attempt; a successful one consumes the record.
    pub async fn consume(&self, email: &str, code: &str) -> DomainResult<VerificationCode> {
        let mut record = match self.code_repository.find_latest_unconsumed(email).await? {
            Some(record) => record,
            None => {
                tracing::warn!(
                    email = email,
                    event = "code_not_found",
                    "No usable verification code for email"
                );
                return Err(AuthError::InvalidCode.into());
            }
        };

        if record.is_expired() {
            tracing::warn!(
                email = email,
                event = "code_expired",
                code_id = %record.id,
                "Verification code has expired"
            );
            return Err(AuthError::CodeExpired.into());
        }

        if record.attempts >= self.config.max_attempts {
            tracing::warn!(
                email = email,
                event = "max_attempts_exceeded",
                code_id = %record.id,
                "Verification attempt budget exhausted"
            );
            return Err(AuthError::TooManyAttempts.into());
        }

        if !record.matches(code) {
            let attempts = self.code_repository.increment_attempts(record.id).await?;
            tracing::warn!(
                email = email,
                event = "code_mismatch",
                attempts = attempts,
                "Verification code mismatch"
            );
            return Err(AuthError::InvalidCode.into());
        }

        self.code_repository.mark_consumed(record.id).await?;
        record.mark_consumed();

        tracing::info!(
            email = email,
            event = "code_consumed",
            code_id = %record.id,
            "Verification code consumed"
        );

        Ok(record)
    }

    /// Enforce the per-email resend cooldown
    ///
    /// Fails when any code for this email was created within the trailing
    /// cooldown window. Applied only on the resend path; register and login
    /// issue unconditionally.
    pub async fn check_resend_cooldown(&self, email: &str) -> DomainResult<()> {
        if let Some(created_at) = self.code_repository.latest_created_at(email).await? {
            let elapsed = (Utc::now() - created_at).num_seconds();
            let remaining = self.config.resend_cooldown_seconds - elapsed;
            if remaining > 0 {
                tracing::warn!(
                    email = email,
                    retry_after_seconds = remaining,
                    event = "resend_cooldown_hit",
                    "Resend requested inside cooldown window"
                );
                return Err(AuthError::RateLimitExceeded {
                    retry_after_seconds: remaining,
                }
                .into());
            }
        }
        Ok(())
    }
}
