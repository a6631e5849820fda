//! Main authentication service implementation

use std::sync::Arc;

use crate::domain::entities::user::User;
use crate::domain::entities::verification_code::CodePurpose;
use crate::domain::value_objects::{AuthSession, UserProfile};
use crate::errors::{AuthError, DomainError, DomainResult, TokenError};
use crate::repositories::{UserRepository, VerificationCodeRepository};
use crate::services::token::TokenService;
use crate::services::verification::{MailerTrait, VerificationService};

use super::config::AuthServiceConfig;
use super::referral::generate_referral_code;
use super::types::{CodeDispatch, RefreshedToken, RegistrationOutcome};

/// Authentication service for the complete passwordless email flow
///
/// State machine per email:
/// `unregistered -> (register) -> pending verification -> (verify) -> verified`
/// `verified -> (login) -> pending login code -> (verify) -> session issued`
pub struct AuthService<U, V, M>
where
    U: UserRepository,
    V: VerificationCodeRepository,
    M: MailerTrait,
{
    /// User repository for database operations
    user_repository: Arc<U>,
    /// Verification service for email code handling
    verification_service: Arc<VerificationService<V, M>>,
    /// Token service for JWT management
    token_service: Arc<TokenService>,
    /// Service configuration
    config: AuthServiceConfig,
}

impl<U, V, M> AuthService<U, V, M>
where
    U: UserRepository,
    V: VerificationCodeRepository,
    M: MailerTrait,
{
    /// Create a new authentication service
    pub fn new(
        user_repository: Arc<U>,
        verification_service: Arc<VerificationService<V, M>>,
        token_service: Arc<TokenService>,
        config: AuthServiceConfig,
    ) -> Self {
        Self {
            user_repository,
            verification_service,
            token_service,
            config,
        }
    }

    /// Register a new account, or refresh an unverified one
    ///
    /// A verified owner of the email or username blocks the registration
    /// (email match takes precedence in the reported error). An unverified
    /// owner of the email is reused with its username updated, so repeating
    /// a registration that never completed is not an error. Every successful
    /// path issues a fresh verification code and dispatches it.
    pub async fn register(&self, email: &str, username: &str) -> DomainResult<RegistrationOutcome> {
        let user = match self.user_repository.find_by_email(email).await? {
            Some(existing) => {
                if existing.verified {
                    return Err(AuthError::EmailExists.into());
                }
                self.reuse_unverified_user(existing, username).await?
            }
            None => {
                if self
                    .user_repository
                    .find_by_username(username)
                    .await?
                    .is_some()
                {
                    return Err(AuthError::UsernameTaken.into());
                }
                self.create_user(email, username).await?
            }
        };

        let issued = self
            .verification_service
            .issue_code(
                email,
                Some(user.id),
                Some(&user.username),
                CodePurpose::Registration,
            )
            .await?;

        tracing::info!(
            email = email,
            user_id = %user.id,
            event = "registration_code_sent",
            "Registration verification code dispatched"
        );

        Ok(RegistrationOutcome {
            user_id: user.id,
            email: user.email,
            username: user.username,
            code_expires_at: issued.verification_code.expires_at,
        })
    }

    /// Consume a verification code and open a session
    ///
    /// On success the user becomes verified (monotonic), the last-login
    /// timestamp advances, and a fresh session token is issued. Store
    /// failures propagate unchanged so the API layer can map them to their
    /// 401 codes.
    pub async fn verify_code(&self, email: &str, code: &str) -> DomainResult<AuthSession> {
        let record = self.verification_service.consume(email, code).await?;

        let user_id = record.user_id.ok_or(AuthError::InvalidCode)?;
        let mut user = self
            .user_repository
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if !user.verified {
            user.verify();
        }
        user.update_last_login();
        let user = self.user_repository.update(user).await?;

        let (token, expires_at) = self.token_service.issue_token(user.id)?;

        tracing::info!(
            email = email,
            user_id = %user.id,
            event = "verification_success",
            "Email verified, session issued"
        );

        Ok(AuthSession {
            token,
            expires_at,
            user: UserProfile::from(&user),
        })
    }

    /// Re-issue a verification code for an existing user
    ///
    /// Subject to the per-email cooldown; register and login are not.
    pub async fn resend_code(&self, email: &str) -> DomainResult<CodeDispatch> {
        let user = self
            .user_repository
            .find_by_email(email)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        self.verification_service.check_resend_cooldown(email).await?;

        let issued = self
            .verification_service
            .issue_code(
                email,
                Some(user.id),
                Some(&user.username),
                CodePurpose::Registration,
            )
            .await?;

        Ok(CodeDispatch {
            user_id: user.id,
            email: user.email,
            code_expires_at: issued.verification_code.expires_at,
        })
    }

    /// Start a login by sending a fresh code to a verified user
    ///
    /// Issues unconditionally: any code left over from registration or an
    /// earlier login attempt is invalidated by the new one.
    pub async fn login(&self, email: &str) -> DomainResult<CodeDispatch> {
        let user = self
            .user_repository
            .find_by_email(email)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if !user.verified {
            return Err(AuthError::EmailNotVerified.into());
        }

        let issued = self
            .verification_service
            .issue_code(email, Some(user.id), Some(&user.username), CodePurpose::Login)
            .await?;

        tracing::info!(
            email = email,
            user_id = %user.id,
            event = "login_code_sent",
            "Login verification code dispatched"
        );

        Ok(CodeDispatch {
            user_id: user.id,
            email: user.email,
            code_expires_at: issued.verification_code.expires_at,
        })
    }

    /// Exchange a possibly expired session token for a fresh one
    ///
    /// The token's signature must still verify; only the expiry check is
    /// relaxed. The user must still exist.
    pub async fn refresh_token(&self, token: &str) -> DomainResult<RefreshedToken> {
        let claims = self.token_service.decode_expired(token)?;
        let user_id = claims
            .user_id()
            .map_err(|_| TokenError::InvalidToken)?;

        let user = self
            .user_repository
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        let (token, expires_at) = self.token_service.issue_token(user.id)?;

        tracing::info!(
            user_id = %user.id,
            event = "token_refreshed",
            "Session token refreshed"
        );

        Ok(RefreshedToken { token, expires_at })
    }

    /// Validate a session token and load its user
    ///
    /// The gate for every protected route: signature and expiry must hold,
    /// the user must still exist, and the email must be verified.
    pub async fn authenticate(&self, token: &str) -> DomainResult<User> {
        let claims = self.token_service.verify_token(token)?;
        let user_id = claims
            .user_id()
            .map_err(|_| TokenError::InvalidToken)?;

        let user = self
            .user_repository
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if !user.verified {
            return Err(AuthError::EmailNotVerified.into());
        }

        Ok(user)
    }

    /// Update an unverified user's username for idempotent re-registration
    async fn reuse_unverified_user(&self, mut user: User, username: &str) -> DomainResult<User> {
        if user.username != username {
            if let Some(other) = self.user_repository.find_by_username(username).await? {
                if other.id != user.id {
                    return Err(AuthError::UsernameTaken.into());
                }
            }
            user.set_username(username.to_string());
            user = self.user_repository.update(user).await?;
        }
        Ok(user)
    }

    /// Create a fresh user with a collision-checked referral code
    async fn create_user(&self, email: &str, username: &str) -> DomainResult<User> {
        let referral_code = self.unique_referral_code().await?;
        let user = User::new(username.to_string(), email.to_string(), referral_code);
        self.user_repository.create(user).await
    }

    /// Generate a referral code not yet assigned to any user
    async fn unique_referral_code(&self) -> DomainResult<String> {
        for _ in 0..self.config.referral_code_max_retries {
            let candidate = generate_referral_code();
            if !self
                .user_repository
                .exists_by_referral_code(&candidate)
                .await?
            {
                return Ok(candidate);
            }
        }
        Err(DomainError::Internal {
            message: "Exhausted referral code generation retries".to_string(),
        })
    }
}
