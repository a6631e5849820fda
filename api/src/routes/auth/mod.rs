//! Authentication routes

pub mod login;
pub mod refresh;
pub mod register;
pub mod resend_code;
pub mod verify;

use std::sync::Arc;

use c2e_core::repositories::{UserRepository, VerificationCodeRepository};
use c2e_core::services::auth::AuthService;
use c2e_core::services::verification::MailerTrait;

/// Application state that holds the shared services
pub struct AppState<U, V, M>
where
    U: UserRepository,
    V: VerificationCodeRepository,
    M: MailerTrait,
{
    pub auth_service: Arc<AuthService<U, V, M>>,
}
