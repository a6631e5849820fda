//! Handler for POST /api/auth/register

use actix_web::{web, HttpResponse};
use validator::Validate;

use c2e_core::repositories::{UserRepository, VerificationCodeRepository};
use c2e_core::services::verification::MailerTrait;
use c2e_shared::types::ApiResponse;

use crate::dto::auth::{RegisterRequest, RegisterResponse};
use crate::handlers::error::{domain_error_response, validation_error_response};

use super::AppState;

/// Registers a new account (or refreshes an unverified one) and emails a
/// verification code.
///
/// # Responses
/// - `201` `{user_id, email, username, code_expires_at}`
/// - `400` `EMAIL_EXISTS` / `USERNAME_TAKEN` / `VALIDATION_ERROR`
pub async fn register<U, V, M>(
    state: web::Data<AppState<U, V, M>>,
    request: web::Json<RegisterRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    V: VerificationCodeRepository + 'static,
    M: MailerTrait + 'static,
{
    if let Err(errors) = request.0.validate() {
        return validation_error_response(&errors);
    }

    log::info!("Processing registration for email: {}", request.email);

    match state
        .auth_service
        .register(&request.email, &request.username)
        .await
    {
        Ok(outcome) => HttpResponse::Created().json(ApiResponse::success(RegisterResponse {
            user_id: outcome.user_id,
            email: outcome.email,
            username: outcome.username,
            code_expires_at: outcome.code_expires_at,
        })),
        Err(error) => {
            log::warn!("Registration failed for {}: {}", request.email, error);
            domain_error_response(&error)
        }
    }
}
