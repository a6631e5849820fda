//! Handler for POST /api/auth/login

use actix_web::{web, HttpResponse};
use validator::Validate;

use c2e_core::repositories::{UserRepository, VerificationCodeRepository};
use c2e_core::services::verification::MailerTrait;
use c2e_shared::types::ApiResponse;

use crate::dto::auth::{LoginRequest, LoginResponse};
use crate::handlers::error::{domain_error_response, validation_error_response};

use super::AppState;

/// Starts a passwordless login by emailing a fresh code to a verified user.
///
/// # Responses
/// - `200` `{user_id, email, code_expires_at}`
/// - `404` `USER_NOT_FOUND`
/// - `400` `EMAIL_NOT_VERIFIED`
pub async fn login<U, V, M>(
    state: web::Data<AppState<U, V, M>>,
    request: web::Json<LoginRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    V: VerificationCodeRepository + 'static,
    M: MailerTrait + 'static,
{
    if let Err(errors) = request.0.validate() {
        return validation_error_response(&errors);
    }

    match state.auth_service.login(&request.email).await {
        Ok(dispatch) => HttpResponse::Ok().json(ApiResponse::success(LoginResponse {
            user_id: dispatch.user_id,
            email: dispatch.email,
            code_expires_at: dispatch.code_expires_at,
        })),
        Err(error) => {
            log::warn!("Login failed for {}: {}", request.email, error);
            domain_error_response(&error)
        }
    }
}
