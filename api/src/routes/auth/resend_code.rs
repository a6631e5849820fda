//! Handler for POST /api/auth/resend-code

use actix_web::{web, HttpResponse};
use validator::Validate;

use c2e_core::repositories::{UserRepository, VerificationCodeRepository};
use c2e_core::services::verification::MailerTrait;
use c2e_shared::types::ApiResponse;

use crate::dto::auth::{ResendCodeRequest, ResendCodeResponse};
use crate::handlers::error::{domain_error_response, validation_error_response};

use super::AppState;

/// Re-issues a verification code for an existing user.
///
/// Subject to the per-email cooldown on top of the IP rate limit.
///
/// # Responses
/// - `200` `{email, code_expires_at}`
/// - `404` `USER_NOT_FOUND`
/// - `429` `RATE_LIMIT_EXCEEDED`
pub async fn resend_code<U, V, M>(
    state: web::Data<AppState<U, V, M>>,
    request: web::Json<ResendCodeRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    V: VerificationCodeRepository + 'static,
    M: MailerTrait + 'static,
{
    if let Err(errors) = request.0.validate() {
        return validation_error_response(&errors);
    }

    match state.auth_service.resend_code(&request.email).await {
        Ok(dispatch) => HttpResponse::Ok().json(ApiResponse::success(ResendCodeResponse {
            email: dispatch.email,
            code_expires_at: dispatch.code_expires_at,
        })),
        Err(error) => {
            log::warn!("Resend failed for {}: {}", request.email, error);
            domain_error_response(&error)
        }
    }
}
