//! Handler for POST /api/auth/verify

use actix_web::{web, HttpResponse};
use validator::Validate;

use c2e_core::repositories::{UserRepository, VerificationCodeRepository};
use c2e_core::services::verification::MailerTrait;
use c2e_shared::types::ApiResponse;

use crate::dto::auth::{VerifyRequest, VerifyResponse};
use crate::handlers::error::{domain_error_response, validation_error_response};

use super::AppState;

/// Consumes a verification code and opens a session.
///
/// # Responses
/// - `200` `{token, user}`
/// - `401` `INVALID_CODE` / `CODE_EXPIRED` / `TOO_MANY_ATTEMPTS`
pub async fn verify<U, V, M>(
    state: web::Data<AppState<U, V, M>>,
    request: web::Json<VerifyRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    V: VerificationCodeRepository + 'static,
    M: MailerTrait + 'static,
{
    if let Err(errors) = request.0.validate() {
        return validation_error_response(&errors);
    }

    match state
        .auth_service
        .verify_code(&request.email, &request.code)
        .await
    {
        Ok(session) => HttpResponse::Ok().json(ApiResponse::success(VerifyResponse {
            token: session.token,
            user: session.user.into(),
        })),
        Err(error) => {
            log::warn!("Verification failed for {}: {}", request.email, error);
            domain_error_response(&error)
        }
    }
}
