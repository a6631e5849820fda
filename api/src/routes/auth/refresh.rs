//! Handler for POST /api/auth/refresh

use actix_web::{web, HttpRequest, HttpResponse, ResponseError};

use c2e_core::errors::{AuthError, DomainError};
use c2e_core::repositories::{UserRepository, VerificationCodeRepository};
use c2e_core::services::verification::MailerTrait;
use c2e_shared::types::ApiResponse;

use crate::dto::auth::RefreshResponse;
use crate::handlers::error::{domain_error_response, ApiError};
use crate::middleware::auth::extract_bearer_token;

use super::AppState;

/// Exchanges a bearer token (possibly expired, but validly signed) for a
/// fresh 30-day token.
///
/// # Responses
/// - `200` `{token, expires_at}`
/// - `401` `MISSING_TOKEN` / `INVALID_TOKEN` / `USER_NOT_FOUND`
pub async fn refresh<U, V, M>(
    req: HttpRequest,
    state: web::Data<AppState<U, V, M>>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    V: VerificationCodeRepository + 'static,
    M: MailerTrait + 'static,
{
    let token = match extract_bearer_token(&req) {
        Some(token) => token,
        None => {
            return ApiError::new(
                actix_web::http::StatusCode::UNAUTHORIZED,
                "MISSING_TOKEN",
                "Access token required",
            )
            .error_response();
        }
    };

    match state.auth_service.refresh_token(&token).await {
        Ok(refreshed) => HttpResponse::Ok().json(ApiResponse::success(RefreshResponse {
            token: refreshed.token,
            expires_at: refreshed.expires_at,
        })),
        // a vanished user is a credential problem here, not a missing
        // resource: 401, matching the middleware taxonomy
        Err(error @ DomainError::Auth(AuthError::UserNotFound)) => {
            ApiError::unauthorized_from(&error).error_response()
        }
        Err(error) => {
            log::warn!("Token refresh failed: {}", error);
            domain_error_response(&error)
        }
    }
}
