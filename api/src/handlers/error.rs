//! Mapping from domain errors to HTTP responses
//!
//! Every domain failure surfaces as a `(status, machine code, message)`
//! triple in the standard response envelope. Unexpected failures collapse to
//! a generic 500 without leaking internals.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use chrono::Utc;
use serde_json::json;
use thiserror::Error;

use c2e_core::errors::{AuthError, DomainError, TokenError};
use c2e_shared::types::ApiResponse;

/// An HTTP-mappable error carrying the response triple
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ApiError {
    pub status: StatusCode,
    pub code: String,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status,
            code: code.into(),
            message: message.into(),
        }
    }

    /// Generic 500 that does not leak internals
    pub fn internal() -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "INTERNAL_ERROR",
            "Internal server error",
        )
    }

    /// 429 for the IP rate limiter
    pub fn too_many_requests() -> Self {
        Self::new(
            StatusCode::TOO_MANY_REQUESTS,
            "RATE_LIMIT_EXCEEDED",
            "Too many requests from this IP, please try again later",
        )
    }

    /// Default mapping from a domain error
    pub fn from_domain(error: &DomainError) -> Self {
        match error {
            DomainError::Auth(auth) => Self::from_auth(auth),
            DomainError::Token(token) => Self::from_token(token),
            DomainError::ValidationErr(validation) => Self::new(
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                validation.to_string(),
            ),
            DomainError::Validation { message } => {
                Self::new(StatusCode::BAD_REQUEST, "VALIDATION_ERROR", message.clone())
            }
            DomainError::NotFound { resource } => Self::new(
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                format!("{} not found", resource),
            ),
            DomainError::Database { .. } | DomainError::Internal { .. } => Self::internal(),
        }
    }

    /// Mapping for the session gate and the refresh path, where every
    /// credential failure is a 401
    pub fn unauthorized_from(error: &DomainError) -> Self {
        let mut mapped = Self::from_domain(error);
        if matches!(
            error,
            DomainError::Auth(AuthError::UserNotFound)
                | DomainError::Auth(AuthError::EmailNotVerified)
        ) {
            mapped.status = StatusCode::UNAUTHORIZED;
        }
        mapped
    }

    fn from_auth(error: &AuthError) -> Self {
        let (status, code) = match error {
            AuthError::EmailExists => (StatusCode::BAD_REQUEST, "EMAIL_EXISTS"),
            AuthError::UsernameTaken => (StatusCode::BAD_REQUEST, "USERNAME_TAKEN"),
            AuthError::InvalidCode => (StatusCode::UNAUTHORIZED, "INVALID_CODE"),
            AuthError::CodeExpired => (StatusCode::UNAUTHORIZED, "CODE_EXPIRED"),
            AuthError::TooManyAttempts => (StatusCode::UNAUTHORIZED, "TOO_MANY_ATTEMPTS"),
            AuthError::UserNotFound => (StatusCode::NOT_FOUND, "USER_NOT_FOUND"),
            AuthError::EmailNotVerified => (StatusCode::BAD_REQUEST, "EMAIL_NOT_VERIFIED"),
            AuthError::RateLimitExceeded { .. } => {
                (StatusCode::TOO_MANY_REQUESTS, "RATE_LIMIT_EXCEEDED")
            }
            // delivery failures abort the request without naming the cause
            AuthError::EmailDeliveryFailure => return Self::internal(),
        };
        Self::new(status, code, error.to_string())
    }

    fn from_token(error: &TokenError) -> Self {
        let (status, code) = match error {
            TokenError::MissingToken => (StatusCode::UNAUTHORIZED, "MISSING_TOKEN"),
            TokenError::TokenExpired => (StatusCode::UNAUTHORIZED, "TOKEN_EXPIRED"),
            TokenError::InvalidToken => (StatusCode::UNAUTHORIZED, "INVALID_TOKEN"),
            TokenError::TokenGenerationFailed => return Self::internal(),
        };
        Self::new(status, code, error.to_string())
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        self.status
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status)
            .json(ApiResponse::<()>::error(self.message.as_str(), self.code.as_str()))
    }
}

/// Respond with the default mapping for a domain error
pub fn domain_error_response(error: &DomainError) -> HttpResponse {
    if matches!(
        error,
        DomainError::Database { .. } | DomainError::Internal { .. }
    ) {
        log::error!("Unhandled internal error: {}", error);
    }
    ApiError::from_domain(error).error_response()
}

/// Respond with a 400 VALIDATION_ERROR carrying per-field messages
pub fn validation_error_response(errors: &validator::ValidationErrors) -> HttpResponse {
    let mut fields = serde_json::Map::new();
    for (field, field_errors) in errors.field_errors() {
        let messages: Vec<String> = field_errors
            .iter()
            .map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string())
            })
            .collect();
        fields.insert(field.to_string(), json!(messages));
    }

    HttpResponse::BadRequest().json(json!({
        "success": false,
        "error": "Validation failed",
        "code": "VALIDATION_ERROR",
        "details": fields,
        "timestamp": Utc::now(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_error_mapping() {
        let err = DomainError::Auth(AuthError::EmailExists);
        let api = ApiError::from_domain(&err);
        assert_eq!(api.status, StatusCode::BAD_REQUEST);
        assert_eq!(api.code, "EMAIL_EXISTS");
    }

    #[test]
    fn test_code_errors_map_to_401() {
        for (err, code) in [
            (AuthError::InvalidCode, "INVALID_CODE"),
            (AuthError::CodeExpired, "CODE_EXPIRED"),
            (AuthError::TooManyAttempts, "TOO_MANY_ATTEMPTS"),
        ] {
            let api = ApiError::from_domain(&DomainError::Auth(err));
            assert_eq!(api.status, StatusCode::UNAUTHORIZED);
            assert_eq!(api.code, code);
        }
    }

    #[test]
    fn test_user_not_found_defaults_to_404() {
        let api = ApiError::from_domain(&DomainError::Auth(AuthError::UserNotFound));
        assert_eq!(api.status, StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_user_not_found_is_401_on_auth_paths() {
        let api = ApiError::unauthorized_from(&DomainError::Auth(AuthError::UserNotFound));
        assert_eq!(api.status, StatusCode::UNAUTHORIZED);
        assert_eq!(api.code, "USER_NOT_FOUND");
    }

    #[test]
    fn test_internal_errors_do_not_leak() {
        let api = ApiError::from_domain(&DomainError::Database {
            message: "connection refused to secret-host".to_string(),
        });
        assert_eq!(api.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api.message, "Internal server error");
    }

    #[test]
    fn test_delivery_failure_is_generic_500() {
        let api = ApiError::from_domain(&DomainError::Auth(AuthError::EmailDeliveryFailure));
        assert_eq!(api.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api.code, "INTERNAL_ERROR");
    }

    #[test]
    fn test_rate_limit_mapping() {
        let api = ApiError::from_domain(&DomainError::Auth(AuthError::RateLimitExceeded {
            retry_after_seconds: 90,
        }));
        assert_eq!(api.status, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(api.code, "RATE_LIMIT_EXCEEDED");
    }
}
