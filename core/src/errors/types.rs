//! Domain-specific error types for authentication and related operations
//!
//! Error kinds form a closed taxonomy; the presentation layer maps each
//! variant to an HTTP status and a stable machine code.

use thiserror::Error;

/// Authentication-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Email already exists")]
    EmailExists,

    #[error("Username already taken")]
    UsernameTaken,

    #[error("Invalid or expired verification code")]
    InvalidCode,

    #[error("Verification code has expired")]
    CodeExpired,

    #[error("Too many failed attempts. Please request a new code")]
    TooManyAttempts,

    #[error("User not found")]
    UserNotFound,

    #[error("Email not verified. Please complete registration")]
    EmailNotVerified,

    #[error("Please wait before requesting a new code")]
    RateLimitExceeded {
        /// Seconds until a new code may be requested
        retry_after_seconds: i64,
    },

    #[error("Failed to deliver verification email")]
    EmailDeliveryFailure,
}

/// Token-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Access token required")]
    MissingToken,

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Token generation failed")]
    TokenGenerationFailed,
}

/// Input validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid email address")]
    InvalidEmail,

    #[error("Username must be 3-20 characters of letters, numbers, and underscores")]
    InvalidUsername,

    #[error("Code must be 6 digits")]
    InvalidCodeFormat,

    #[error("Field required: {field}")]
    RequiredField { field: String },
}
