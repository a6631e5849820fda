//! Authentication request and response DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::user::UserDto;

fn validate_username(value: &str) -> Result<(), validator::ValidationError> {
    if c2e_shared::utils::validation::is_valid_username(value) {
        Ok(())
    } else {
        let mut error = validator::ValidationError::new("username");
        error.message =
            Some("Username must be 3-20 characters of letters, numbers, and underscores".into());
        Err(error)
    }
}

fn validate_code(value: &str) -> Result<(), validator::ValidationError> {
    if c2e_shared::utils::validation::is_valid_code(value) {
        Ok(())
    } else {
        let mut error = validator::ValidationError::new("code");
        error.message = Some("Code must be 6 digits".into());
        Err(error)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    #[validate(custom = "validate_username")]
    pub username: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VerifyRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    /// 6-digit verification code
    #[validate(custom = "validate_code")]
    pub code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ResendCodeRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub user_id: Uuid,
    pub email: String,
    pub username: String,
    pub code_expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyResponse {
    pub token: String,
    pub user: UserDto,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResendCodeResponse {
    pub email: String,
    pub code_expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub user_id: Uuid,
    pub email: String,
    pub code_expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshResponse {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}
