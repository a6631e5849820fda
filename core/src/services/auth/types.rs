//! Result types for authentication flow operations

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Result of a successful registration request
#[derive(Debug, Clone)]
pub struct RegistrationOutcome {
    /// The user the code was issued for
    pub user_id: Uuid,
    /// Email the code was sent to
    pub email: String,
    /// Username after the request (may have been updated on re-registration)
    pub username: String,
    /// When the issued code expires
    pub code_expires_at: DateTime<Utc>,
}

/// Result of a successful resend or login code dispatch
#[derive(Debug, Clone)]
pub struct CodeDispatch {
    /// The user the code was issued for
    pub user_id: Uuid,
    /// Email the code was sent to
    pub email: String,
    /// When the issued code expires
    pub code_expires_at: DateTime<Utc>,
}

/// Result of a successful token refresh
#[derive(Debug, Clone)]
pub struct RefreshedToken {
    /// The freshly signed session token
    pub token: String,
    /// Token expiration timestamp
    pub expires_at: DateTime<Utc>,
}
