//! Authentication result value objects

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::user::User;

/// Public projection of a user, safe to return to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// User identifier
    pub id: Uuid,
    /// Username
    pub username: String,
    /// Email address
    pub email: String,
    /// Whether the email has been verified
    pub verified: bool,
    /// Referral code
    pub referral_code: String,
    /// Account creation timestamp
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            verified: user.verified,
            referral_code: user.referral_code.clone(),
            created_at: user.created_at,
        }
    }
}

/// A verified session: a freshly issued token plus the user it belongs to
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSession {
    /// Signed session token
    pub token: String,
    /// Token expiration timestamp
    pub expires_at: DateTime<Utc>,
    /// The authenticated user's public profile
    pub user: UserProfile,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_projection() {
        let user = User::new(
            "magnus".to_string(),
            "magnus@example.com".to_string(),
            "CHESS-A1B2C3".to_string(),
        );

        let profile = UserProfile::from(&user);
        assert_eq!(profile.id, user.id);
        assert_eq!(profile.username, "magnus");
        assert_eq!(profile.email, "magnus@example.com");
        assert!(!profile.verified);
        assert_eq!(profile.referral_code, "CHESS-A1B2C3");
    }
}
