//! User entity representing a registered player in the Chess2Earn system.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User entity representing a registered player
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user
    pub id: Uuid,

    /// Unique username chosen at registration
    pub username: String,

    /// Unique email address, the passwordless login identity
    pub email: String,

    /// Whether the email address has been verified
    pub verified: bool,

    /// Referral code generated at creation (`CHESS-XXXXXX`)
    pub referral_code: String,

    /// The user who referred this one, if any
    pub referred_by: Option<Uuid>,

    /// Whether the account is banned
    pub is_banned: bool,

    /// Timestamp when the user was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the user was last updated
    pub updated_at: DateTime<Utc>,

    /// Timestamp of the user's last login
    pub last_login_at: Option<DateTime<Utc>>,
}

impl User {
    /// Creates a new unverified User instance
    pub fn new(username: String, email: String, referral_code: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            username,
            email,
            verified: false,
            referral_code,
            referred_by: None,
            is_banned: false,
            created_at: now,
            updated_at: now,
            last_login_at: None,
        }
    }

    /// Marks the user as verified
    ///
    /// Verification is monotonic; there is no way to un-verify a user.
    pub fn verify(&mut self) {
        self.verified = true;
        self.updated_at = Utc::now();
    }

    /// Replaces the username (used when an unverified user re-registers)
    pub fn set_username(&mut self, username: String) {
        self.username = username;
        self.updated_at = Utc::now();
    }

    /// Bans the user account
    pub fn ban(&mut self) {
        self.is_banned = true;
        self.updated_at = Utc::now();
    }

    /// Lifts a ban from the user account
    pub fn unban(&mut self) {
        self.is_banned = false;
        self.updated_at = Utc::now();
    }

    /// Updates the last login timestamp
    pub fn update_last_login(&mut self) {
        self.last_login_at = Some(Utc::now());
        self.updated_at = Utc::now();
    }
}
