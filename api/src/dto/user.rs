//! User-facing profile DTO

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use c2e_core::domain::value_objects::UserProfile;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserDto {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub verified: bool,
    pub referral_code: String,
    pub created_at: DateTime<Utc>,
}

impl From<UserProfile> for UserDto {
    fn from(profile: UserProfile) -> Self {
        Self {
            id: profile.id,
            username: profile.username,
            email: profile.email,
            verified: profile.verified,
            referral_code: profile.referral_code,
            created_at: profile.created_at,
        }
    }
}
