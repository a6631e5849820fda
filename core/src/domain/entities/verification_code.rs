//! Verification code entity for email-based passwordless authentication.

use chrono::{DateTime, Duration, Utc};
use constant_time_eq::constant_time_eq;
use rand::rngs::OsRng;
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum number of verification attempts allowed
pub const MAX_ATTEMPTS: i32 = 3;

/// Length of the verification code
pub const CODE_LENGTH: usize = 6;

/// Default expiration time for verification codes (15 minutes)
pub const DEFAULT_EXPIRATION_MINUTES: i64 = 15;

/// Minimum seconds between code resend requests for the same email
pub const RESEND_COOLDOWN_SECONDS: i64 = 120;

/// What the code proves possession of the inbox for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CodePurpose {
    /// Completing a new registration
    Registration,
    /// Signing in to an existing verified account
    Login,
}

impl CodePurpose {
    /// Stable string form used for persistence
    pub fn as_str(&self) -> &'static str {
        match self {
            CodePurpose::Registration => "registration",
            CodePurpose::Login => "login",
        }
    }
}

impl std::str::FromStr for CodePurpose {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "registration" => Ok(CodePurpose::Registration),
            "login" => Ok(CodePurpose::Login),
            _ => Err(format!("Invalid code purpose: {}", s)),
        }
    }
}

/// Verification code entity binding an email address to a one-time code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationCode {
    /// Unique identifier for the verification code
    pub id: Uuid,

    /// The user this code was issued for, if the user record already exists
    pub user_id: Option<Uuid>,

    /// Email address this code was sent to
    pub email: String,

    /// The 6-digit verification code
    pub code: String,

    /// Why the code was issued
    pub purpose: CodePurpose,

    /// Number of failed verification attempts made against this code
    pub attempts: i32,

    /// Timestamp when the code was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the code expires
    pub expires_at: DateTime<Utc>,

    /// Whether the code has been successfully consumed
    pub consumed: bool,
}

impl VerificationCode {
    /// Creates a new verification code with a random 6-digit code
    pub fn new(email: String, user_id: Option<Uuid>, purpose: CodePurpose) -> Self {
        Self::new_with_expiration(email, user_id, purpose, DEFAULT_EXPIRATION_MINUTES)
    }

    /// Creates a new verification code with a custom expiration time
    pub fn new_with_expiration(
        email: String,
        user_id: Option<Uuid>,
        purpose: CodePurpose,
        expiration_minutes: i64,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            email,
            code: Self::generate_code(),
            purpose,
            attempts: 0,
            created_at: now,
            expires_at: now + Duration::minutes(expiration_minutes),
            consumed: false,
        }
    }

    /// Generates a random 6-digit code in `[100000, 999999]`
    ///
    /// Drawn from the OS CSPRNG. The code space is only 10^6; guessing
    /// resistance comes from the 3-attempt cap, not the entropy.
    pub fn generate_code() -> String {
        let mut rng = OsRng;
        rng.gen_range(100_000..1_000_000u32).to_string()
    }

    /// Checks if the verification code has expired
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }

    /// Checks whether the attempt budget is exhausted
    pub fn attempts_exhausted(&self) -> bool {
        self.attempts >= MAX_ATTEMPTS
    }

    /// Gets the number of remaining verification attempts
    pub fn remaining_attempts(&self) -> i32 {
        (MAX_ATTEMPTS - self.attempts).max(0)
    }

    /// Compares an input code against this one in constant time
    pub fn matches(&self, input_code: &str) -> bool {
        input_code.len() == self.code.len()
            && constant_time_eq(self.code.as_bytes(), input_code.as_bytes())
    }

    /// Records a failed verification attempt
    pub fn record_failed_attempt(&mut self) {
        self.attempts += 1;
    }

    /// Marks the code as consumed
    pub fn mark_consumed(&mut self) {
        self.consumed = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration as StdDuration;

    #[test]
    fn test_new_verification_code() {
        let code = VerificationCode::new(
            "alice@example.com".to_string(),
            None,
            CodePurpose::Registration,
        );

        assert_eq!(code.email, "alice@example.com");
        assert_eq!(code.code.len(), CODE_LENGTH);
        assert_eq!(code.attempts, 0);
        assert!(!code.consumed);
        assert!(!code.is_expired());
        assert_eq!(code.expires_at, code.created_at + Duration::minutes(15));
    }

    #[test]
    fn test_generate_code_range() {
        for _ in 0..100 {
            let code = VerificationCode::generate_code();
            assert_eq!(code.len(), CODE_LENGTH);
            let num: u32 = code.parse().expect("code should be numeric");
            assert!((100_000..1_000_000).contains(&num));
        }
    }

    #[test]
    fn test_code_matching_is_exact() {
        let mut code = VerificationCode::new(
            "alice@example.com".to_string(),
            None,
            CodePurpose::Login,
        );
        code.code = "123456".to_string();

        assert!(code.matches("123456"));
        assert!(!code.matches("123457"));
        assert!(!code.matches("12345"));
        assert!(!code.matches("1234567"));
    }

    #[test]
    fn test_attempt_tracking() {
        let mut code = VerificationCode::new(
            "alice@example.com".to_string(),
            None,
            CodePurpose::Registration,
        );

        assert_eq!(code.remaining_attempts(), MAX_ATTEMPTS);
        code.record_failed_attempt();
        code.record_failed_attempt();
        assert_eq!(code.remaining_attempts(), 1);
        assert!(!code.attempts_exhausted());
        code.record_failed_attempt();
        assert!(code.attempts_exhausted());
        assert_eq!(code.remaining_attempts(), 0);
    }

    #[test]
    fn test_is_expired() {
        let code = VerificationCode::new_with_expiration(
            "alice@example.com".to_string(),
            None,
            CodePurpose::Registration,
            0,
        );

        thread::sleep(StdDuration::from_millis(10));
        assert!(code.is_expired());
    }

    #[test]
    fn test_purpose_round_trip() {
        for purpose in [CodePurpose::Registration, CodePurpose::Login] {
            let parsed: CodePurpose = purpose.as_str().parse().unwrap();
            assert_eq!(parsed, purpose);
        }
        assert!("password".parse::<CodePurpose>().is_err());
    }

    #[test]
    fn test_serialization() {
        let code = VerificationCode::new(
            "alice@example.com".to_string(),
            Some(Uuid::new_v4()),
            CodePurpose::Login,
        );

        let json = serde_json::to_string(&code).unwrap();
        let deserialized: VerificationCode = serde_json::from_str(&json).unwrap();
        assert_eq!(code, deserialized);
    }
}
