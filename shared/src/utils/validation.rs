//! Input format validators shared between the API layer and tests

use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("valid email regex")
});

static USERNAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_]{3,20}$").expect("valid username regex"));

static REFERRAL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^CHESS-[A-Z0-9]{6}$").expect("valid referral regex"));

/// Check if an email address is well formed
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Check if a username is 3-20 characters of letters, digits, and underscores
pub fn is_valid_username(username: &str) -> bool {
    USERNAME_RE.is_match(username)
}

/// Check if a verification code is exactly 6 ASCII digits
pub fn is_valid_code(code: &str) -> bool {
    code.len() == 6 && code.chars().all(|c| c.is_ascii_digit())
}

/// Check if a referral code matches the `CHESS-XXXXXX` shape
pub fn is_valid_referral_code(code: &str) -> bool {
    REFERRAL_RE.is_match(code)
}
