//! Configuration for the authentication service

/// Configuration for the authentication service
#[derive(Debug, Clone)]
pub struct AuthServiceConfig {
    /// How many times to regenerate a referral code that collides with an
    /// existing user before giving up
    pub referral_code_max_retries: u32,
}

impl Default for AuthServiceConfig {
    fn default() -> Self {
        Self {
            referral_code_max_retries: 5,
        }
    }
}
