//! Email delivery provider configuration

use serde::{Deserialize, Serialize};

/// Email delivery configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EmailConfig {
    /// Email provider ("sendgrid" or "mock")
    pub provider: String,

    /// Provider API key
    pub api_key: String,

    /// From address for outgoing mail
    pub from_address: String,

    /// Display name for outgoing mail
    pub from_name: String,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            provider: String::from("sendgrid"),
            api_key: String::new(),
            from_address: String::from("noreply@chess2earn.com"),
            from_name: String::from("Chess2Earn"),
        }
    }
}

impl EmailConfig {
    /// Create a mock configuration for development
    pub fn mock() -> Self {
        Self {
            provider: String::from("mock"),
            ..Default::default()
        }
    }

    /// Create from environment variables
    pub fn from_env() -> Self {
        Self {
            provider: std::env::var("EMAIL_PROVIDER").unwrap_or_else(|_| "mock".to_string()),
            api_key: std::env::var("EMAIL_API_KEY").unwrap_or_default(),
            from_address: std::env::var("EMAIL_FROM")
                .unwrap_or_else(|_| "noreply@chess2earn.com".to_string()),
            from_name: std::env::var("EMAIL_FROM_NAME")
                .unwrap_or_else(|_| "Chess2Earn".to_string()),
        }
    }
}
