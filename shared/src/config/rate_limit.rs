//! Rate limiting configuration module

use serde::{Deserialize, Serialize};

/// Per-route-group IP rate limits
///
/// These windows are enforced by the API middleware and are independent of
/// the per-email resend cooldown applied inside the verification service.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RateLimitConfig {
    /// Enable rate limiting
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Max requests per IP per minute for general API routes
    pub general_per_minute: u32,

    /// Max requests per IP per minute for authentication routes
    pub auth_per_minute: u32,

    /// Max requests per IP per hour for game-sync routes
    pub game_sync_per_hour: u32,

    /// Max requests per IP per minute for leaderboard routes
    pub leaderboard_per_minute: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            general_per_minute: 100,
            auth_per_minute: 5,
            game_sync_per_hour: 10,
            leaderboard_per_minute: 20,
        }
    }
}

impl RateLimitConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            enabled: std::env::var("RATE_LIMIT_ENABLED")
                .map(|v| v != "false")
                .unwrap_or(defaults.enabled),
            general_per_minute: env_u32("RATE_LIMIT_MAX_REQUESTS", defaults.general_per_minute),
            auth_per_minute: env_u32("RATE_LIMIT_AUTH_PER_MINUTE", defaults.auth_per_minute),
            game_sync_per_hour: env_u32("RATE_LIMIT_SYNC_PER_HOUR", defaults.game_sync_per_hour),
            leaderboard_per_minute: env_u32(
                "RATE_LIMIT_LEADERBOARD_PER_MINUTE",
                defaults.leaderboard_per_minute,
            ),
        }
    }

    /// Create a development configuration (more lenient limits)
    pub fn development() -> Self {
        Self {
            general_per_minute: 300,
            auth_per_minute: 50,
            ..Default::default()
        }
    }

    /// Create a production configuration (stricter limits)
    pub fn production() -> Self {
        Self::default()
    }
}

fn env_u32(key: &str, default: u32) -> u32 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn default_enabled() -> bool {
    true
}
