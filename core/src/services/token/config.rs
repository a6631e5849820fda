//! Configuration for the token service

use jsonwebtoken::Algorithm;

use c2e_shared::config::JwtConfig;

use crate::domain::entities::token::{JWT_ISSUER, TOKEN_EXPIRY_DAYS};

/// Configuration for the token service
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// JWT signing secret
    pub jwt_secret: String,
    /// JWT signing algorithm
    pub algorithm: Algorithm,
    /// Session token expiry in days
    pub token_expiry_days: i64,
    /// JWT issuer claim
    pub issuer: String,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "development-secret-please-change-in-production".to_string(),
            algorithm: Algorithm::HS256,
            token_expiry_days: TOKEN_EXPIRY_DAYS,
            issuer: JWT_ISSUER.to_string(),
        }
    }
}

impl From<&JwtConfig> for TokenServiceConfig {
    fn from(config: &JwtConfig) -> Self {
        let algorithm = match config.algorithm.as_str() {
            "HS384" => Algorithm::HS384,
            "HS512" => Algorithm::HS512,
            _ => Algorithm::HS256,
        };

        Self {
            jwt_secret: config.secret.clone(),
            algorithm,
            token_expiry_days: config.token_expiry_days,
            issuer: config.issuer.clone(),
        }
    }
}
