//! Main token service implementation

use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::domain::entities::token::Claims;
use crate::errors::{DomainError, TokenError};

use super::config::TokenServiceConfig;

/// Service for issuing and validating signed session tokens
///
/// Validity is purely cryptographic plus expiry; no token state is stored.
/// Callers that need to know whether the user still exists re-check the
/// repository themselves.
pub struct TokenService {
    config: TokenServiceConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    /// Same as `validation` but with the expiry check disabled; the
    /// signature is still verified. Used only by the refresh path.
    relaxed_validation: Validation,
}

impl TokenService {
    /// Creates a new token service instance
    pub fn new(config: TokenServiceConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        let mut validation = Validation::new(config.algorithm);
        validation.set_issuer(&[&config.issuer]);
        validation.validate_exp = true;

        let mut relaxed_validation = validation.clone();
        relaxed_validation.validate_exp = false;

        Self {
            config,
            encoding_key,
            decoding_key,
            validation,
            relaxed_validation,
        }
    }

    /// Issues a signed session token for a user
    ///
    /// Returns the encoded token together with its expiry instant.
    pub fn issue_token(&self, user_id: Uuid) -> Result<(String, DateTime<Utc>), DomainError> {
        let claims = Claims::new(user_id, self.config.token_expiry_days, &self.config.issuer);
        let expires_at = claims.expires_at();

        let header = Header::new(self.config.algorithm);
        let token = encode(&header, &claims, &self.encoding_key)
            .map_err(|_| DomainError::Token(TokenError::TokenGenerationFailed))?;

        Ok((token, expires_at))
    }

    /// Verifies a token's signature and expiry, returning its claims
    pub fn verify_token(&self, token: &str) -> Result<Claims, DomainError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    DomainError::Token(TokenError::TokenExpired)
                }
                _ => DomainError::Token(TokenError::InvalidToken),
            })
    }

    /// Decodes a possibly expired token, still enforcing the signature
    ///
    /// The refresh path accepts expired tokens, but a token with a bad
    /// signature is rejected outright rather than trusted for its payload.
    pub fn decode_expired(&self, token: &str) -> Result<Claims, DomainError> {
        decode::<Claims>(token, &self.decoding_key, &self.relaxed_validation)
            .map(|data| data.claims)
            .map_err(|_| DomainError::Token(TokenError::InvalidToken))
    }
}
