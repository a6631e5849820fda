//! Types for verification service results

use crate::domain::entities::verification_code::VerificationCode;

/// Result of issuing a verification code
#[derive(Debug, Clone)]
pub struct IssuedCode {
    /// The verification code entity that was stored
    pub verification_code: VerificationCode,
    /// The email provider's message id
    pub message_id: String,
}
