//! Email verification code service
//!
//! Owns the verification-code lifecycle: issuing (with eager invalidation of
//! earlier codes), consuming, and the per-email resend cooldown.

pub mod config;
pub mod service;
pub mod traits;
pub mod types;

#[cfg(test)]
pub mod tests;

pub use config::VerificationServiceConfig;
pub use service::VerificationService;
pub use traits::MailerTrait;
pub use types::IssuedCode;
