//! Email delivery module
//!
//! Implementations of the core `MailerTrait`:
//! - `SendGridMailer` for production delivery over the SendGrid HTTP API
//! - `MockMailer` for development and testing, which surfaces codes through
//!   logs instead of delivering mail

pub mod mock;
pub mod sendgrid;
pub mod template;

pub use mock::{CapturedEmail, MockMailer};
pub use sendgrid::SendGridMailer;

use std::sync::Arc;

use c2e_core::services::verification::MailerTrait;
use c2e_shared::config::{EmailConfig, Environment};

use crate::InfrastructureError;

/// Create a mailer from configuration
///
/// The mock provider is refused in production: a configuration that would
/// log verification codes instead of delivering them must not be bootable
/// there.
pub fn create_mailer(
    config: &EmailConfig,
    environment: Environment,
) -> Result<Arc<dyn MailerTrait>, InfrastructureError> {
    match config.provider.as_str() {
        "sendgrid" => {
            let mailer = SendGridMailer::new(config.clone())?;
            Ok(Arc::new(mailer))
        }
        "mock" => {
            if environment.is_production() {
                return Err(InfrastructureError::Config(
                    "Mock email provider is not allowed in production".to_string(),
                ));
            }
            Ok(Arc::new(MockMailer::new()))
        }
        other => Err(InfrastructureError::Config(format!(
            "Unknown email provider: {}",
            other
        ))),
    }
}
