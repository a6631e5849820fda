//! Trait for email delivery integration

use async_trait::async_trait;

use crate::domain::entities::verification_code::CodePurpose;

/// Trait for the email delivery capability
///
/// Implementations either deliver the message or return an error; there is
/// no silent-success path. Returns a provider message id on success.
#[async_trait]
pub trait MailerTrait: Send + Sync {
    /// Send a verification code to an email address
    async fn send_code(
        &self,
        email: &str,
        code: &str,
        display_name: Option<&str>,
        purpose: CodePurpose,
    ) -> Result<String, String>;
}

// Allows a mailer selected at runtime (e.g. from configuration) to satisfy
// the generic service bounds.
#[async_trait]
impl MailerTrait for std::sync::Arc<dyn MailerTrait> {
    async fn send_code(
        &self,
        email: &str,
        code: &str,
        display_name: Option<&str>,
        purpose: CodePurpose,
    ) -> Result<String, String> {
        (**self).send_code(email, code, display_name, purpose).await
    }
}
