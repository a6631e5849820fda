//! SendGrid email delivery
//!
//! Sends verification codes through the SendGrid v3 mail-send API. Delivery
//! failures surface as errors; there is no retry here, the whole request
//! fails and the client asks for a new code.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::json;
use std::time::Duration;
use tracing::{error, info};

use c2e_core::domain::entities::verification_code::CodePurpose;
use c2e_core::services::verification::MailerTrait;
use c2e_shared::config::EmailConfig;

use crate::email::template;
use crate::InfrastructureError;

const SENDGRID_SEND_URL: &str = "https://api.sendgrid.com/v3/mail/send";
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// SendGrid mailer implementation
pub struct SendGridMailer {
    client: reqwest::Client,
    config: EmailConfig,
}

impl SendGridMailer {
    /// Create a new SendGrid mailer
    pub fn new(config: EmailConfig) -> Result<Self, InfrastructureError> {
        if config.api_key.is_empty() {
            return Err(InfrastructureError::Config(
                "SendGrid API key is not set".to_string(),
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(InfrastructureError::Http)?;

        info!(
            from = %config.from_address,
            "SendGrid mailer initialized"
        );

        Ok(Self { client, config })
    }
}

#[async_trait]
impl MailerTrait for SendGridMailer {
    async fn send_code(
        &self,
        email: &str,
        code: &str,
        display_name: Option<&str>,
        purpose: CodePurpose,
    ) -> Result<String, String> {
        let payload = json!({
            "personalizations": [{ "to": [{ "email": email }] }],
            "from": {
                "email": self.config.from_address,
                "name": self.config.from_name,
            },
            "subject": template::subject(purpose),
            "content": [{
                "type": "text/html",
                "value": template::html_body(code, display_name, purpose),
            }],
        });

        let response = self
            .client
            .post(SENDGRID_SEND_URL)
            .bearer_auth(&self.config.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                error!(email = email, error = %e, "SendGrid request failed");
                format!("SendGrid request failed: {}", e)
            })?;

        if response.status() != StatusCode::ACCEPTED {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!(
                email = email,
                status = %status,
                "SendGrid rejected the message"
            );
            return Err(format!("SendGrid returned {}: {}", status, body));
        }

        // SendGrid returns the message id in the X-Message-Id header
        let message_id = response
            .headers()
            .get("X-Message-Id")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("unknown")
            .to_string();

        info!(
            email = email,
            message_id = %message_id,
            purpose = purpose.as_str(),
            "Verification email sent"
        );

        Ok(message_id)
    }
}
