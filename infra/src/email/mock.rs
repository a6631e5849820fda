//! Mock email delivery
//!
//! Logs messages instead of sending them, surfacing the verification code
//! on the console for development. The `create_mailer` factory refuses this
//! implementation in production configurations.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tracing::{info, warn};
use uuid::Uuid;

use c2e_core::domain::entities::verification_code::CodePurpose;
use c2e_core::services::verification::MailerTrait;

/// A message captured by the mock mailer
#[derive(Debug, Clone)]
pub struct CapturedEmail {
    pub email: String,
    pub code: String,
    pub display_name: Option<String>,
    pub purpose: CodePurpose,
}

/// Mock mailer for development and testing
#[derive(Clone)]
pub struct MockMailer {
    /// Counter for tracking number of messages sent
    message_count: Arc<AtomicU64>,
    /// Whether to simulate failures (for testing)
    simulate_failure: Arc<AtomicBool>,
    /// Whether to print messages to console
    console_output: bool,
    /// Captured messages, inspectable from tests
    captured: Arc<Mutex<Vec<CapturedEmail>>>,
}

impl MockMailer {
    /// Create a new mock mailer
    pub fn new() -> Self {
        Self {
            message_count: Arc::new(AtomicU64::new(0)),
            simulate_failure: Arc::new(AtomicBool::new(false)),
            console_output: true,
            captured: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a mock mailer with configurable options
    pub fn with_options(console_output: bool, simulate_failure: bool) -> Self {
        Self {
            message_count: Arc::new(AtomicU64::new(0)),
            simulate_failure: Arc::new(AtomicBool::new(simulate_failure)),
            console_output,
            captured: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Get the total number of messages sent
    pub fn get_message_count(&self) -> u64 {
        self.message_count.load(Ordering::SeqCst)
    }

    /// Enable or disable failure simulation
    pub fn set_simulate_failure(&self, simulate: bool) {
        self.simulate_failure.store(simulate, Ordering::SeqCst);
    }

    /// The most recently captured message
    pub fn last_message(&self) -> Option<CapturedEmail> {
        self.captured.lock().unwrap().last().cloned()
    }

    /// The code most recently sent to an address
    pub fn last_code_for(&self, email: &str) -> Option<String> {
        self.captured
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|m| m.email == email)
            .map(|m| m.code.clone())
    }
}

impl Default for MockMailer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MailerTrait for MockMailer {
    async fn send_code(
        &self,
        email: &str,
        code: &str,
        display_name: Option<&str>,
        purpose: CodePurpose,
    ) -> Result<String, String> {
        if self.simulate_failure.load(Ordering::SeqCst) {
            warn!(email = email, "Mock mailer simulating delivery failure");
            return Err("Simulated email delivery failure".to_string());
        }

        let message_id = format!("mock_{}", Uuid::new_v4());
        let count = self.message_count.fetch_add(1, Ordering::SeqCst) + 1;

        self.captured.lock().unwrap().push(CapturedEmail {
            email: email.to_string(),
            code: code.to_string(),
            display_name: display_name.map(|s| s.to_string()),
            purpose,
        });

        if self.console_output {
            println!("\n{}", "=".repeat(60));
            println!("DEV MODE - Email would be sent to: {}", email);
            println!("Verification code: {}", code);
            if let Some(name) = display_name {
                println!("Display name: {}", name);
            }
            println!("Purpose: {}", purpose.as_str());
            println!("{}\n", "=".repeat(60));
        }

        info!(
            target: "email_service",
            provider = "mock",
            email = email,
            message_id = %message_id,
            message_number = count,
            purpose = purpose.as_str(),
            "Email sent (mock)"
        );

        Ok(message_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_send_success() {
        let mailer = MockMailer::with_options(false, false);
        let result = mailer
            .send_code("alice@example.com", "123456", Some("alice"), CodePurpose::Registration)
            .await;

        assert!(result.is_ok());
        assert!(result.unwrap().starts_with("mock_"));
        assert_eq!(mailer.get_message_count(), 1);
    }

    #[tokio::test]
    async fn test_mock_simulated_failure() {
        let mailer = MockMailer::with_options(false, true);
        let result = mailer
            .send_code("alice@example.com", "123456", None, CodePurpose::Login)
            .await;

        assert!(result.is_err());
        assert_eq!(mailer.get_message_count(), 0);
    }

    #[tokio::test]
    async fn test_mock_counts_messages() {
        let mailer = MockMailer::with_options(false, false);
        for i in 1..=3 {
            mailer
                .send_code("alice@example.com", "123456", None, CodePurpose::Login)
                .await
                .unwrap();
            assert_eq!(mailer.get_message_count(), i);
        }
    }
}
