//! # Infrastructure Layer
//!
//! Concrete implementations of the Chess2Earn core's external capabilities:
//!
//! - **Database**: MySQL repositories using SQLx
//! - **Email**: verification-code delivery (SendGrid HTTP API, mock for
//!   development)
//!
//! Everything here is constructed explicitly at startup and injected into
//! the core services; there is no lazily initialized global state.

pub mod database;
pub mod email;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// HTTP request error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Email delivery error
    #[error("Email delivery error: {0}")]
    Email(String),
}
