//! Shared wiring for API integration tests

use actix_web::web;
use std::sync::Arc;

use c2e_api::middleware::auth::SessionGate;
use c2e_api::middleware::rate_limit::RateLimiter;
use c2e_api::routes::auth::AppState;
use c2e_core::repositories::user::MockUserRepository;
use c2e_core::repositories::verification_code::MockVerificationCodeRepository;
use c2e_core::services::auth::{AuthService, AuthServiceConfig};
use c2e_core::services::token::{TokenService, TokenServiceConfig};
use c2e_core::services::verification::{VerificationService, VerificationServiceConfig};
use c2e_infra::email::MockMailer;
use c2e_shared::config::RateLimitConfig;

pub type TestAuthService =
    AuthService<MockUserRepository, MockVerificationCodeRepository, MockMailer>;
pub type TestAppState = AppState<MockUserRepository, MockVerificationCodeRepository, MockMailer>;

/// Everything a test needs to drive the API and inspect side effects
pub struct TestContext {
    pub state: web::Data<TestAppState>,
    pub gate: Arc<dyn SessionGate>,
    pub auth_service: Arc<TestAuthService>,
    pub users: Arc<MockUserRepository>,
    pub mailer: Arc<MockMailer>,
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_verification_config(VerificationServiceConfig::default())
    }

    /// Context whose resend cooldown never blocks
    pub fn without_cooldown() -> Self {
        Self::with_verification_config(VerificationServiceConfig {
            resend_cooldown_seconds: 0,
            ..Default::default()
        })
    }

    pub fn with_verification_config(verification_config: VerificationServiceConfig) -> Self {
        let users = Arc::new(MockUserRepository::new());
        let codes = Arc::new(MockVerificationCodeRepository::new());
        let mailer = Arc::new(MockMailer::with_options(false, false));

        let verification_service = Arc::new(VerificationService::new(
            codes,
            mailer.clone(),
            verification_config,
        ));
        let token_service = Arc::new(TokenService::new(TokenServiceConfig::default()));
        let auth_service = Arc::new(AuthService::new(
            users.clone(),
            verification_service,
            token_service,
            AuthServiceConfig::default(),
        ));

        let gate: Arc<dyn SessionGate> = auth_service.clone();
        let state = web::Data::new(AppState {
            auth_service: auth_service.clone(),
        });

        Self {
            state,
            gate,
            auth_service,
            users,
            mailer,
        }
    }

    /// A rate limiter that never runs (Redis is not touched when disabled)
    pub fn disabled_rate_limiter(&self) -> RateLimiter {
        RateLimiter::new(
            "redis://localhost:6379",
            RateLimitConfig {
                enabled: false,
                ..Default::default()
            },
        )
        .expect("valid redis url")
    }

    /// The code most recently emailed to an address
    pub fn last_code_for(&self, email: &str) -> String {
        self.mailer
            .last_code_for(email)
            .expect("a code should have been emailed")
    }
}

/// Build a ready-to-call test service for a context
macro_rules! test_app {
    ($ctx:expr) => {
        actix_web::test::init_service(c2e_api::app::create_app(
            $ctx.state.clone(),
            $ctx.gate.clone(),
            $ctx.disabled_rate_limiter(),
        ))
        .await
    };
}
