use actix_web::{web, HttpServer};
use anyhow::Context;
use dotenvy::dotenv;
use log::info;
use std::sync::Arc;

use c2e_api::app;
use c2e_api::middleware::auth::SessionGate;
use c2e_api::middleware::rate_limit::RateLimiter;
use c2e_api::routes::auth::AppState;
use c2e_core::services::auth::{AuthService, AuthServiceConfig};
use c2e_core::services::token::{TokenService, TokenServiceConfig};
use c2e_core::services::verification::{MailerTrait, VerificationService, VerificationServiceConfig};
use c2e_infra::database::{DatabasePool, MySqlUserRepository, MySqlVerificationCodeRepository};
use c2e_infra::email::create_mailer;
use c2e_shared::config::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    info!("Starting Chess2Earn API server");

    // Load configuration
    let config = AppConfig::from_env();
    if config.environment.is_production() && config.auth.is_using_default_secret() {
        anyhow::bail!("JWT_SECRET must be set in production");
    }

    // Open the database pool; closed explicitly on shutdown below
    let pool = DatabasePool::new(&config.database)
        .await
        .context("Failed to connect to the database")?;

    // Repositories
    let user_repository = Arc::new(MySqlUserRepository::new(pool.get_pool().clone()));
    let code_repository = Arc::new(MySqlVerificationCodeRepository::new(pool.get_pool().clone()));

    // Email delivery (the mock provider is refused in production)
    let mailer: Arc<dyn MailerTrait> = create_mailer(&config.email, config.environment)
        .context("Failed to configure email delivery")?;

    // Core services
    let verification_service = Arc::new(VerificationService::new(
        code_repository,
        Arc::new(mailer),
        VerificationServiceConfig::default(),
    ));
    let token_service = Arc::new(TokenService::new(TokenServiceConfig::from(&config.auth)));
    let auth_service = Arc::new(AuthService::new(
        user_repository,
        verification_service,
        token_service,
        AuthServiceConfig::default(),
    ));

    let session_gate: Arc<dyn SessionGate> = auth_service.clone();
    let app_state = web::Data::new(AppState {
        auth_service: auth_service.clone(),
    });

    let bind_address = config.server.bind_address();
    info!("Server will bind to: {}", bind_address);

    let rate_limit_config = config.rate_limit.clone();
    let redis_url = config.cache.url.clone();

    let server = HttpServer::new(move || {
        let rate_limiter = RateLimiter::new(&redis_url, rate_limit_config.clone())
            .expect("Invalid Redis URL for rate limiter");
        app::create_app(app_state.clone(), session_gate.clone(), rate_limiter)
    })
    .bind(&bind_address)
    .with_context(|| format!("Failed to bind to {}", bind_address))?
    .run();

    let result = server.await;

    // Explicit teardown
    pool.close().await;
    info!("Chess2Earn API server stopped");

    result.map_err(Into::into)
}
