//! Application factory
//!
//! Builds the Actix-web application from explicitly injected dependencies.

use actix_web::{middleware::Logger, web, App, HttpResponse};
use std::sync::Arc;

use c2e_core::repositories::{UserRepository, VerificationCodeRepository};
use c2e_core::services::verification::MailerTrait;
use c2e_shared::types::ApiResponse;

use crate::middleware::auth::{JwtAuth, SessionGate};
use crate::middleware::cors::create_cors;
use crate::middleware::rate_limit::RateLimiter;
use crate::routes::auth::{
    login::login, refresh::refresh, register::register, resend_code::resend_code, verify::verify,
    AppState,
};
use crate::routes::stubs::not_implemented;
use crate::routes::users::me;

/// Create and configure the application with all dependencies
pub fn create_app<U, V, M>(
    app_state: web::Data<AppState<U, V, M>>,
    session_gate: Arc<dyn SessionGate>,
    rate_limiter: RateLimiter,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    U: UserRepository + 'static,
    V: VerificationCodeRepository + 'static,
    M: MailerTrait + 'static,
{
    let cors = create_cors();

    App::new()
        // Shared state
        .app_data(app_state)
        .app_data(web::Data::new(session_gate))
        // Middleware (outermost last: rate limiting runs before CORS and logging)
        .wrap(Logger::default())
        .wrap(cors)
        .wrap(rate_limiter)
        // Health check endpoint
        .route("/health", web::get().to(health_check))
        // API routes
        .service(
            web::scope("/api")
                // Auth routes (unauthenticated)
                .service(
                    web::scope("/auth")
                        .route("/register", web::post().to(register::<U, V, M>))
                        .route("/verify", web::post().to(verify::<U, V, M>))
                        .route("/resend-code", web::post().to(resend_code::<U, V, M>))
                        .route("/login", web::post().to(login::<U, V, M>))
                        .route("/refresh", web::post().to(refresh::<U, V, M>)),
                )
                // Profile route behind the session gate
                .service(
                    web::scope("/users")
                        .wrap(JwtAuth::new())
                        .route("/me", web::get().to(me)),
                )
                // Unimplemented protected route groups
                .service(
                    web::scope("/wallet")
                        .wrap(JwtAuth::new())
                        .default_service(web::route().to(not_implemented)),
                )
                .service(
                    web::scope("/games")
                        .wrap(JwtAuth::new())
                        .default_service(web::route().to(not_implemented)),
                )
                // Leaderboard is public in the product, still unimplemented
                .service(
                    web::scope("/leaderboard")
                        .default_service(web::route().to(not_implemented)),
                ),
        )
        // Default 404 handler
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "chess2earn-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::<()>::error(
        "The requested resource was not found",
        "NOT_FOUND",
    ))
}
