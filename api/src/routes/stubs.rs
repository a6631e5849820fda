//! Stub handlers for route groups that are not implemented yet
//!
//! Wallet, games, and leaderboard routes exist so clients get a stable
//! error shape (and so the per-group rate limits have real paths to bind
//! to), but their features are not part of this service yet.

use actix_web::HttpResponse;

use c2e_shared::types::ApiResponse;

/// Uniform 501 response for unimplemented endpoints
pub async fn not_implemented() -> HttpResponse {
    HttpResponse::NotImplemented().json(ApiResponse::<()>::error(
        "This endpoint is not implemented yet",
        "NOT_IMPLEMENTED",
    ))
}
