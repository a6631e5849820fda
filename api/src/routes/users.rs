//! User routes

use actix_web::HttpResponse;

use c2e_shared::types::ApiResponse;

use crate::dto::user::UserDto;
use crate::middleware::auth::AuthContext;

/// Handler for GET /api/users/me
///
/// Returns the authenticated user's profile. The JWT middleware has already
/// validated the token and loaded the user.
pub async fn me(auth: AuthContext) -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::success(UserDto::from(auth.user)))
}
