//! JWT authentication middleware for protecting API endpoints.
//!
//! Extracts the bearer token from the Authorization header, runs the full
//! session gate (signature, expiry, user existence, verified email) through
//! the core auth service, and injects the user context into the request.

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    http::header::AUTHORIZATION,
    web, Error, FromRequest, HttpMessage, HttpRequest, ResponseError,
};
use async_trait::async_trait;
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
};
use uuid::Uuid;

use c2e_core::domain::entities::user::User;
use c2e_core::domain::value_objects::UserProfile;
use c2e_core::errors::{DomainResult, TokenError};
use c2e_core::repositories::{UserRepository, VerificationCodeRepository};
use c2e_core::services::auth::AuthService;
use c2e_core::services::verification::MailerTrait;

use crate::handlers::error::ApiError;

/// User authentication context injected into requests
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// User ID of the authenticated user
    pub user_id: Uuid,
    /// Public profile of the authenticated user
    pub user: UserProfile,
}

impl AuthContext {
    fn from_user(user: &User) -> Self {
        Self {
            user_id: user.id,
            user: UserProfile::from(user),
        }
    }
}

/// Trait wrapping the auth service session gate for dynamic dispatch
#[async_trait]
pub trait SessionGate: Send + Sync {
    /// Validate a token and load its verified user
    async fn authenticate(&self, token: &str) -> DomainResult<User>;
}

#[async_trait]
impl<U, V, M> SessionGate for AuthService<U, V, M>
where
    U: UserRepository + 'static,
    V: VerificationCodeRepository + 'static,
    M: MailerTrait + 'static,
{
    async fn authenticate(&self, token: &str) -> DomainResult<User> {
        AuthService::authenticate(self, token).await
    }
}

/// JWT authentication middleware factory
#[derive(Default)]
pub struct JwtAuth;

impl JwtAuth {
    /// Creates a new JWT authentication middleware
    pub fn new() -> Self {
        Self
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddleware {
            service: Rc::new(service),
        }))
    }
}

/// JWT authentication middleware service
pub struct JwtAuthMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    actix_web::dev::forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let gate = req
            .app_data::<web::Data<Arc<dyn SessionGate>>>()
            .map(|data| data.get_ref().clone());

        Box::pin(async move {
            let token = match extract_bearer_token(req.request()) {
                Some(token) => token,
                None => {
                    return Ok(reject(
                        req,
                        ApiError::from_domain(&TokenError::MissingToken.into()),
                    ));
                }
            };

            let gate = match gate {
                Some(gate) => gate,
                None => {
                    log::error!("Session gate is not registered in app data");
                    return Ok(reject(req, ApiError::internal()));
                }
            };

            match gate.authenticate(&token).await {
                Ok(user) => {
                    req.extensions_mut().insert(AuthContext::from_user(&user));
                    service
                        .call(req)
                        .await
                        .map(ServiceResponse::map_into_left_body)
                }
                Err(error) => Ok(reject(req, ApiError::unauthorized_from(&error))),
            }
        })
    }
}

/// Short-circuit the request with an error response
fn reject<B>(req: ServiceRequest, error: ApiError) -> ServiceResponse<EitherBody<B>> {
    let (request, _payload) = req.into_parts();
    let response = error.error_response().map_into_right_body();
    ServiceResponse::new(request, response)
}

/// Extracts the bearer token from the Authorization header
pub fn extract_bearer_token(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|s| s.to_string())
}

/// Extractor for required authentication
impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<AuthContext>()
            .cloned()
            .ok_or_else(|| ApiError::from_domain(&TokenError::MissingToken.into()).into());

        ready(result)
    }
}

/// Extractor for optional authentication
///
/// Yields `None` instead of failing when the request is unauthenticated.
pub struct OptionalAuth(pub Option<AuthContext>);

impl FromRequest for OptionalAuth {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let auth = req.extensions().get::<AuthContext>().cloned();
        ready(Ok(OptionalAuth(auth)))
    }
}
