//! IP rate limiting middleware
//!
//! Fixed-window request counters keyed by client IP, stored in Redis so the
//! limits hold across workers. Each route group gets its own quota: auth
//! endpoints are the tightest, game-sync the slowest-moving. This guard is
//! independent of the per-email resend cooldown enforced in the core; both
//! apply to the resend-code endpoint.

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, ResponseError,
};
use futures_util::future::LocalBoxFuture;
use redis::AsyncCommands;
use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
};

use c2e_shared::config::RateLimitConfig;

use crate::handlers::error::ApiError;

/// A route group's quota: requests per window
#[derive(Debug, Clone, Copy)]
struct Quota {
    scope: &'static str,
    limit: u32,
    window_seconds: u64,
}

/// Rate limiter middleware factory
pub struct RateLimiter {
    redis_client: Arc<redis::Client>,
    config: RateLimitConfig,
}

impl RateLimiter {
    /// Create a new rate limiter against a Redis instance
    ///
    /// The client connects lazily, so constructing a disabled limiter never
    /// touches the network.
    pub fn new(redis_url: &str, config: RateLimitConfig) -> Result<Self, redis::RedisError> {
        let client = redis::Client::open(redis_url)?;
        Ok(Self {
            redis_client: Arc::new(client),
            config,
        })
    }

    fn quota_for_path(&self, path: &str) -> Quota {
        if path.starts_with("/api/auth") {
            Quota {
                scope: "auth",
                limit: self.config.auth_per_minute,
                window_seconds: 60,
            }
        } else if path.contains("/games/sync") {
            Quota {
                scope: "game_sync",
                limit: self.config.game_sync_per_hour,
                window_seconds: 3600,
            }
        } else if path.starts_with("/api/leaderboard") {
            Quota {
                scope: "leaderboard",
                limit: self.config.leaderboard_per_minute,
                window_seconds: 60,
            }
        } else {
            Quota {
                scope: "general",
                limit: self.config.general_per_minute,
                window_seconds: 60,
            }
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RateLimiter
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RateLimiterMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RateLimiterMiddleware {
            service: Rc::new(service),
            redis_client: self.redis_client.clone(),
            config: self.config.clone(),
        }))
    }
}

/// Rate limiter middleware service
pub struct RateLimiterMiddleware<S> {
    service: Rc<S>,
    redis_client: Arc<redis::Client>,
    config: RateLimitConfig,
}

impl<S, B> Service<ServiceRequest> for RateLimiterMiddleware<S>
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

        if !self.config.enabled {
            return Box::pin(async move {
                service
                    .call(req)
                    .await
                    .map(ServiceResponse::map_into_left_body)
            });
        }

        let limiter = RateLimiter {
            redis_client: self.redis_client.clone(),
            config: self.config.clone(),
        };
        let quota = limiter.quota_for_path(req.path());
        let ip = client_ip(&req);
        let redis_client = self.redis_client.clone();

        Box::pin(async move {
            match check_quota(&redis_client, &ip, quota).await {
                Ok(true) => service
                    .call(req)
                    .await
                    .map(ServiceResponse::map_into_left_body),
                Ok(false) => {
                    log::warn!(
                        "Rate limit exceeded: scope={} ip={} limit={}/{}s",
                        quota.scope,
                        ip,
                        quota.limit,
                        quota.window_seconds
                    );
                    let (request, _payload) = req.into_parts();
                    let response = ApiError::too_many_requests()
                        .error_response()
                        .map_into_right_body();
                    Ok(ServiceResponse::new(request, response))
                }
                Err(e) => {
                    // A rate-limiter outage must not take the API down with
                    // it; let the request through and flag the failure.
                    log::warn!("Rate limit check failed, allowing request: {}", e);
                    service
                        .call(req)
                        .await
                        .map(ServiceResponse::map_into_left_body)
                }
            }
        })
    }
}

/// Count this request against the quota; `Ok(false)` means over the limit
async fn check_quota(
    client: &redis::Client,
    ip: &str,
    quota: Quota,
) -> Result<bool, redis::RedisError> {
    let mut conn = client.get_multiplexed_async_connection().await?;
    let key = format!("rate_limit:{}:{}", quota.scope, ip);

    let count: u32 = conn.incr(&key, 1u32).await?;
    if count == 1 {
        let _: () = conn.expire(&key, quota.window_seconds as i64).await?;
    }

    Ok(count <= quota.limit)
}

/// Get the client IP address from the request
///
/// Checks proxy headers first, then falls back to the peer address.
fn client_ip(req: &ServiceRequest) -> String {
    if let Some(forwarded_for) = req.headers().get("X-Forwarded-For") {
        if let Ok(forwarded_str) = forwarded_for.to_str() {
            if let Some(ip) = forwarded_str.split(',').next() {
                return ip.trim().to_string();
            }
        }
    }

    if let Some(real_ip) = req.headers().get("X-Real-IP") {
        if let Ok(ip_str) = real_ip.to_str() {
            return ip_str.to_string();
        }
    }

    req.connection_info()
        .peer_addr()
        .unwrap_or("unknown")
        .to_string()
}
