//! Rate limiting middleware for the authentication endpoints.
//!
//! The passcode gate is a brute-force target, so login and change-password
//! requests are limited per client IP.

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::{header, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use governor::{
    clock::DefaultClock, state::keyed::DefaultKeyedStateStore, Quota, RateLimiter as GovRateLimiter,
};
use serde_json::json;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::num::NonZeroU32;

use crate::app::AppState;

type IpLimiter = GovRateLimiter<IpAddr, DefaultKeyedStateStore<IpAddr>, DefaultClock>;

/// Shared keyed rate limiter, one bucket per client IP.
pub struct RateLimiterState {
    limiter: IpLimiter,
    rate_limit_per_minute: u32,
}

impl RateLimiterState {
    /// Create a new rate limiter state with the specified limit per minute.
    pub fn new(rate_limit_per_minute: u32) -> Self {
        let quota = Quota::per_minute(
            NonZeroU32::new(rate_limit_per_minute).unwrap_or(NonZeroU32::new(30).unwrap()),
        );
        Self {
            limiter: GovRateLimiter::keyed(quota),
            rate_limit_per_minute,
        }
    }

    /// Check whether a request from the given IP should be allowed.
    /// Returns Err with retry-after seconds when limited.
    pub fn check(&self, ip: IpAddr) -> Result<(), u64> {
        match self.limiter.check_key(&ip) {
            Ok(_) => Ok(()),
            Err(not_until) => {
                let wait_time = not_until.wait_time_from(governor::clock::Clock::now(
                    &governor::clock::DefaultClock::default(),
                ));
                Err(wait_time.as_secs().max(1))
            }
        }
    }
}

impl std::fmt::Debug for RateLimiterState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimiterState")
            .field("rate_limit_per_minute", &self.rate_limit_per_minute)
            .finish()
    }
}

/// Middleware applying the per-IP limit to auth routes.
pub async fn auth_rate_limit_middleware(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let Some(limiter) = state.auth_limiter.clone() else {
        return next.run(req).await;
    };

    let ip = client_ip(&req);
    if let Err(retry_after) = limiter.check(ip) {
        return rate_limited_response(limiter.rate_limit_per_minute, retry_after);
    }

    next.run(req).await
}

/// Best-effort client IP: first X-Forwarded-For entry, else the socket peer
/// address, else unspecified.
fn client_ip(req: &Request<Body>) -> IpAddr {
    req.headers()
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .and_then(|v| v.trim().parse().ok())
        .or_else(|| {
            req.extensions()
                .get::<ConnectInfo<SocketAddr>>()
                .map(|info| info.0.ip())
        })
        .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED))
}

fn rate_limited_response(limit: u32, retry_after: u64) -> Response {
    let body = json!({
        "error": format!("Rate limit of {} requests/minute exceeded", limit),
    });

    let mut response = (StatusCode::TOO_MANY_REQUESTS, Json(body)).into_response();

    if let Ok(value) = retry_after.to_string().parse() {
        response.headers_mut().insert(header::RETRY_AFTER, value);
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limiter_allows_within_quota() {
        let state = RateLimiterState::new(5);
        let ip: IpAddr = "10.0.0.1".parse().unwrap();
        for _ in 0..5 {
            assert!(state.check(ip).is_ok());
        }
        assert!(state.check(ip).is_err());
    }

    #[test]
    fn test_limiter_buckets_are_per_ip() {
        let state = RateLimiterState::new(1);
        let a: IpAddr = "10.0.0.1".parse().unwrap();
        let b: IpAddr = "10.0.0.2".parse().unwrap();
        assert!(state.check(a).is_ok());
        assert!(state.check(b).is_ok());
        assert!(state.check(a).is_err());
    }

    #[test]
    fn test_retry_after_at_least_one_second() {
        let state = RateLimiterState::new(1);
        let ip: IpAddr = "10.0.0.3".parse().unwrap();
        let _ = state.check(ip);
        let retry_after = state.check(ip).unwrap_err();
        assert!(retry_after >= 1);
    }
}
