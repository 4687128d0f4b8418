use axum::{
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use governor::{DefaultKeyedRateLimiter, Quota, RateLimiter};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::num::NonZeroU32;
use std::sync::Arc;
use tracing::warn;
use crate::config::{ConfigError, RateLimitSettings};
use crate::error::AppError;
use crate::state::AppState;

pub type IpRateLimiter = DefaultKeyedRateLimiter<IpAddr>;

/// `max_requests` per `window` per client, refilled evenly across the window.
pub fn build_rate_limiter(settings: &RateLimitSettings) -> Result<IpRateLimiter, ConfigError> {
    let burst = NonZeroU32::new(settings.max_requests).ok_or_else(|| ConfigError::Invalid {
        key: "RATE_LIMIT_MAX_REQUESTS".into(),
        reason: "must be at least 1".into(),
    })?;

    let quota = Quota::with_period(settings.window / settings.max_requests)
        .ok_or_else(|| ConfigError::Invalid {
            key: "RATE_LIMIT_WINDOW_SECS".into(),
            reason: "window too small for the request budget".into(),
        })?
        .allow_burst(burst);

    Ok(RateLimiter::keyed(quota))
}

/// Peer address of the connection. With `trust_proxy`, the first
/// `X-Forwarded-For` hop takes precedence.
pub fn client_ip(request: &Request, trust_proxy: bool) -> IpAddr {
    let forwarded = || {
        request
            .headers()
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .and_then(|v| v.trim().parse().ok())
    };
    let peer = || {
        request
            .extensions()
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip())
    };

    trust_proxy
        .then(forwarded)
        .flatten()
        .or_else(peer)
        .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED))
}

/// Everything under `/api`, matched or not.
fn is_throttled_path(path: &str) -> bool {
    path == "/api" || path.starts_with("/api/")
}

/// Throttles `/api` requests per client address.
pub async fn enforce_rate_limit(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    if !is_throttled_path(request.uri().path()) {
        return next.run(request).await;
    }

    let ip = client_ip(&request, state.config.trust_proxy);
    if state.rate_limiter.check_key(&ip).is_err() {
        warn!(client_ip = %ip, path = %request.uri().path(), "Rate limit exceeded");
        return AppError::RateLimited.into_response();
    }
    next.run(request).await
}
