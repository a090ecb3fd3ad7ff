use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, Request},
    http::StatusCode,
    middleware::Next,
    response::Response,
};

use crate::utils::{client_info::client_ip, rate_limiter::RateLimiter};

/// Keys on the peer address when the server exposes connect info, otherwise on
/// the forwarded client address.
pub async fn rate_limit_middleware(req: Request, next: Next) -> Result<Response, StatusCode> {
    let rate_limiter = req
        .extensions()
        .get::<RateLimiter>()
        .ok_or(StatusCode::INTERNAL_SERVER_ERROR)?;

    let client_key = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .or_else(|| client_ip(req.headers()))
        .unwrap_or_else(|| "unknown".to_string());

    if !rate_limiter.check(&client_key) {
        tracing::warn!(client = %client_key, "Rate limit exceeded");
        return Err(StatusCode::TOO_MANY_REQUESTS);
    }

    Ok(next.run(req).await)
}
