use axum::http::{HeaderMap, StatusCode, header};
use chrono::Utc;

use crate::{managers::session::SessionManager, models::session::Session};

pub const SESSION_COOKIE: &str = "device_session";
pub const ADMIN_TOKEN_HEADER: &str = "x-admin-token";

/// Whether `x-admin-token` carries exactly `expected`.
pub fn admin_token_matches(headers: &HeaderMap, expected: &str) -> bool {
    headers
        .get(ADMIN_TOKEN_HEADER)
        .and_then(|h| h.to_str().ok())
        .is_some_and(|provided| provided == expected)
}

/// Token from `Authorization: Bearer ...`, else from the session cookie.
pub fn session_token_from_headers(headers: &HeaderMap) -> Option<String> {
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty());

    let token = bearer.or_else(|| {
        headers
            .get(header::COOKIE)
            .and_then(|h| h.to_str().ok())
            .and_then(|cookies| {
                cookies.split(';').find_map(|c| {
                    c.trim()
                        .strip_prefix(SESSION_COOKIE)
                        .and_then(|rest| rest.strip_prefix('='))
                })
            })
            .filter(|token| !token.is_empty())
    });

    token.map(str::to_string)
}

/// Resolves the caller's session and refreshes its activity timestamp.
pub async fn authenticate(
    headers: &HeaderMap,
    sessions: &SessionManager,
) -> Result<Session, StatusCode> {
    let token = session_token_from_headers(headers).ok_or(StatusCode::UNAUTHORIZED)?;

    let session = sessions
        .find_session(&token)
        .await
        .filter(|session| session.is_valid(Utc::now()))
        .ok_or(StatusCode::UNAUTHORIZED)?;

    sessions.update_session_activity(&session.session_token).await;
    Ok(session)
}
