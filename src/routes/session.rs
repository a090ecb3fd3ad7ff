use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use chrono::{Duration, Utc};
use serde_json::json;

use crate::{
    app::api::AppContext,
    models::{
        requests::CreateSessionRequest,
        responses::{ApiResponse, SessionView},
    },
    routes::reject,
    services::session::{admin_token_matches, authenticate},
    utils::token::generate_session_token,
};

const UNAUTHORIZED: &str = "No valid session token provided.";

#[utoipa::path(
    post,
    path = "/sessions",
    tag = "Session",
    request_body = CreateSessionRequest,
    responses(
        (status = 200, description = "Session issued", body = ApiResponse),
        (status = 400, description = "Missing user id or bad expiry", body = ApiResponse),
        (status = 401, description = "Missing or wrong admin token", body = ApiResponse),
        (status = 403, description = "Issuance disabled, no admin token configured", body = ApiResponse)
    )
)]
pub async fn create_session(
    State(context): State<AppContext>,
    headers: HeaderMap,
    Json(req): Json<CreateSessionRequest>,
) -> Response {
    // Issuance is a trusted call made by the login flow, never by end users.
    let Some(expected) = context.config.server.admin_token.as_deref() else {
        return reject(StatusCode::FORBIDDEN, "Session issuance is disabled.");
    };
    if !admin_token_matches(&headers, expected) {
        return reject(StatusCode::UNAUTHORIZED, "Admin token required.");
    }

    let user_id = req.user_id.trim();
    if user_id.is_empty() {
        return reject(StatusCode::BAD_REQUEST, "User ID is required.");
    }

    let hours = req
        .expires_in_hours
        .unwrap_or(context.config.sessions.ttl_hours);
    let expires = Some(hours)
        .filter(|hours| *hours > 0)
        .and_then(Duration::try_hours)
        .and_then(|ttl| Utc::now().checked_add_signed(ttl));
    let Some(expires) = expires else {
        return reject(StatusCode::BAD_REQUEST, "Expiry must be in the future.");
    };

    let session_token = generate_session_token();

    context
        .state
        .sessions
        .create_session_with_request(user_id, &session_token, expires, &headers)
        .await;

    Json(ApiResponse::success(
        "Session created.",
        json!({
            "session_token": session_token,
            "expires": expires
        }),
    ))
    .into_response()
}

#[utoipa::path(
    get,
    path = "/user/sessions",
    tag = "Session",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Live sessions of the caller", body = ApiResponse),
        (status = 401, description = "Missing or invalid session token", body = ApiResponse)
    )
)]
pub async fn list_user_sessions(State(context): State<AppContext>, headers: HeaderMap) -> Response {
    let current = match authenticate(&headers, &context.state.sessions).await {
        Ok(session) => session,
        Err(status) => return reject(status, UNAUTHORIZED),
    };

    let sessions: Vec<SessionView> = context
        .state
        .sessions
        .get_user_sessions(&current.user_id)
        .await
        .into_iter()
        .map(|summary| SessionView::new(summary, &current.session_token))
        .collect();

    Json(ApiResponse::success(
        "Sessions retrieved.",
        json!({
            "total_sessions": sessions.len(),
            "sessions": sessions
        }),
    ))
    .into_response()
}

#[utoipa::path(
    delete,
    path = "/user/sessions/{session_id}",
    tag = "Session",
    params(("session_id" = String, Path, description = "Id of the session to terminate")),
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Session terminated", body = ApiResponse),
        (status = 401, description = "Missing or invalid session token", body = ApiResponse),
        (status = 404, description = "Session not found or not owned by caller", body = ApiResponse)
    )
)]
pub async fn terminate_session(
    State(context): State<AppContext>,
    Path(session_id): Path<String>,
    headers: HeaderMap,
) -> Response {
    let current = match authenticate(&headers, &context.state.sessions).await {
        Ok(session) => session,
        Err(status) => return reject(status, UNAUTHORIZED),
    };

    let target = context
        .state
        .sessions
        .get_user_sessions(&current.user_id)
        .await
        .into_iter()
        .find(|summary| summary.id == session_id);

    let Some(target) = target else {
        return reject(
            StatusCode::NOT_FOUND,
            "Session not found or doesn't belong to user.",
        );
    };

    context
        .state
        .sessions
        .delete_session(&target.session_token)
        .await;

    Json(ApiResponse::success(
        "Session terminated successfully.",
        json!({ "id": target.id }),
    ))
    .into_response()
}

#[utoipa::path(
    post,
    path = "/user/sessions/logout",
    tag = "Session",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Current session deactivated", body = ApiResponse),
        (status = 401, description = "Missing or invalid session token", body = ApiResponse)
    )
)]
pub async fn logout(State(context): State<AppContext>, headers: HeaderMap) -> Response {
    let current = match authenticate(&headers, &context.state.sessions).await {
        Ok(session) => session,
        Err(status) => return reject(status, UNAUTHORIZED),
    };

    context
        .state
        .sessions
        .deactivate_session(&current.session_token)
        .await;

    Json(ApiResponse::success("Logged out.", serde_json::Value::Null)).into_response()
}
