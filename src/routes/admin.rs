use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::{
    app::api::AppContext, models::responses::ApiResponse, routes::reject,
    services::session::admin_token_matches,
};

#[utoipa::path(
    post,
    path = "/admin/cleanup-sessions",
    tag = "Admin",
    responses(
        (status = 200, description = "Expired sessions removed", body = ApiResponse),
        (status = 401, description = "Missing or wrong admin token", body = ApiResponse)
    )
)]
pub async fn cleanup_sessions(State(context): State<AppContext>, headers: HeaderMap) -> Response {
    if let Some(expected) = context.config.server.admin_token.as_deref() {
        if !admin_token_matches(&headers, expected) {
            return reject(StatusCode::UNAUTHORIZED, "Admin token required.");
        }
    }

    let removed = context.state.sessions.cleanup_expired_sessions().await;
    tracing::info!(removed, "Manual session cleanup finished");

    Json(ApiResponse::success(
        "Expired sessions cleaned up successfully.",
        json!({ "removed": removed }),
    ))
    .into_response()
}

#[utoipa::path(
    get,
    path = "/admin/cleanup-sessions",
    tag = "Admin",
    responses(
        (status = 200, description = "Usage", body = ApiResponse)
    )
)]
pub async fn cleanup_sessions_usage() -> impl IntoResponse {
    Json(ApiResponse::success(
        "Session cleanup endpoint. Use POST to trigger cleanup.",
        serde_json::Value::Null,
    ))
}
