use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::models::responses::ApiResponse;

pub mod admin;
pub mod health;
pub mod session;

pub(crate) fn reject(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(ApiResponse::failure(message, status.as_u16() as u32)),
    )
        .into_response()
}
