use axum::{
    Router,
    http::{HeaderName, HeaderValue, Method, header},
    routing::{delete, get, post},
};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    app::state::AppState,
    config::Config,
    middleware::rate_limiter::rate_limit_middleware,
    routes::{
        admin::{cleanup_sessions, cleanup_sessions_usage},
        health::health_check,
        session::{create_session, list_user_sessions, logout, terminate_session},
    },
    utils::rate_limiter::RateLimiter,
};

#[derive(Clone)]
pub struct AppContext {
    pub state: AppState,
    pub config: Config,
    pub rate_limiter: RateLimiter,
}

#[derive(OpenApi)]
#[openapi(
    info(title = "Device Sessions API", version = "0.1.0"),
    paths(
        crate::routes::health::health_check,
        crate::routes::session::create_session,
        crate::routes::session::list_user_sessions,
        crate::routes::session::terminate_session,
        crate::routes::session::logout,
        crate::routes::admin::cleanup_sessions,
        crate::routes::admin::cleanup_sessions_usage,
    ),
    components(schemas(
        crate::models::responses::ApiResponse,
        crate::models::responses::SessionView,
        crate::models::requests::CreateSessionRequest,
    ))
)]
struct ApiDoc;

pub fn create_api_router(context: AppContext) -> Router {
    let origins: Vec<HeaderValue> = context
        .config
        .server
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::COOKIE,
            HeaderName::from_static("x-admin-token"),
        ])
        .allow_credentials(true);

    Router::new()
        .route("/health", get(health_check))
        .route("/sessions", post(create_session))
        .route("/user/sessions", get(list_user_sessions))
        .route("/user/sessions/logout", post(logout))
        .route("/user/sessions/{session_id}", delete(terminate_session))
        .route(
            "/admin/cleanup-sessions",
            post(cleanup_sessions).get(cleanup_sessions_usage),
        )
        .merge(SwaggerUi::new("/swagger-ui").url("/docs/openapi.json", ApiDoc::openapi()))
        .layer(axum::middleware::from_fn(rate_limit_middleware))
        .layer(axum::Extension(context.rate_limiter.clone()))
        .layer(cors)
        .with_state(context)
}
