use std::{net::SocketAddr, sync::Arc, time::Duration};

use axum::Router;
use tokio::{net::TcpListener, time::interval};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use device_sessions::{
    app::{
        api::{AppContext, create_api_router},
        state::AppState,
    },
    config::Config,
    geo::{
        GeoResolver,
        provider::{build_http_client, default_providers},
    },
    store::MemorySessionStore,
    utils::rate_limiter::RateLimiter,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{}=info", env!("CARGO_CRATE_NAME")).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting device session service");

    let config = Config::from_env()?;

    let http_client = build_http_client(&config.geo)
        .map_err(|e| anyhow::anyhow!("Failed to build geolocation client: {}", e))?;
    let geo = GeoResolver::new(default_providers(http_client));
    let state = AppState::new(Arc::new(MemorySessionStore::new()), geo);
    let rate_limiter = RateLimiter::new(config.server.rate_limit_per_second);

    let sweep_state = state.clone();
    let sweep_limiter = rate_limiter.clone();
    let sweep_every = Duration::from_secs(config.sessions.cleanup_interval_secs);
    tokio::spawn(async move {
        let mut interval = interval(sweep_every);

        loop {
            interval.tick().await;
            let removed = sweep_state.sessions.cleanup_expired_sessions().await;
            if removed > 0 {
                tracing::info!("Removed {} expired sessions", removed);
            }

            let evicted = sweep_limiter.evict_stale();
            if evicted > 0 {
                tracing::debug!("Evicted {} idle rate limit windows", evicted);
            }
        }
    });

    let context = AppContext {
        state,
        config: config.clone(),
        rate_limiter,
    };

    let app: Router = create_api_router(context);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind to {}: {}", addr, e))?;

    tracing::info!("Device session service running on http://{}", addr);
    tracing::info!("Session TTL: {}h", config.sessions.ttl_hours);
    tracing::info!("Cleanup every {}s", config.sessions.cleanup_interval_secs);

    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    Ok(())
}
