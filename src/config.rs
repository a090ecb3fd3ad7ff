use std::env;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    pub server: ServerConfig,
    pub sessions: SessionConfig,
    pub geo: GeoConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors_origins: Vec<String>,
    pub rate_limit_per_second: u32,
    pub admin_token: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionConfig {
    pub ttl_hours: i64,
    pub cleanup_interval_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeoConfig {
    pub user_agent: String,
    pub request_timeout_ms: Option<u64>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            cors_origins: vec!["http://localhost:3000".to_string()],
            rate_limit_per_second: 100,
            admin_token: None,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ttl_hours: 24 * 30,
            cleanup_interval_secs: 300,
        }
    }
}

impl Default for GeoConfig {
    fn default() -> Self {
        Self {
            user_agent: "DeviceSessions/1.0".to_string(),
            request_timeout_ms: None,
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let defaults = Config::default();

        Ok(Config {
            server: ServerConfig {
                host: env::var("SERVER_HOST").unwrap_or(defaults.server.host),
                port: env::var("PORT")
                    .or_else(|_| env::var("SERVER_PORT"))
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.server.port),
                cors_origins: env::var("CORS_ORIGINS")
                    .map(|origins| {
                        origins
                            .split(',')
                            .map(|s| s.trim().to_string())
                            .filter(|s| !s.is_empty())
                            .collect()
                    })
                    .unwrap_or(defaults.server.cors_origins),
                rate_limit_per_second: parsed("RATE_LIMIT_PER_SECOND")
                    .filter(|rate: &u32| *rate > 0)
                    .unwrap_or(defaults.server.rate_limit_per_second),
                admin_token: env::var("ADMIN_TOKEN").ok().filter(|t| !t.is_empty()),
            },
            sessions: SessionConfig {
                ttl_hours: parsed("SESSION_TTL_HOURS")
                    .filter(|hours: &i64| *hours > 0)
                    .unwrap_or(defaults.sessions.ttl_hours),
                cleanup_interval_secs: parsed("SESSION_CLEANUP_INTERVAL_SECS")
                    .filter(|secs: &u64| *secs > 0)
                    .unwrap_or(defaults.sessions.cleanup_interval_secs),
            },
            geo: GeoConfig {
                user_agent: env::var("GEO_USER_AGENT").unwrap_or(defaults.geo.user_agent),
                request_timeout_ms: parsed("GEO_REQUEST_TIMEOUT_MS"),
            },
        })
    }
}

fn parsed<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.trim().parse().ok())
}
