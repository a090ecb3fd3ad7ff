use std::sync::Arc;

use axum::http::HeaderMap;
use chrono::{DateTime, Utc};

use crate::{
    geo::GeoResolver,
    models::{
        device::DeviceInfo,
        location::LocationInfo,
        session::{NewSession, Session, SessionSummary},
    },
    store::SessionStore,
    utils::{
        client_info::{FALLBACK_IP, extract_client_info},
        token::redact,
        user_agent::parse_user_agent,
    },
};

const UNKNOWN_BROWSER: &str = "Unknown Browser";

/// Derives device and location metadata for logins and keeps the session rows
/// in the store. Nothing here fails its caller: errors are logged and the
/// operation degrades to a no-op or an empty result.
#[derive(Clone)]
pub struct SessionManager {
    store: Arc<dyn SessionStore>,
    geo: GeoResolver,
}

impl SessionManager {
    pub fn new(store: Arc<dyn SessionStore>, geo: GeoResolver) -> Self {
        Self { store, geo }
    }

    /// Records a login made through `headers`.
    pub async fn create_session_with_request(
        &self,
        user_id: &str,
        session_token: &str,
        expires: DateTime<Utc>,
        headers: &HeaderMap,
    ) {
        tracing::info!(user_id, "Creating session from request");

        let client = extract_client_info(headers);
        let device = parse_user_agent(&client.user_agent);
        let location = self.geo.resolve(&client.ip).await;

        self.persist(user_id, session_token, expires, device, location)
            .await;
    }

    /// Records a login from explicit values. Without an address the location is
    /// the local network and no lookup happens.
    pub async fn create_session(
        &self,
        user_id: &str,
        session_token: &str,
        expires: DateTime<Utc>,
        user_agent: Option<&str>,
        ip: Option<&str>,
    ) {
        tracing::info!(user_id, "Creating session");

        let device = parse_user_agent(user_agent.unwrap_or(UNKNOWN_BROWSER));
        let location = match ip {
            Some(ip) => self.geo.resolve(ip).await,
            None => LocationInfo::local(FALLBACK_IP),
        };

        self.persist(user_id, session_token, expires, device, location)
            .await;
    }

    async fn persist(
        &self,
        user_id: &str,
        session_token: &str,
        expires: DateTime<Utc>,
        device: DeviceInfo,
        location: LocationInfo,
    ) {
        let new_session = NewSession {
            session_token: session_token.to_string(),
            user_id: user_id.to_string(),
            expires,
            device_info: device.describe(),
            location: location.label(),
            ip_address: location.ip,
            is_active: true,
            last_activity: Utc::now(),
        };

        match self.store.create(new_session).await {
            Ok(session) => tracing::info!(
                id = %session.id,
                user_id = %session.user_id,
                device = %session.device_info,
                location = %session.location,
                ip = %session.ip_address,
                "Session created"
            ),
            Err(e) => tracing::error!(
                user_id,
                token = %redact(session_token),
                error = %e,
                "Failed to create session, continuing without it"
            ),
        }
    }

    pub async fn update_session_activity(&self, session_token: &str) {
        if let Err(e) = self.store.touch(session_token, Utc::now()).await {
            tracing::warn!(token = %redact(session_token), error = %e, "Failed to update session activity");
        }
    }

    /// Soft termination: the row stays until the cleanup sweep removes it.
    pub async fn deactivate_session(&self, session_token: &str) {
        if let Err(e) = self.store.deactivate(session_token).await {
            tracing::warn!(token = %redact(session_token), error = %e, "Failed to deactivate session");
        }
    }

    pub async fn delete_session(&self, session_token: &str) {
        if let Err(e) = self.store.delete(session_token).await {
            tracing::warn!(token = %redact(session_token), error = %e, "Failed to delete session");
        }
    }

    pub async fn find_session(&self, session_token: &str) -> Option<Session> {
        match self.store.find_by_token(session_token).await {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!(token = %redact(session_token), error = %e, "Failed to look up session");
                None
            }
        }
    }

    pub async fn get_user_sessions(&self, user_id: &str) -> Vec<SessionSummary> {
        match self.store.find_active_by_user(user_id, Utc::now()).await {
            Ok(sessions) => {
                tracing::debug!(user_id, count = sessions.len(), "Found active sessions");
                sessions
            }
            Err(e) => {
                tracing::error!(user_id, error = %e, "Failed to get user sessions");
                Vec::new()
            }
        }
    }

    /// Removes every session past its expiry. Returns how many were removed.
    pub async fn cleanup_expired_sessions(&self) -> u64 {
        match self.store.delete_expired(Utc::now()).await {
            Ok(removed) => removed,
            Err(e) => {
                tracing::error!(error = %e, "Failed to clean up expired sessions");
                0
            }
        }
    }
}
