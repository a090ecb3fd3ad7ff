use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::{
    models::session::{NewSession, Session, SessionSummary},
    store::{SessionStore, StoreError, StoreResult},
};

/// In-process store keyed by session token.
#[derive(Clone, Default)]
pub struct MemorySessionStore {
    sessions: Arc<RwLock<HashMap<String, Session>>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the store with existing rows, e.g. restored from a snapshot.
    /// Rows are taken as-is; a later row wins on a repeated token.
    pub fn from_sessions(sessions: impl IntoIterator<Item = Session>) -> Self {
        let sessions: HashMap<String, Session> = sessions
            .into_iter()
            .map(|session| (session.session_token.clone(), session))
            .collect();

        Self {
            sessions: Arc::new(RwLock::new(sessions)),
        }
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn create(&self, new: NewSession) -> StoreResult<Session> {
        let now = Utc::now();
        if new.expires <= now {
            return Err(StoreError::AlreadyExpired(new.expires));
        }

        let mut sessions = self.sessions.write().await;
        if sessions.contains_key(&new.session_token) {
            return Err(StoreError::DuplicateToken);
        }

        let session = Session {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: new.user_id,
            session_token: new.session_token,
            expires: new.expires,
            device_info: new.device_info,
            ip_address: new.ip_address,
            location: new.location,
            is_active: new.is_active,
            last_activity: new.last_activity,
            created_at: now,
        };

        sessions.insert(session.session_token.clone(), session.clone());
        Ok(session)
    }

    async fn find_by_token(&self, session_token: &str) -> StoreResult<Option<Session>> {
        Ok(self.sessions.read().await.get(session_token).cloned())
    }

    async fn find_active_by_user(
        &self,
        user_id: &str,
        now: DateTime<Utc>,
    ) -> StoreResult<Vec<SessionSummary>> {
        let sessions = self.sessions.read().await;

        let mut active: Vec<&Session> = sessions
            .values()
            .filter(|session| session.user_id == user_id && session.is_valid(now))
            .collect();
        active.sort_by(|a, b| b.last_activity.cmp(&a.last_activity));

        Ok(active.into_iter().map(SessionSummary::from).collect())
    }

    async fn touch(&self, session_token: &str, now: DateTime<Utc>) -> StoreResult<()> {
        let mut sessions = self.sessions.write().await;
        let session = sessions.get_mut(session_token).ok_or(StoreError::NotFound)?;
        session.last_activity = now;
        Ok(())
    }

    async fn deactivate(&self, session_token: &str) -> StoreResult<()> {
        let mut sessions = self.sessions.write().await;
        let session = sessions.get_mut(session_token).ok_or(StoreError::NotFound)?;
        session.is_active = false;
        Ok(())
    }

    async fn delete(&self, session_token: &str) -> StoreResult<()> {
        self.sessions
            .write()
            .await
            .remove(session_token)
            .map(|_| ())
            .ok_or(StoreError::NotFound)
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> StoreResult<u64> {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| session.expires >= now);
        Ok((before - sessions.len()) as u64)
    }
}
