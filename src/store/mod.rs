//! Persistence seam for session rows.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::models::session::{NewSession, Session, SessionSummary};

pub mod memory;

pub use memory::MemorySessionStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("session not found")]
    NotFound,
    #[error("session token already in use")]
    DuplicateToken,
    #[error("session expiry {0} is not in the future")]
    AlreadyExpired(DateTime<Utc>),
    #[error("store backend error: {0}")]
    Backend(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Assigns the id and `created_at`. Rejects reused tokens and expiries that
    /// are not in the future.
    async fn create(&self, session: NewSession) -> StoreResult<Session>;

    async fn find_by_token(&self, session_token: &str) -> StoreResult<Option<Session>>;

    /// Active, unexpired sessions of a user, most recently active first.
    async fn find_active_by_user(
        &self,
        user_id: &str,
        now: DateTime<Utc>,
    ) -> StoreResult<Vec<SessionSummary>>;

    async fn touch(&self, session_token: &str, now: DateTime<Utc>) -> StoreResult<()>;

    async fn deactivate(&self, session_token: &str) -> StoreResult<()>;

    async fn delete(&self, session_token: &str) -> StoreResult<()>;

    /// Deletes every row with `expires < now`, active or not. Returns the count.
    async fn delete_expired(&self, now: DateTime<Utc>) -> StoreResult<u64>;
}
