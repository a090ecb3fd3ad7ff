use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One authenticated device or browser instance of a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub user_id: String,
    pub session_token: String,
    pub expires: DateTime<Utc>,
    pub device_info: String,
    pub ip_address: String,
    pub location: String,
    pub is_active: bool,
    pub last_activity: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl Session {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires <= now
    }

    /// Listed and accepted for authentication only while active and unexpired.
    pub fn is_valid(&self, now: DateTime<Utc>) -> bool {
        self.is_active && !self.is_expired(now)
    }
}

/// Fields the resolver hands to the store; id and `created_at` are assigned there.
#[derive(Debug, Clone)]
pub struct NewSession {
    pub session_token: String,
    pub user_id: String,
    pub expires: DateTime<Utc>,
    pub device_info: String,
    pub ip_address: String,
    pub location: String,
    pub is_active: bool,
    pub last_activity: DateTime<Utc>,
}

/// Display projection of a session. Carries no user fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SessionSummary {
    pub id: String,
    pub session_token: String,
    pub device_info: String,
    pub ip_address: String,
    pub location: String,
    pub last_activity: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub expires: DateTime<Utc>,
}

impl From<&Session> for SessionSummary {
    fn from(session: &Session) -> Self {
        Self {
            id: session.id.clone(),
            session_token: session.session_token.clone(),
            device_info: session.device_info.clone(),
            ip_address: session.ip_address.clone(),
            location: session.location.clone(),
            last_activity: session.last_activity,
            created_at: session.created_at,
            expires: session.expires,
        }
    }
}
