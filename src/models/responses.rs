use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::models::session::SessionSummary;

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct ApiResponse {
    success: bool,
    message: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<Value>,

    #[schema(example = 200)]
    code: u32,
}

impl ApiResponse {
    pub fn success(message: impl Into<String>, data: Value) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: if data.is_null() { None } else { Some(data) },
            code: 200,
        }
    }

    pub fn failure(message: impl Into<String>, code: u32) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
            code,
        }
    }
}

/// A live session as shown to its owner. The token is never echoed back.
#[derive(Debug, Serialize, ToSchema)]
pub struct SessionView {
    pub id: String,
    pub device_info: String,
    pub ip_address: String,
    pub location: String,
    pub last_activity: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub expires: DateTime<Utc>,
    pub is_current_session: bool,
}

impl SessionView {
    pub fn new(summary: SessionSummary, current_token: &str) -> Self {
        let location = if summary.location.is_empty() {
            "Unknown".to_string()
        } else {
            summary.location
        };

        Self {
            is_current_session: summary.session_token == current_token,
            id: summary.id,
            device_info: summary.device_info,
            ip_address: summary.ip_address,
            location,
            last_activity: summary.last_activity,
            created_at: summary.created_at,
            expires: summary.expires,
        }
    }
}
