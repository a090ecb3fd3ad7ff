use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const UNKNOWN: &str = "Unknown";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum DeviceClass {
    Desktop,
    Mobile,
    Tablet,
}

impl fmt::Display for DeviceClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// What a user-agent string says about the client. Never persisted on its own,
/// only folded into the session's device descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceInfo {
    pub browser: String,
    pub os: String,
    pub device: DeviceClass,
    pub user_agent: String,
}

impl DeviceInfo {
    /// Human-readable descriptor stored on the session, e.g.
    /// `Google Chrome on Windows 10/11 (Desktop)`.
    pub fn describe(&self) -> String {
        format!("{} on {} ({})", self.browser, self.os, self.device)
    }
}
