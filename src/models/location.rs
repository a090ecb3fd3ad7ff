use serde::{Deserialize, Serialize};

use crate::models::device::UNKNOWN;

pub const LOCAL_CITY: &str = "Local";
pub const LOCAL_NETWORK: &str = "Local Network";
pub const UNKNOWN_LOCATION: &str = "Unknown Location";

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LocationInfo {
    pub ip: String,
    pub city: Option<String>,
    pub country: Option<String>,
    pub region: Option<String>,
    pub timezone: Option<String>,
    pub location: Option<String>,
}

impl LocationInfo {
    pub fn local(ip: impl Into<String>) -> Self {
        Self {
            ip: ip.into(),
            city: Some(LOCAL_CITY.to_string()),
            country: Some(LOCAL_NETWORK.to_string()),
            location: Some(LOCAL_NETWORK.to_string()),
            ..Default::default()
        }
    }

    pub fn unknown(ip: impl Into<String>) -> Self {
        Self {
            ip: ip.into(),
            city: Some(UNKNOWN.to_string()),
            country: Some(UNKNOWN.to_string()),
            location: Some(UNKNOWN_LOCATION.to_string()),
            ..Default::default()
        }
    }

    /// The label written to the session row. Falls back to `"{city}, {country}"`
    /// when the composed label is missing or empty.
    pub fn label(&self) -> String {
        match self.location.as_deref() {
            Some(location) if !location.is_empty() => location.to_string(),
            _ => format!(
                "{}, {}",
                non_empty(self.city.as_deref()).unwrap_or(UNKNOWN),
                non_empty(self.country.as_deref()).unwrap_or(UNKNOWN),
            ),
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
