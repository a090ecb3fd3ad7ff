use std::sync::Arc;

use crate::{
    geo::provider::GeoProvider, models::location::LocationInfo, utils::client_info::is_valid_ip,
};

/// Loopback or private-looking addresses. Prefix matching only: every `172.`
/// address counts as local, not just `172.16.0.0/12`.
pub fn is_local_ip(ip: &str) -> bool {
    ip == "127.0.0.1"
        || ip == "::1"
        || ip.starts_with("192.168.")
        || ip.starts_with("10.")
        || ip.starts_with("172.")
}

/// Walks the providers in order and keeps the first answer. Never fails: local
/// addresses, malformed addresses and total provider failure map to sentinel
/// locations.
#[derive(Clone)]
pub struct GeoResolver {
    providers: Arc<Vec<Arc<dyn GeoProvider>>>,
}

impl GeoResolver {
    pub fn new(providers: Vec<Arc<dyn GeoProvider>>) -> Self {
        Self {
            providers: Arc::new(providers),
        }
    }

    pub async fn resolve(&self, ip: &str) -> LocationInfo {
        if is_local_ip(ip) {
            tracing::debug!(ip, "Local address, skipping geolocation");
            return LocationInfo::local(ip);
        }

        // Provider URLs embed the address verbatim.
        if !is_valid_ip(ip) {
            tracing::warn!(ip, "Not an IP address, skipping geolocation");
            return LocationInfo::unknown(ip);
        }

        for provider in self.providers.iter() {
            match provider.try_resolve(ip).await {
                Ok(location) => {
                    tracing::debug!(
                        provider = provider.name(),
                        ip,
                        location = %location.label(),
                        "Resolved location"
                    );
                    return location;
                }
                Err(e) => {
                    tracing::warn!(provider = provider.name(), ip, error = %e, "Geolocation provider failed");
                }
            }
        }

        tracing::warn!(ip, "All geolocation providers failed, using fallback");
        LocationInfo::unknown(ip)
    }
}
