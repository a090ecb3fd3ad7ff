use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;

use crate::{config::GeoConfig, geo::shape::ProviderShape, models::location::LocationInfo};

#[derive(Debug, thiserror::Error)]
pub enum GeoError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("provider answered with status {0}")]
    Status(StatusCode),
    #[error("unrecognised response body")]
    UnrecognisedBody,
}

/// One external lookup service. Every failure is reported as an error so the
/// resolver can move on to the next provider.
#[async_trait]
pub trait GeoProvider: Send + Sync {
    fn name(&self) -> &str;

    async fn try_resolve(&self, ip: &str) -> Result<LocationInfo, GeoError>;
}

pub struct HttpGeoProvider {
    name: &'static str,
    url_template: String,
    client: Client,
}

impl HttpGeoProvider {
    pub fn new(name: &'static str, url_template: impl Into<String>, client: Client) -> Self {
        Self {
            name,
            url_template: url_template.into(),
            client,
        }
    }

    pub fn ip_api(client: Client) -> Self {
        Self::new(
            "ip-api.com",
            "http://ip-api.com/json/{ip}?fields=status,message,country,regionName,city,timezone,query",
            client,
        )
    }

    pub fn ipapi_co(client: Client) -> Self {
        Self::new("ipapi.co", "https://ipapi.co/{ip}/json/", client)
    }

    pub fn geoplugin(client: Client) -> Self {
        Self::new(
            "geoplugin.net",
            "http://www.geoplugin.net/json.gp?ip={ip}",
            client,
        )
    }

    pub fn url_for(&self, ip: &str) -> String {
        self.url_template.replace("{ip}", ip)
    }
}

#[async_trait]
impl GeoProvider for HttpGeoProvider {
    fn name(&self) -> &str {
        self.name
    }

    async fn try_resolve(&self, ip: &str) -> Result<LocationInfo, GeoError> {
        let url = self.url_for(ip);
        tracing::debug!(provider = self.name, url = %url, "Querying geolocation provider");

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(GeoError::Status(response.status()));
        }

        let body: Value = response.json().await?;

        ProviderShape::recognize(&body)
            .map(|shape| shape.into_location(ip))
            .ok_or(GeoError::UnrecognisedBody)
    }
}

pub fn build_http_client(config: &GeoConfig) -> reqwest::Result<Client> {
    let mut builder = Client::builder().user_agent(config.user_agent.clone());
    if let Some(timeout_ms) = config.request_timeout_ms {
        builder = builder.timeout(Duration::from_millis(timeout_ms));
    }
    builder.build()
}

/// ip-api.com, then ipapi.co, then geoplugin.net.
pub fn default_providers(client: Client) -> Vec<Arc<dyn GeoProvider>> {
    vec![
        Arc::new(HttpGeoProvider::ip_api(client.clone())),
        Arc::new(HttpGeoProvider::ipapi_co(client.clone())),
        Arc::new(HttpGeoProvider::geoplugin(client)),
    ]
}
