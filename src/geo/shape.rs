use serde::Deserialize;
use serde_json::Value;

use crate::models::{device::UNKNOWN, location::LocationInfo};

/// ip-api.com: `status` discriminator plus flat fields.
#[derive(Debug, Deserialize)]
pub struct IpApiBody {
    status: Option<String>,
    country: Option<String>,
    city: Option<String>,
    #[serde(rename = "regionName")]
    region_name: Option<String>,
    timezone: Option<String>,
}

/// ipapi.co: recognised by `city` together with `country_name`.
#[derive(Debug, Deserialize)]
pub struct IpApiCoBody {
    city: Option<String>,
    country_name: Option<String>,
    region: Option<String>,
    timezone: Option<String>,
}

/// geoplugin.net: every field carries a `geoplugin_` prefix.
#[derive(Debug, Deserialize)]
pub struct GeoPluginBody {
    geoplugin_city: Option<String>,
    #[serde(rename = "geoplugin_countryName")]
    geoplugin_country_name: Option<String>,
    #[serde(rename = "geoplugin_regionName")]
    geoplugin_region_name: Option<String>,
    geoplugin_timezone: Option<String>,
}

/// A provider response whose shape was recognised.
#[derive(Debug)]
pub enum ProviderShape {
    IpApi(IpApiBody),
    IpApiCo(IpApiCoBody),
    GeoPlugin(GeoPluginBody),
}

impl ProviderShape {
    /// Tries each known shape in turn. A body that matches none of them, or whose
    /// fields have unexpected types, yields `None`.
    pub fn recognize(body: &Value) -> Option<Self> {
        if let Some(ip_api) = typed::<IpApiBody>(body) {
            if ip_api.status.as_deref() == Some("success") && present(&ip_api.country) {
                return Some(Self::IpApi(ip_api));
            }
        }

        if let Some(ipapi_co) = typed::<IpApiCoBody>(body) {
            if present(&ipapi_co.city) && present(&ipapi_co.country_name) {
                return Some(Self::IpApiCo(ipapi_co));
            }
        }

        if let Some(plugin) = typed::<GeoPluginBody>(body) {
            if present(&plugin.geoplugin_city) && present(&plugin.geoplugin_country_name) {
                return Some(Self::GeoPlugin(plugin));
            }
        }

        None
    }

    pub fn into_location(self, ip: &str) -> LocationInfo {
        let (city, country, region, timezone) = match self {
            Self::IpApi(body) => (
                body.city
                    .filter(|c| !c.is_empty())
                    .unwrap_or_else(|| UNKNOWN.to_string()),
                body.country.unwrap_or_default(),
                body.region_name,
                body.timezone,
            ),
            Self::IpApiCo(body) => (
                body.city.unwrap_or_default(),
                body.country_name.unwrap_or_default(),
                body.region,
                body.timezone,
            ),
            Self::GeoPlugin(body) => (
                body.geoplugin_city.unwrap_or_default(),
                body.geoplugin_country_name.unwrap_or_default(),
                body.geoplugin_region_name,
                body.geoplugin_timezone,
            ),
        };

        LocationInfo {
            ip: ip.to_string(),
            location: Some(format!("{}, {}", city, country)),
            city: Some(city),
            country: Some(country),
            region,
            timezone,
        }
    }
}

fn typed<T: serde::de::DeserializeOwned>(body: &Value) -> Option<T> {
    serde_json::from_value(body.clone()).ok()
}

fn present(field: &Option<String>) -> bool {
    field.as_deref().is_some_and(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn ip_api_success() {
        let body = json!({
            "status": "success",
            "country": "Germany",
            "regionName": "Hesse",
            "city": "Frankfurt am Main",
            "timezone": "Europe/Berlin",
            "query": "203.0.113.5"
        });

        let location = ProviderShape::recognize(&body)
            .expect("recognised")
            .into_location("203.0.113.5");

        assert_eq!(location.city.as_deref(), Some("Frankfurt am Main"));
        assert_eq!(location.region.as_deref(), Some("Hesse"));
        assert_eq!(location.label(), "Frankfurt am Main, Germany");
    }

    #[test]
    fn ip_api_missing_city_becomes_unknown() {
        let body = json!({ "status": "success", "country": "Iceland" });

        let location = ProviderShape::recognize(&body)
            .expect("recognised")
            .into_location("203.0.113.5");

        assert_eq!(location.label(), "Unknown, Iceland");
    }

    #[test]
    fn ip_api_failure_is_not_recognised() {
        let body = json!({ "status": "fail", "message": "reserved range", "query": "203.0.113.5" });
        assert!(ProviderShape::recognize(&body).is_none());
    }

    #[test]
    fn ipapi_co_shape() {
        let body = json!({
            "ip": "203.0.113.5",
            "city": "Toronto",
            "region": "Ontario",
            "country_name": "Canada",
            "timezone": "America/Toronto"
        });

        let shape = ProviderShape::recognize(&body).expect("recognised");
        assert!(matches!(shape, ProviderShape::IpApiCo(_)));

        let location = shape.into_location("203.0.113.5");
        assert_eq!(location.country.as_deref(), Some("Canada"));
        assert_eq!(location.timezone.as_deref(), Some("America/Toronto"));
    }

    #[test]
    fn geoplugin_shape() {
        let body = json!({
            "geoplugin_request": "203.0.113.5",
            "geoplugin_status": 200,
            "geoplugin_city": "Osaka",
            "geoplugin_regionName": "Osaka",
            "geoplugin_countryName": "Japan",
            "geoplugin_timezone": "Asia/Tokyo"
        });

        let shape = ProviderShape::recognize(&body).expect("recognised");
        assert!(matches!(shape, ProviderShape::GeoPlugin(_)));
        assert_eq!(shape.into_location("203.0.113.5").label(), "Osaka, Japan");
    }

    #[test]
    fn geoplugin_with_blank_city_is_not_recognised() {
        let body = json!({ "geoplugin_city": "", "geoplugin_countryName": "Japan" });
        assert!(ProviderShape::recognize(&body).is_none());
    }

    #[test]
    fn malformed_bodies_are_not_recognised() {
        assert!(ProviderShape::recognize(&json!([1, 2, 3])).is_none());
        assert!(ProviderShape::recognize(&json!("nope")).is_none());
        assert!(ProviderShape::recognize(&json!({ "country": 42, "status": "success" })).is_none());
    }
}
