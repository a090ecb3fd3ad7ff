mod common;

use std::{net::SocketAddr, sync::Arc};

use axum::{Json, Router, extract::Path, http::StatusCode, routing::get};
use common::{MockProvider, calls, resolver};
use device_sessions::geo::{GeoError, GeoProvider, GeoResolver, HttpGeoProvider, is_local_ip};
use serde_json::json;
use tokio::net::TcpListener;

/// Local stand-ins for the external services: one down, one answering
/// non-JSON, one answering a failed lookup and one in the ipapi.co shape.
async fn spawn_geo_services() -> SocketAddr {
    let app = Router::new()
        .route("/down/{ip}", get(|| async { StatusCode::SERVICE_UNAVAILABLE }))
        .route("/garbage/{ip}", get(|| async { "<html>rate limited</html>" }))
        .route(
            "/reserved/{ip}",
            get(|Path(ip): Path<String>| async move {
                Json(json!({ "status": "fail", "message": "reserved range", "query": ip }))
            }),
        )
        .route(
            "/ipapi/{ip}",
            get(|Path(ip): Path<String>| async move {
                Json(json!({
                    "ip": ip,
                    "city": "Toronto",
                    "region": "Ontario",
                    "country_name": "Canada",
                    "timezone": "America/Toronto"
                }))
            }),
        );

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn http_provider(name: &'static str, addr: SocketAddr, route: &str) -> HttpGeoProvider {
    let client = reqwest::Client::builder().no_proxy().build().unwrap();
    HttpGeoProvider::new(name, format!("http://{addr}/{route}/{{ip}}"), client)
}

#[tokio::test]
async fn local_addresses_skip_every_provider() {
    let (geo, counters) = resolver(vec![
        MockProvider::succeeding("first", "Paris", "France"),
        MockProvider::succeeding("second", "Rome", "Italy"),
        MockProvider::succeeding("third", "Oslo", "Norway"),
    ]);

    for ip in ["127.0.0.1", "::1", "192.168.1.5", "10.0.0.1", "172.16.0.1"] {
        let location = geo.resolve(ip).await;

        assert_eq!(location.ip, ip);
        assert_eq!(location.city.as_deref(), Some("Local"));
        assert_eq!(location.country.as_deref(), Some("Local Network"));
        assert_eq!(location.location.as_deref(), Some("Local Network"));
    }

    assert!(counters.iter().all(|c| calls(c) == 0));
}

#[tokio::test]
async fn all_providers_failing_yields_unknown_location() {
    let (geo, counters) = resolver(vec![
        MockProvider::failing("first"),
        MockProvider::failing("second"),
        MockProvider::failing("third"),
    ]);

    let location = geo.resolve("203.0.113.5").await;

    assert_eq!(location.ip, "203.0.113.5");
    assert_eq!(location.city.as_deref(), Some("Unknown"));
    assert_eq!(location.country.as_deref(), Some("Unknown"));
    assert_eq!(location.location.as_deref(), Some("Unknown Location"));
    assert!(counters.iter().all(|c| calls(c) == 1));
}

#[tokio::test]
async fn chain_stops_at_first_success() {
    let (geo, counters) = resolver(vec![
        MockProvider::failing("first"),
        MockProvider::succeeding("second", "Nairobi", "Kenya"),
        MockProvider::succeeding("third", "Oslo", "Norway"),
    ]);

    let location = geo.resolve("203.0.113.5").await;

    assert_eq!(location.label(), "Nairobi, Kenya");
    assert_eq!(location.ip, "203.0.113.5");
    assert_eq!(calls(&counters[0]), 1);
    assert_eq!(calls(&counters[1]), 1);
    assert_eq!(calls(&counters[2]), 0);
}

#[tokio::test]
async fn no_providers_means_unknown() {
    let (geo, _) = resolver(Vec::new());
    assert_eq!(geo.resolve("203.0.113.5").await.label(), "Unknown Location");
}

#[test]
fn private_prefix_match_covers_all_of_172() {
    assert!(is_local_ip("172.16.0.1"));
    assert!(is_local_ip("172.217.14.206"));
    assert!(!is_local_ip("173.0.0.1"));
    assert!(!is_local_ip("8.8.8.8"));
    assert!(!is_local_ip("2001:db8::1"));
}

#[tokio::test]
async fn malformed_addresses_skip_every_provider() {
    let (geo, counters) = resolver(vec![MockProvider::succeeding("first", "Paris", "France")]);

    for ip in ["1.2.3.4/../x", "example.com", "", "2001:db8::1"] {
        let location = geo.resolve(ip).await;
        assert_eq!(location.label(), "Unknown Location");
        assert_eq!(location.ip, ip);
    }

    assert_eq!(calls(&counters[0]), 0);
}

#[tokio::test]
async fn http_adapters_report_each_failure() {
    let addr = spawn_geo_services().await;

    let down = http_provider("down", addr, "down").try_resolve("203.0.113.5").await;
    assert!(matches!(down, Err(GeoError::Status(status)) if status == StatusCode::SERVICE_UNAVAILABLE));

    let garbage = http_provider("garbage", addr, "garbage").try_resolve("203.0.113.5").await;
    assert!(matches!(garbage, Err(GeoError::Request(_))));

    let reserved = http_provider("reserved", addr, "reserved").try_resolve("203.0.113.5").await;
    assert!(matches!(reserved, Err(GeoError::UnrecognisedBody)));

    let location = http_provider("ipapi", addr, "ipapi")
        .try_resolve("203.0.113.5")
        .await
        .expect("ipapi.co shape recognised");
    assert_eq!(location.ip, "203.0.113.5");
    assert_eq!(location.region.as_deref(), Some("Ontario"));
    assert_eq!(location.label(), "Toronto, Canada");
}

#[tokio::test]
async fn http_chain_falls_through_to_the_answering_service() {
    let addr = spawn_geo_services().await;

    let geo = GeoResolver::new(vec![
        Arc::new(http_provider("down", addr, "down")) as Arc<dyn GeoProvider>,
        Arc::new(http_provider("garbage", addr, "garbage")),
        Arc::new(http_provider("ipapi", addr, "ipapi")),
    ]);
    let location = geo.resolve("198.51.100.7").await;
    assert_eq!(location.label(), "Toronto, Canada");
    assert_eq!(location.country.as_deref(), Some("Canada"));

    let geo = GeoResolver::new(vec![
        Arc::new(http_provider("down", addr, "down")) as Arc<dyn GeoProvider>,
        Arc::new(http_provider("garbage", addr, "garbage")),
    ]);
    let location = geo.resolve("198.51.100.7").await;
    assert_eq!(location.label(), "Unknown Location");
    assert_eq!(location.city.as_deref(), Some("Unknown"));
}
