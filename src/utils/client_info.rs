use axum::http::HeaderMap;
use once_cell::sync::Lazy;
use regex::Regex;

pub const UNKNOWN_USER_AGENT: &str = "Unknown User Agent";
pub const FALLBACK_IP: &str = "127.0.0.1";

/// Headers that may carry the originating client address, most trusted first.
pub const IP_HEADERS: [&str; 9] = [
    "cf-connecting-ip",
    "x-real-ip",
    "x-forwarded-for",
    "x-client-ip",
    "x-cluster-client-ip",
    "forwarded-for",
    "forwarded",
    "via",
    "remote-addr",
];

static IPV4: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{1,3}\.){3}\d{1,3}$").expect("valid ipv4 pattern"));
// Full eight-group form only; compressed `::` addresses are rejected.
static IPV6: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9a-fA-F]{1,4}:){7}[0-9a-fA-F]{1,4}$").expect("valid ipv6 pattern")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientInfo {
    pub user_agent: String,
    pub ip: String,
}

pub fn extract_client_info(headers: &HeaderMap) -> ClientInfo {
    let user_agent = header_value(headers, "user-agent")
        .unwrap_or(UNKNOWN_USER_AGENT)
        .to_string();
    let ip = client_ip(headers).unwrap_or_else(|| FALLBACK_IP.to_string());

    tracing::debug!(
        user_agent = %user_agent.chars().take(100).collect::<String>(),
        ip = %ip,
        "Extracted client info"
    );

    ClientInfo { user_agent, ip }
}

/// First address from [`IP_HEADERS`] that passes [`is_valid_ip`].
pub fn client_ip(headers: &HeaderMap) -> Option<String> {
    IP_HEADERS.iter().find_map(|name| {
        let candidate = strip_port(header_value(headers, name)?.split(',').next()?.trim());
        if is_valid_ip(candidate) {
            tracing::debug!(header = *name, ip = candidate, "Found client IP");
            Some(candidate.to_string())
        } else {
            None
        }
    })
}

/// Loose shape check: dotted quad (octet ranges unchecked) or full-form IPv6.
pub fn is_valid_ip(ip: &str) -> bool {
    IPV4.is_match(ip) || IPV6.is_match(ip)
}

fn header_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
}

fn strip_port(candidate: &str) -> &str {
    if let Some(rest) = candidate.strip_prefix('[') {
        return rest.split(']').next().unwrap_or(rest);
    }

    match candidate.split_once(':') {
        Some((host, port)) if !port.contains(':') => host,
        _ => candidate,
    }
}
