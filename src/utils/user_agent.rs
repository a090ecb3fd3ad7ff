use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::device::{DeviceClass, DeviceInfo, UNKNOWN};

static ANDROID_VERSION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Android (\d+(?:\.\d+)?)").expect("valid android pattern"));
static IOS_VERSION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"OS (\d+_\d+)").expect("valid ios pattern"));

/// Ordered substring checks over a raw user-agent. Tokens overlap between
/// vendors (every Chrome UA also says `Safari/`, Edge also says `Chrome/`), so
/// the first matching rule wins.
pub fn parse_user_agent(user_agent: &str) -> DeviceInfo {
    let info = DeviceInfo {
        browser: detect_browser(user_agent).to_string(),
        os: detect_os(user_agent),
        device: detect_device(user_agent),
        user_agent: user_agent.to_string(),
    };

    tracing::debug!(
        browser = %info.browser,
        os = %info.os,
        device = %info.device,
        "Parsed user agent"
    );

    info
}

fn detect_browser(ua: &str) -> &'static str {
    if ua.contains("Edg/") {
        "Microsoft Edge"
    } else if ua.contains("Chrome/") && !ua.contains("Chromium") {
        "Google Chrome"
    } else if ua.contains("Firefox/") {
        "Mozilla Firefox"
    } else if ua.contains("Safari/") && !ua.contains("Chrome") {
        "Safari"
    } else if ua.contains("Opera/") || ua.contains("OPR/") {
        "Opera"
    } else if ua.contains("Chromium/") {
        "Chromium"
    } else {
        UNKNOWN
    }
}

// Desktop families are checked first, so Android UAs (which carry `Linux`) and
// iPhone UAs (which carry `like Mac OS X`) resolve to the desktop family.
fn detect_os(ua: &str) -> String {
    let os = if ua.contains("Windows NT 10.0") {
        "Windows 10/11"
    } else if ua.contains("Windows NT 6.3") {
        "Windows 8.1"
    } else if ua.contains("Windows NT 6.2") {
        "Windows 8"
    } else if ua.contains("Windows NT 6.1") {
        "Windows 7"
    } else if ua.contains("Windows") {
        "Windows"
    } else if ua.contains("Mac OS X 10_15") || ua.contains("macOS 10.15") {
        "macOS Catalina"
    } else if ua.contains("Mac OS X 10_16") || ua.contains("macOS 11") {
        "macOS Big Sur"
    } else if ua.contains("Mac OS X") || ua.contains("macOS") {
        "macOS"
    } else if ua.contains("Ubuntu") {
        "Ubuntu Linux"
    } else if ua.contains("Linux") {
        "Linux"
    } else if ua.contains("Android") {
        return match ANDROID_VERSION.captures(ua) {
            Some(caps) => format!("Android {}", &caps[1]),
            None => "Android".to_string(),
        };
    } else if ua.contains("iPhone OS") || ua.contains("iOS") {
        return match IOS_VERSION.captures(ua) {
            Some(caps) => format!("iOS {}", caps[1].replacen('_', ".", 1)),
            None => "iOS".to_string(),
        };
    } else {
        UNKNOWN
    };

    os.to_string()
}

fn detect_device(ua: &str) -> DeviceClass {
    if ua.contains("Mobile") || ua.contains("iPhone") {
        DeviceClass::Mobile
    } else if ua.contains("iPad") || ua.contains("Tablet") {
        DeviceClass::Tablet
    } else {
        DeviceClass::Desktop
    }
}
