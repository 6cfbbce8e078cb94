//! API base URL resolution.
//!
//! Picks the single origin every API call goes to, given the build-time
//! configured URL and (when running in a browser) the page's own location.
//! A configured loopback URL is ignored when the page itself is served from a
//! real host, so a stale `localhost` build setting can't leak into production.

use url::Url;

use crate::config::ClientConfig;
use crate::storage::{current_location, PageLocation};

/// Backend origin used for local development.
pub const LOCAL_API_BASE: &str = "http://localhost:5000";

/// Trim whitespace and strip all trailing slashes.
pub fn normalize_base_url(value: &str) -> String {
    value.trim().trim_end_matches('/').to_string()
}

/// Whether `hostname` names the local machine.
pub fn is_loopback_host(hostname: &str) -> bool {
    let normalized = hostname.trim().to_ascii_lowercase();
    matches!(
        normalized.as_str(),
        "localhost" | "127.0.0.1" | "::1" | "[::1]"
    )
}

/// Whether `url` points at a loopback host. Unparseable URLs are not loopback.
pub fn is_loopback_url(url: &str) -> bool {
    Url::parse(url)
        .ok()
        .and_then(|parsed| parsed.host_str().map(is_loopback_host))
        .unwrap_or(false)
}

/// Resolve the API origin.
///
/// Rules, first match wins:
/// 1. no page context: configured URL, else [`LOCAL_API_BASE`]
/// 2. configured URL, unless it is loopback while the page is not
/// 3. page on loopback: [`LOCAL_API_BASE`]
/// 4. the page's own origin
pub fn resolve_api_base(configured: Option<&str>, page: Option<&PageLocation>) -> String {
    let configured = configured
        .map(normalize_base_url)
        .filter(|value| !value.is_empty());

    let Some(page) = page else {
        return configured.unwrap_or_else(|| LOCAL_API_BASE.to_string());
    };

    let page_is_local = is_loopback_host(&page.hostname);

    if let Some(configured) = configured {
        if !(is_loopback_url(&configured) && !page_is_local) {
            return configured;
        }
        tracing::debug!(
            configured = %configured,
            host = %page.hostname,
            "Ignoring loopback API URL on non-local host"
        );
    }

    if page_is_local {
        return LOCAL_API_BASE.to_string();
    }

    normalize_base_url(&page.origin)
}

/// API origin for the running client, from build config and current page.
pub fn current_api_base() -> String {
    let config = ClientConfig::from_build_env();
    resolve_api_base(config.api_url.as_deref(), current_location().as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(hostname: &str, origin: &str) -> PageLocation {
        PageLocation::new(hostname, origin)
    }

    #[test]
    fn test_localhost_config_ignored_on_production_host() {
        let prod = page("survex.app", "https://survex.app");
        assert_eq!(
            resolve_api_base(Some("http://localhost:5000"), Some(&prod)),
            "https://survex.app"
        );
    }

    #[test]
    fn test_no_config_on_localhost_uses_local_default() {
        let local = page("localhost", "http://localhost:3000");
        assert_eq!(resolve_api_base(None, Some(&local)), "http://localhost:5000");
    }

    #[test]
    fn test_remote_config_wins_everywhere() {
        let prod = page("survex.app", "https://survex.app");
        let local = page("127.0.0.1", "http://127.0.0.1:3000");
        assert_eq!(
            resolve_api_base(Some("https://api.example.com"), Some(&prod)),
            "https://api.example.com"
        );
        assert_eq!(
            resolve_api_base(Some("https://api.example.com//"), Some(&local)),
            "https://api.example.com"
        );
        assert_eq!(
            resolve_api_base(Some("https://api.example.com/"), None),
            "https://api.example.com"
        );
    }

    #[test]
    fn test_localhost_config_kept_on_localhost() {
        let local = page("LOCALHOST", "http://localhost:3000");
        assert_eq!(
            resolve_api_base(Some("http://127.0.0.1:8080/"), Some(&local)),
            "http://127.0.0.1:8080"
        );
    }

    #[test]
    fn test_without_page_context() {
        assert_eq!(resolve_api_base(None, None), LOCAL_API_BASE);
        assert_eq!(resolve_api_base(Some("   "), None), LOCAL_API_BASE);
        assert_eq!(
            resolve_api_base(Some("http://localhost:5000/"), None),
            "http://localhost:5000"
        );
    }

    #[test]
    fn test_same_origin_without_config() {
        let prod = page("www.survex.app", "https://www.survex.app/");
        assert_eq!(resolve_api_base(None, Some(&prod)), "https://www.survex.app");
        assert_eq!(resolve_api_base(Some(""), Some(&prod)), "https://www.survex.app");
    }

    #[test]
    fn test_unparseable_config_is_not_loopback() {
        let prod = page("survex.app", "https://survex.app");
        assert!(!is_loopback_url("not a url"));
        assert_eq!(resolve_api_base(Some("/api-proxy/"), Some(&prod)), "/api-proxy");
    }

    #[test]
    fn test_loopback_detection() {
        assert!(is_loopback_host(" Localhost "));
        assert!(is_loopback_host("127.0.0.1"));
        assert!(is_loopback_url("http://[::1]:5000"));
        assert!(!is_loopback_host("localhost.survex.app"));
        assert!(!is_loopback_url("https://api.example.com"));
    }
}
