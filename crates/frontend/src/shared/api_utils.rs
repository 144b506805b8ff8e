//! API utilities for frontend-backend communication
//!
//! Resolves the REST base URL and joins endpoint paths onto it.

/// Port the inventory backend listens on when served next to the UI.
const API_PORT: u16 = 8000;

/// Get the base URL for API requests
///
/// A build-time `INVENTORY_API_BASE` wins. Otherwise the URL is derived from
/// the current window location, e.g. `"http://localhost:8000/api/"`.
/// Always ends with a slash.
pub fn api_base() -> String {
    if let Some(base) = option_env!("INVENTORY_API_BASE") {
        return with_trailing_slash(base);
    }
    let window = match web_sys::window() {
        Some(w) => w,
        None => return format!("http://127.0.0.1:{}/api/", API_PORT),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:{}/api/", protocol, hostname, API_PORT)
}

/// Join an endpoint path (`"products/12/"`) onto a base URL.
pub fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

fn with_trailing_slash(base: &str) -> String {
    if base.ends_with('/') {
        base.to_string()
    } else {
        format!("{}/", base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_url() {
        assert_eq!(
            join_url("http://localhost:8000/api/", "products/"),
            "http://localhost:8000/api/products/"
        );
        assert_eq!(
            join_url("http://localhost:8000/api", "/users/3/"),
            "http://localhost:8000/api/users/3/"
        );
    }

    #[test]
    fn test_trailing_slash() {
        assert_eq!(with_trailing_slash("http://x/api"), "http://x/api/");
        assert_eq!(with_trailing_slash("http://x/api/"), "http://x/api/");
    }
}
