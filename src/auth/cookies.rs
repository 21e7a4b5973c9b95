//! Session cookie construction and reading.
//!
//! Both tokens live in HttpOnly, SameSite=Strict cookies scoped site-wide;
//! the access token for 24 hours, the refresh token for 3 days.

use axum::http::HeaderMap;

/// Access-token cookie name
pub const AUTH_TOKEN_COOKIE: &str = "auth-token";

/// Refresh-token cookie name
pub const REFRESH_TOKEN_COOKIE: &str = "refresh-token";

/// Build a Set-Cookie value for a session token
pub fn session_cookie(name: &str, value: &str, max_age_secs: u64, secure: bool) -> String {
    let mut cookie = format!(
        "{}={}; Max-Age={}; Path=/; HttpOnly; SameSite=Strict",
        name, value, max_age_secs
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// Build a Set-Cookie value that expires a session cookie immediately
pub fn expired_cookie(name: &str, secure: bool) -> String {
    session_cookie(name, "", 0, secure)
}

/// Read a cookie value from the request's Cookie header
pub fn read_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    let header = headers.get(axum::http::header::COOKIE)?.to_str().ok()?;

    header.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        if key == name && !value.is_empty() {
            Some(value.to_string())
        } else {
            None
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header::COOKIE;

    #[test]
    fn test_session_cookie_attributes() {
        let cookie = session_cookie(AUTH_TOKEN_COOKIE, "tok123", 86_400, false);
        assert_eq!(
            cookie,
            "auth-token=tok123; Max-Age=86400; Path=/; HttpOnly; SameSite=Strict"
        );
    }

    #[test]
    fn test_secure_flag_is_appended() {
        let cookie = session_cookie(REFRESH_TOKEN_COOKIE, "ref456", 259_200, true);
        assert!(cookie.ends_with("; Secure"));
        assert!(cookie.contains("Max-Age=259200"));
    }

    #[test]
    fn test_expired_cookie_has_zero_max_age() {
        let cookie = expired_cookie(AUTH_TOKEN_COOKIE, false);
        assert!(cookie.starts_with("auth-token=;"));
        assert!(cookie.contains("Max-Age=0"));
    }

    #[test]
    fn test_read_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            "refresh-token=ref456; auth-token=tok123".parse().unwrap(),
        );

        assert_eq!(
            read_cookie(&headers, AUTH_TOKEN_COOKIE),
            Some("tok123".to_string())
        );
        assert_eq!(
            read_cookie(&headers, REFRESH_TOKEN_COOKIE),
            Some("ref456".to_string())
        );
        assert_eq!(read_cookie(&headers, "other"), None);
    }

    #[test]
    fn test_read_cookie_ignores_empty_values() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, "auth-token=".parse().unwrap());
        assert_eq!(read_cookie(&headers, AUTH_TOKEN_COOKIE), None);
    }

    #[test]
    fn test_read_cookie_without_header() {
        let headers = HeaderMap::new();
        assert_eq!(read_cookie(&headers, AUTH_TOKEN_COOKIE), None);
    }
}
