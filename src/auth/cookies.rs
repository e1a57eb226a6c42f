//! Session cookie handling
//!
//! The session token travels in an HttpOnly cookie with a fixed name. While
//! the second factor is pending, the token travels in a response header
//! instead and no cookie is set.

use axum::http::{header, HeaderMap};

/// Fixed session cookie name
pub const SESSION_COOKIE: &str = "financeito_session";

/// Session lifetime: 7 days
pub const SESSION_MAX_AGE_SECS: i64 = 7 * 24 * 60 * 60;

/// Response header carrying the pending token until the second factor completes
pub const PENDING_TOKEN_HEADER: &str = "x-pending-token";

/// Build the Set-Cookie value for a fresh session
pub fn session_cookie(token: &str, secure: bool) -> String {
    let mut cookie = format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        SESSION_COOKIE, token, SESSION_MAX_AGE_SECS
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// Build the Set-Cookie value that clears the session
pub fn clear_session_cookie(secure: bool) -> String {
    let mut cookie = format!(
        "{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0",
        SESSION_COOKIE
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// Extract the session token from the Cookie request header
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    let raw = headers.get(header::COOKIE)?.to_str().ok()?;

    raw.split(';')
        .map(|pair| pair.trim())
        .find_map(|pair| {
            let value = pair.strip_prefix(SESSION_COOKIE)?.strip_prefix('=')?;
            Some(value.to_string())
        })
        .filter(|value| !value.is_empty())
}

/// Extract a bearer token from the Authorization request header
pub fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let raw = headers.get(header::AUTHORIZATION)?.to_str().ok()?;

    if let Some(rest) = raw.strip_prefix("Bearer ") {
        Some(rest.to_string())
    } else {
        Some(raw.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_session_cookie_attributes() {
        let cookie = session_cookie("tok123", false);

        assert!(cookie.starts_with("financeito_session=tok123"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("SameSite=Lax"));
        assert!(cookie.contains("Max-Age=604800"));
        assert!(!cookie.contains("Secure"));
    }

    #[test]
    fn test_session_cookie_secure_in_production() {
        let cookie = session_cookie("tok123", true);
        assert!(cookie.ends_with("; Secure"));
    }

    #[test]
    fn test_clear_cookie_zeroes_max_age() {
        let cookie = clear_session_cookie(false);
        assert!(cookie.starts_with("financeito_session=;"));
        assert!(cookie.contains("Max-Age=0"));
    }

    #[test]
    fn test_session_token_parsed_from_cookie_header() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; financeito_session=abc.def.ghi; lang=pt"),
        );

        assert_eq!(session_token(&headers), Some("abc.def.ghi".to_string()));
    }

    #[test]
    fn test_session_token_absent() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("theme=dark"));
        assert_eq!(session_token(&headers), None);

        // A cleared cookie must not resolve to an empty token
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("financeito_session="),
        );
        assert_eq!(session_token(&headers), None);
    }

    #[test]
    fn test_bearer_token_strips_scheme() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer abc.def"),
        );
        assert_eq!(bearer_token(&headers), Some("abc.def".to_string()));
    }
}
