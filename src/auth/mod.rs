//! Cookie-based Google session handling.
//!
//! The Google access token lives in an HttpOnly cookie set by the OAuth
//! callback. Routes that call Google on the user's behalf sit behind
//! [`session_auth_layer`].

use axum::{
    extract::Request,
    http::{header, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};
use subtle::ConstantTimeEq;

use crate::errors::AppError;

/// Cookie holding the Google access token.
pub const ACCESS_TOKEN_COOKIE: &str = "google_access_token";
/// Cookie holding the Google refresh token.
pub const REFRESH_TOKEN_COOKIE: &str = "google_refresh_token";
/// Cookie holding the OAuth `state` value between redirect and callback.
pub const OAUTH_STATE_COOKIE: &str = "google_oauth_state";

/// Refresh tokens are kept for 30 days.
pub const REFRESH_TOKEN_MAX_AGE_SECS: u64 = 60 * 60 * 24 * 30;
/// The consent round trip must finish within 10 minutes.
pub const OAUTH_STATE_MAX_AGE_SECS: u64 = 60 * 10;

/// Read a cookie value from the request headers.
pub fn read_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim_matches('"').to_string())
        .filter(|value| !value.is_empty())
}

/// The Google access token, if the caller has a session.
pub fn access_token(headers: &HeaderMap) -> Option<String> {
    read_cookie(headers, ACCESS_TOKEN_COOKIE)
}

/// Build a `Set-Cookie` value for an HttpOnly, site-wide cookie.
pub fn session_cookie(name: &str, value: &str, max_age: Option<u64>, secure: bool) -> String {
    let mut cookie = format!("{}={}; Path=/; HttpOnly; SameSite=Lax", name, value);
    if let Some(max_age) = max_age {
        cookie.push_str(&format!("; Max-Age={}", max_age));
    }
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// Build a `Set-Cookie` value that deletes a cookie.
pub fn expired_cookie(name: &str) -> String {
    format!("{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0", name)
}

/// Middleware rejecting requests without a Google session cookie.
pub async fn session_auth_layer(request: Request, next: Next) -> Response {
    if access_token(request.headers()).is_none() {
        tracing::debug!("No access token found, user not authenticated");
        return AppError::Unauthenticated("Not authenticated".to_string()).into_response();
    }
    next.run(request).await
}

/// Compare the OAuth `state` echoed by Google with the one we issued.
pub fn state_matches(expected: &str, provided: &str) -> bool {
    constant_time_compare(expected, provided)
}

/// Perform constant-time string comparison.
fn constant_time_compare(a: &str, b: &str) -> bool {
    a.as_bytes().ct_eq(b.as_bytes()).into()
}
