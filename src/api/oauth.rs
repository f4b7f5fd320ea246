//! Google OAuth redirect endpoint.
//!
//! One route handles both legs of the flow: without a `code` it sends the user
//! to Google's consent screen, with a `code` it finishes the exchange.

use axum::{
    extract::{Query, State},
    http::{header, HeaderMap},
    response::{AppendHeaders, IntoResponse, Redirect, Response},
};
use serde::Deserialize;

use crate::auth::{
    expired_cookie, read_cookie, session_cookie, state_matches, ACCESS_TOKEN_COOKIE,
    OAUTH_STATE_COOKIE, OAUTH_STATE_MAX_AGE_SECS, REFRESH_TOKEN_COOKIE,
    REFRESH_TOKEN_MAX_AGE_SECS,
};
use crate::errors::AppError;
use crate::AppState;

/// Where the browser lands after a successful sign-in.
pub const DASHBOARD_PATH: &str = "/dashboard";
/// Where the browser lands after any OAuth failure.
pub const OAUTH_FAILED_PATH: &str = "/auth?error=oauth_failed";

/// Query parameters Google appends to the redirect URI.
#[derive(Debug, Deserialize)]
pub struct OAuthCallbackQuery {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// GET /api/auth/google - Start or finish the Google sign-in.
pub async fn google_oauth(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<OAuthCallbackQuery>,
) -> Response {
    if let Some(error) = &params.error {
        tracing::warn!("Google returned an OAuth error: {}", error);
        return oauth_failed();
    }

    let Some(code) = params.code.as_deref().filter(|c| !c.is_empty()) else {
        return match begin_consent(&state) {
            Ok(response) => response,
            Err(e) => {
                tracing::error!("Failed to start Google OAuth: {}", e);
                oauth_failed()
            }
        };
    };

    match finish_exchange(&state, &headers, code, params.state.as_deref()).await {
        Ok(response) => response,
        Err(e) => {
            tracing::error!("Google OAuth error: {}", e);
            oauth_failed()
        }
    }
}

fn begin_consent(state: &AppState) -> Result<Response, AppError> {
    let csrf_state = uuid::Uuid::new_v4().to_string();
    let url = state.google.authorization_url(&csrf_state)?;

    tracing::info!("Redirecting to Google OAuth consent screen");

    let cookie = session_cookie(
        OAUTH_STATE_COOKIE,
        &csrf_state,
        Some(OAUTH_STATE_MAX_AGE_SECS),
        state.config.secure_cookies,
    );
    Ok((
        AppendHeaders([(header::SET_COOKIE, cookie)]),
        Redirect::temporary(url.as_str()),
    )
        .into_response())
}

async fn finish_exchange(
    state: &AppState,
    headers: &HeaderMap,
    code: &str,
    returned_state: Option<&str>,
) -> Result<Response, AppError> {
    let expected = read_cookie(headers, OAUTH_STATE_COOKIE)
        .ok_or_else(|| AppError::BadRequest("Missing OAuth state cookie".to_string()))?;
    let provided =
        returned_state.ok_or_else(|| AppError::BadRequest("Missing OAuth state".to_string()))?;
    if !state_matches(&expected, provided) {
        return Err(AppError::BadRequest("OAuth state mismatch".to_string()));
    }

    tracing::info!("Exchanging authorization code for tokens");
    let tokens = state.google.exchange_code(code).await?;

    let secure = state.config.secure_cookies;
    let mut cookies = vec![
        (
            header::SET_COOKIE,
            session_cookie(
                ACCESS_TOKEN_COOKIE,
                &tokens.access_token,
                tokens.expires_in,
                secure,
            ),
        ),
        (header::SET_COOKIE, expired_cookie(OAUTH_STATE_COOKIE)),
    ];

    if let Some(refresh_token) = &tokens.refresh_token {
        cookies.push((
            header::SET_COOKIE,
            session_cookie(
                REFRESH_TOKEN_COOKIE,
                refresh_token,
                Some(REFRESH_TOKEN_MAX_AGE_SECS),
                secure,
            ),
        ));
    }

    tracing::info!("Tokens received, redirecting to dashboard");
    Ok((AppendHeaders(cookies), Redirect::temporary(DASHBOARD_PATH)).into_response())
}

fn oauth_failed() -> Response {
    (
        AppendHeaders([(header::SET_COOKIE, expired_cookie(OAUTH_STATE_COOKIE))]),
        Redirect::temporary(OAUTH_FAILED_PATH),
    )
        .into_response()
}
