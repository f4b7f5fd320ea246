//! Configuration module for the DocuHub backend.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// OAuth client id issued by Google Cloud Console
    pub google_client_id: String,
    /// OAuth client secret
    pub google_client_secret: String,
    /// Redirect URI registered for the OAuth client
    pub google_redirect_uri: String,
    /// Google consent screen URL
    pub google_auth_url: String,
    /// Google token exchange endpoint
    pub google_token_url: String,
    /// Base URL of the Drive v3 API
    pub drive_api_base: String,
    /// Base URL of the Docs v1 API
    pub docs_api_base: String,
    /// Timeout applied to every outbound Google request
    pub http_timeout: Duration,
    /// Mark session cookies `Secure` (production only)
    pub secure_cookies: bool,
    /// Path to SQLite database holding search preferences
    pub db_path: PathBuf,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, String> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let bind_addr = var_or("DOCUHUB_BIND_ADDR", "127.0.0.1:3000")
            .parse()
            .map_err(|e| format!("Invalid DOCUHUB_BIND_ADDR format: {}", e))?;

        let timeout_secs: u64 = var_or("DOCUHUB_HTTP_TIMEOUT_SECS", "15")
            .parse()
            .map_err(|e| format!("Invalid DOCUHUB_HTTP_TIMEOUT_SECS: {}", e))?;

        Ok(Self {
            google_client_id: var_or("GOOGLE_CLIENT_ID", ""),
            google_client_secret: var_or("GOOGLE_CLIENT_SECRET", ""),
            google_redirect_uri: var_or(
                "GOOGLE_REDIRECT_URI",
                "http://localhost:3000/api/auth/google",
            ),
            google_auth_url: var_or(
                "DOCUHUB_GOOGLE_AUTH_URL",
                "https://accounts.google.com/o/oauth2/v2/auth",
            ),
            google_token_url: var_or(
                "DOCUHUB_GOOGLE_TOKEN_URL",
                "https://oauth2.googleapis.com/token",
            ),
            drive_api_base: var_or(
                "DOCUHUB_DRIVE_API_BASE",
                "https://www.googleapis.com/drive/v3",
            ),
            docs_api_base: var_or("DOCUHUB_DOCS_API_BASE", "https://docs.googleapis.com/v1"),
            http_timeout: Duration::from_secs(timeout_secs),
            secure_cookies: var_or("DOCUHUB_ENV", "development") == "production",
            db_path: var_or("DOCUHUB_DB_PATH", "./data/docuhub.sqlite").into(),
            bind_addr,
            log_level: var_or("DOCUHUB_LOG_LEVEL", "info"),
        })
    }

    /// Whether both OAuth client credentials are present.
    pub fn has_google_credentials(&self) -> bool {
        !self.google_client_id.is_empty() && !self.google_client_secret.is_empty()
    }
}
