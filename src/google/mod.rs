//! Google OAuth, Drive and Docs API client.
//!
//! Thin wrappers over single HTTP calls. Nothing here retries; callers decide
//! what a failure means.

use chrono::DateTime;
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;

use crate::catalog::{categorize_title, smart_categorize};
use crate::config::Config;
use crate::errors::AppError;
use crate::models::{Document, DocumentDetail, Tag};

/// OAuth scopes requested on the consent screen.
pub const OAUTH_SCOPES: &str = "https://www.googleapis.com/auth/documents.readonly \
https://www.googleapis.com/auth/drive.readonly \
https://www.googleapis.com/auth/userinfo.profile";

const GOOGLE_DOC_MIME_TYPE: &str = "application/vnd.google-apps.document";
const DRIVE_FILE_FIELDS: &str = "id,name,mimeType,modifiedTime,owners,permissions,webViewLink";
const DRIVE_PAGE_SIZE: &str = "50";

/// Response from Google's token endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub expires_in: Option<u64>,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TokenErrorResponse {
    #[serde(default)]
    error: Option<String>,
}

// Drive API response structures

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriveOwner {
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub email_address: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DrivePermission {
    #[serde(default)]
    pub role: String,
    #[serde(rename = "type", default)]
    pub kind: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriveFile {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub modified_time: Option<String>,
    #[serde(default)]
    pub owners: Vec<DriveOwner>,
    #[serde(default)]
    pub permissions: Vec<DrivePermission>,
    #[serde(default)]
    pub web_view_link: Option<String>,
}

impl DriveFile {
    fn owner_name(&self) -> String {
        self.owners
            .first()
            .and_then(|o| o.display_name.clone())
            .unwrap_or_else(|| "Unknown".to_string())
    }

    fn display_modified(&self) -> String {
        self.modified_time
            .as_deref()
            .map(display_date)
            .unwrap_or_default()
    }

    /// Reshape into the dashboard's flat document summary.
    ///
    /// Listings carry no body text, so the category follows the title-only
    /// listing rules of [`categorize_title`]; tags and priority come from
    /// [`smart_categorize`]. The detail view classifies again with the body.
    pub fn into_document(self, tags: &[Tag]) -> Document {
        let classification = smart_categorize(&self.name, None, tags);
        let collaborators = match self.permissions.len() {
            0 => 1,
            n => n as u32,
        };
        let is_shared = self
            .permissions
            .iter()
            .any(|p| p.kind == "user" && p.role != "owner");

        Document {
            category: categorize_title(&self.name).to_string(),
            last_modified: self.display_modified(),
            owner: Some(self.owner_name()),
            collaborators,
            is_shared,
            tags: classification.tags,
            priority: classification.priority,
            description: None,
            web_view_link: self.web_view_link,
            id: self.id,
            title: self.name,
        }
    }
}

#[derive(Debug, Deserialize)]
struct DriveFileList {
    #[serde(default)]
    files: Vec<DriveFile>,
}

// Docs API response structures

#[derive(Debug, Default, Deserialize)]
pub struct DocsDocument {
    #[serde(default)]
    body: Option<DocsBody>,
}

#[derive(Debug, Default, Deserialize)]
struct DocsBody {
    #[serde(default)]
    content: Vec<StructuralElement>,
}

#[derive(Debug, Deserialize)]
struct StructuralElement {
    #[serde(default)]
    paragraph: Option<Paragraph>,
}

#[derive(Debug, Deserialize)]
struct Paragraph {
    #[serde(default)]
    elements: Vec<ParagraphElement>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ParagraphElement {
    #[serde(default)]
    text_run: Option<TextRun>,
}

#[derive(Debug, Deserialize)]
struct TextRun {
    #[serde(default)]
    content: Option<String>,
}

impl DocsDocument {
    /// Concatenate every paragraph text run in the body.
    pub fn plain_text(&self) -> String {
        let Some(body) = &self.body else {
            return String::new();
        };

        body.content
            .iter()
            .filter_map(|element| element.paragraph.as_ref())
            .flat_map(|paragraph| paragraph.elements.iter())
            .filter_map(|el| el.text_run.as_ref()?.content.as_deref())
            .collect()
    }
}

/// Format an RFC 3339 timestamp the way the dashboard displays dates (`M/D/YYYY`).
pub fn display_date(timestamp: &str) -> String {
    match DateTime::parse_from_rfc3339(timestamp) {
        Ok(dt) => dt.format("%-m/%-d/%Y").to_string(),
        Err(_) => timestamp.to_string(),
    }
}

/// HTTP client for the Google endpoints the dashboard needs.
pub struct GoogleClient {
    client: Client,
    client_id: String,
    client_secret: String,
    redirect_uri: String,
    auth_url: String,
    token_url: String,
    drive_api_base: String,
    docs_api_base: String,
}

impl GoogleClient {
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(config.http_timeout)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            client_id: config.google_client_id.clone(),
            client_secret: config.google_client_secret.clone(),
            redirect_uri: config.google_redirect_uri.clone(),
            auth_url: config.google_auth_url.clone(),
            token_url: config.google_token_url.clone(),
            drive_api_base: config.drive_api_base.trim_end_matches('/').to_string(),
            docs_api_base: config.docs_api_base.trim_end_matches('/').to_string(),
        })
    }

    /// Consent screen URL carrying the CSRF `state`.
    pub fn authorization_url(&self, state: &str) -> Result<Url, AppError> {
        Url::parse_with_params(
            &self.auth_url,
            &[
                ("client_id", self.client_id.as_str()),
                ("redirect_uri", self.redirect_uri.as_str()),
                ("response_type", "code"),
                ("scope", OAUTH_SCOPES),
                ("access_type", "offline"),
                ("prompt", "consent"),
                ("state", state),
            ],
        )
        .map_err(|e| AppError::Internal(format!("Invalid Google auth URL: {}", e)))
    }

    /// Exchange an authorization code for tokens.
    pub async fn exchange_code(&self, code: &str) -> Result<TokenResponse, AppError> {
        let response = self
            .client
            .post(&self.token_url)
            .form(&[
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("code", code),
                ("grant_type", "authorization_code"),
                ("redirect_uri", self.redirect_uri.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let reason = response
                .json::<TokenErrorResponse>()
                .await
                .ok()
                .and_then(|e| e.error)
                .unwrap_or_else(|| "unknown".to_string());
            return Err(AppError::Upstream(format!(
                "Token exchange failed ({}): {}",
                status, reason
            )));
        }

        Ok(response.json().await?)
    }

    /// List the user's Google Docs, newest first.
    pub async fn list_documents(&self, access_token: &str) -> Result<Vec<DriveFile>, AppError> {
        let query = format!("mimeType='{}'", GOOGLE_DOC_MIME_TYPE);
        let fields = format!("files({})", DRIVE_FILE_FIELDS);

        let response = self
            .client
            .get(format!("{}/files", self.drive_api_base))
            .bearer_auth(access_token)
            .query(&[
                ("q", query.as_str()),
                ("fields", fields.as_str()),
                ("orderBy", "modifiedTime desc"),
                ("pageSize", DRIVE_PAGE_SIZE),
            ])
            .send()
            .await?;

        let response = ensure_success(response, "Drive file listing").await?;
        let list: DriveFileList = response.json().await?;

        tracing::info!("Fetched {} documents from Google Drive", list.files.len());
        Ok(list.files)
    }

    /// Fetch Docs content and Drive metadata concurrently and merge them.
    pub async fn get_document(
        &self,
        access_token: &str,
        document_id: &str,
    ) -> Result<DocumentDetail, AppError> {
        let docs_request = self
            .client
            .get(format!("{}/documents/{}", self.docs_api_base, document_id))
            .bearer_auth(access_token)
            .send();
        let drive_request = self
            .client
            .get(format!("{}/files/{}", self.drive_api_base, document_id))
            .bearer_auth(access_token)
            .query(&[("fields", DRIVE_FILE_FIELDS)])
            .send();

        let (docs_response, drive_response) = tokio::try_join!(docs_request, drive_request)?;

        let docs_response = ensure_success(docs_response, "Docs document fetch").await?;
        let drive_response = ensure_success(drive_response, "Drive file fetch").await?;

        let doc: DocsDocument = docs_response.json().await?;
        let file: DriveFile = drive_response.json().await?;

        let content = doc.plain_text();
        let classification = smart_categorize(&file.name, Some(&content), &[]);

        Ok(DocumentDetail {
            id: document_id.to_string(),
            category: classification.category,
            content,
            last_modified: file.display_modified(),
            owner: file.owner_name(),
            title: file.name,
            web_view_link: file.web_view_link,
        })
    }
}

async fn ensure_success(
    response: reqwest::Response,
    what: &str,
) -> Result<reqwest::Response, AppError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    tracing::error!("Google API error during {}: {} - {}", what, status, body);
    Err(AppError::Upstream(match status {
        StatusCode::UNAUTHORIZED => format!("{} rejected the access token", what),
        _ => format!("{} failed with status {}", what, status),
    }))
}
