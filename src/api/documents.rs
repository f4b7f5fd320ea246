//! Google document endpoints.
//!
//! Both routes sit behind the session middleware and pass straight through to
//! Google; failures surface as HTTP 500.

use axum::{
    extract::{Path, State},
    http::HeaderMap,
};

use super::{success, ApiResult};
use crate::auth::access_token;
use crate::errors::AppError;
use crate::models::{Document, DocumentDetail};
use crate::AppState;

fn require_token(headers: &HeaderMap) -> Result<String, AppError> {
    access_token(headers).ok_or_else(|| AppError::Unauthenticated("Not authenticated".to_string()))
}

/// GET /api/documents - List the user's Google Docs.
pub async fn list_documents(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<Vec<Document>> {
    let token = require_token(&headers)?;

    let files = state.google.list_documents(&token).await.map_err(|e| {
        tracing::error!("Error fetching documents: {}", e);
        AppError::Upstream("Failed to fetch documents".to_string())
    })?;

    let tags = state.catalog.get_tags();
    success(files.into_iter().map(|f| f.into_document(tags)).collect())
}

/// GET /api/documents/:id - Fetch one document with its text content.
pub async fn get_document(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> ApiResult<DocumentDetail> {
    let token = require_token(&headers)?;

    match state.google.get_document(&token, &id).await {
        Ok(detail) => success(detail),
        Err(e) => {
            tracing::error!("Error fetching document {}: {}", id, e);
            Err(AppError::Upstream("Failed to fetch document".to_string()))
        }
    }
}
