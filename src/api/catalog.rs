//! Document catalog endpoints.

use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    Json,
};
use chrono::Utc;
use serde::Deserialize;

use super::{success, ApiResult};
use crate::auth::access_token;
use crate::catalog::{sort_documents, suggestions, CatalogViewer, SortKey};
use crate::errors::AppError;
use crate::models::{Category, Document, Priority, SearchFilters, Tag, UpdateCategoryRequest};
use crate::AppState;

/// Catalog listing query parameters.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogQuery {
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
    /// Comma-separated tag ids.
    #[serde(default)]
    pub tags: Option<String>,
    #[serde(default)]
    pub date_range: Option<String>,
    #[serde(default)]
    pub sort: Option<String>,
}

impl CatalogQuery {
    fn filters(&self) -> SearchFilters {
        let tags = self.tags.as_deref().map(|t| {
            t.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect::<Vec<_>>()
        });

        SearchFilters {
            category: self.category.clone(),
            priority: self.priority.clone(),
            tags,
            date_range: self.date_range.clone(),
        }
    }
}

/// Suggestion query parameters.
#[derive(Debug, Deserialize)]
pub struct SuggestionQuery {
    #[serde(default)]
    pub q: String,
}

/// Load the caller's catalog on first use, the way the dashboard loads on mount.
pub(crate) async fn ensure_loaded(state: &AppState, headers: &HeaderMap) -> CatalogViewer {
    let token = access_token(headers);
    state
        .catalog
        .ensure_loaded(&state.google, token.as_deref())
        .await
}

/// POST /api/catalog/refresh - Reload the caller's documents from Google Drive (or mock data).
pub async fn refresh_catalog(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<Vec<Document>> {
    let token = access_token(&headers);
    let documents = state
        .catalog
        .fetch_documents(&state.google, token.as_deref())
        .await;
    success(documents)
}

/// GET /api/catalog/documents - Search, filter and sort the catalog.
pub async fn list_catalog_documents(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<CatalogQuery>,
) -> ApiResult<Vec<Document>> {
    let viewer = ensure_loaded(&state, &headers).await;

    let query = params.q.as_deref().unwrap_or_default();
    let mut documents = state
        .catalog
        .advanced_search(&viewer, query, &params.filters())
        .await;
    sort_documents(
        &mut documents,
        SortKey::parse(params.sort.as_deref()),
        Utc::now(),
    );

    success(documents)
}

/// GET /api/catalog/documents/:id - Get a single catalog entry.
pub async fn get_catalog_document(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> ApiResult<Document> {
    let viewer = ensure_loaded(&state, &headers).await;

    match state.catalog.get_document(&viewer, &id).await {
        Some(document) => success(document),
        None => Err(AppError::NotFound(format!("Document {} not found", id))),
    }
}

/// PUT /api/catalog/documents/:id/tags/:tag_id - Attach a tag.
pub async fn add_document_tag(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((id, tag_id)): Path<(String, String)>,
) -> ApiResult<Document> {
    let viewer = ensure_loaded(&state, &headers).await;
    let document = state.catalog.add_tag(&viewer, &id, &tag_id).await?;
    success(document)
}

/// DELETE /api/catalog/documents/:id/tags/:tag_id - Detach a tag.
pub async fn remove_document_tag(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((id, tag_id)): Path<(String, String)>,
) -> ApiResult<Document> {
    let viewer = ensure_loaded(&state, &headers).await;
    let document = state.catalog.remove_tag(&viewer, &id, &tag_id).await?;
    success(document)
}

/// PUT /api/catalog/documents/:id/category - Move a document to another category.
pub async fn update_document_category(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(request): Json<UpdateCategoryRequest>,
) -> ApiResult<Document> {
    if request.category_id.trim().is_empty() {
        return Err(AppError::Validation("Category id is required".to_string()));
    }

    let viewer = ensure_loaded(&state, &headers).await;
    let document = state
        .catalog
        .update_document_category(&viewer, &id, &request.category_id)
        .await?;
    success(document)
}

/// GET /api/catalog/categories - List categories with live counts.
pub async fn list_categories(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<Vec<Category>> {
    let viewer = ensure_loaded(&state, &headers).await;
    success(state.catalog.get_categories(&viewer).await)
}

/// GET /api/catalog/categories/:id/documents - Documents in one category.
pub async fn category_documents(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(category): Path<String>,
) -> ApiResult<Vec<Document>> {
    let viewer = ensure_loaded(&state, &headers).await;
    success(state.catalog.filter_by_category(&viewer, &category).await)
}

/// GET /api/catalog/tags - List the tag dictionary.
pub async fn list_tags(State(state): State<AppState>) -> ApiResult<Vec<Tag>> {
    success(state.catalog.get_tags().to_vec())
}

/// GET /api/catalog/tags/:id/documents - Documents carrying one tag.
pub async fn tag_documents(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(tag_id): Path<String>,
) -> ApiResult<Vec<Document>> {
    let viewer = ensure_loaded(&state, &headers).await;
    success(state.catalog.filter_by_tag(&viewer, &tag_id).await)
}

/// GET /api/catalog/priorities/:priority/documents - Documents at one priority.
pub async fn priority_documents(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(priority): Path<String>,
) -> ApiResult<Vec<Document>> {
    let Some(priority) = Priority::parse(&priority) else {
        return Err(AppError::Validation(format!(
            "Priority must be low, medium or high, got {}",
            priority
        )));
    };

    let viewer = ensure_loaded(&state, &headers).await;
    success(
        state
            .catalog
            .filter_by_priority(&viewer, priority.as_str())
            .await,
    )
}

/// GET /api/catalog/suggestions - Completion terms for the search bar.
pub async fn search_suggestions(Query(params): Query<SuggestionQuery>) -> ApiResult<Vec<String>> {
    success(suggestions(&params.q))
}
