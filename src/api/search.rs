//! Search bar endpoints: live search plus persisted preferences.

use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    Json,
};
use serde::{Deserialize, Serialize};

use super::catalog::ensure_loaded;
use super::{success, ApiResult};
use crate::catalog::suggestions;
use crate::errors::AppError;
use crate::models::{
    Document, RecentSearchRequest, SaveSearchRequest, SavedSearch, SearchFilters,
    SearchPreferences,
};
use crate::AppState;

/// Search query parameters.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    /// Search query string.
    #[serde(default)]
    pub q: String,
}

/// Search results with completions for the typed text.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub results: Vec<Document>,
    pub total: usize,
    pub suggestions: Vec<String>,
}

/// GET /api/search - Search the catalog with the active filters and remember the query.
pub async fn search_documents(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<SearchQuery>,
) -> ApiResult<SearchResponse> {
    let query = params.q.trim();
    if query.is_empty() {
        return success(SearchResponse {
            results: Vec::new(),
            total: 0,
            suggestions: Vec::new(),
        });
    }

    let viewer = ensure_loaded(&state, &headers).await;

    let filters = state.prefs.get_search_filters().await?;
    let results = state
        .catalog
        .advanced_search(&viewer, query, &filters)
        .await;

    if let Err(e) = state.prefs.add_recent_search(query).await {
        tracing::warn!("Failed to record recent search: {}", e);
    }

    success(SearchResponse {
        total: results.len(),
        results,
        suggestions: suggestions(query),
    })
}

/// GET /api/search/preferences - Recent searches, saved searches and active filters.
pub async fn get_search_preferences(State(state): State<AppState>) -> ApiResult<SearchPreferences> {
    success(state.prefs.get_preferences().await?)
}

/// POST /api/search/recent - Record a recent search.
pub async fn add_recent_search(
    State(state): State<AppState>,
    Json(request): Json<RecentSearchRequest>,
) -> ApiResult<Vec<String>> {
    let query = request.query.trim();
    if query.is_empty() {
        return Err(AppError::Validation("Query is required".to_string()));
    }

    success(state.prefs.add_recent_search(query).await?)
}

/// DELETE /api/search/recent - Forget all recent searches.
pub async fn clear_recent_searches(State(state): State<AppState>) -> ApiResult<()> {
    state.prefs.clear_recent_searches().await?;
    success(())
}

/// POST /api/search/saved - Save a search; filters default to the active ones.
pub async fn add_saved_search(
    State(state): State<AppState>,
    Json(request): Json<SaveSearchRequest>,
) -> ApiResult<SavedSearch> {
    if request.query.trim().is_empty() {
        return Err(AppError::Validation("Query is required".to_string()));
    }

    let filters = match request.filters {
        Some(filters) => filters,
        None => state.prefs.get_search_filters().await?,
    };

    success(state.prefs.add_saved_search(&request.query, &filters).await?)
}

/// DELETE /api/search/saved/:id - Remove a saved search.
pub async fn remove_saved_search(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<()> {
    state.prefs.remove_saved_search(&id).await?;
    success(())
}

/// PUT /api/search/filters - Replace the active filters.
pub async fn update_search_filters(
    State(state): State<AppState>,
    Json(filters): Json<SearchFilters>,
) -> ApiResult<SearchFilters> {
    success(state.prefs.update_search_filters(&filters).await?)
}
