//! Search filter and saved-search models.

use serde::{Deserialize, Serialize};

/// Optional constraints applied on top of a text query.
///
/// `"all"` for category, priority or date range means "no constraint".
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SearchFilters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_range: Option<String>,
}

/// A query plus filters the user chose to keep.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SavedSearch {
    pub id: String,
    pub query: String,
    pub filters: SearchFilters,
    pub created_at: String,
}

/// Request body for saving a search.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveSearchRequest {
    pub query: String,
    #[serde(default)]
    pub filters: Option<SearchFilters>,
}

/// Request body for recording a recent search.
#[derive(Debug, Clone, Deserialize)]
pub struct RecentSearchRequest {
    pub query: String,
}

/// Everything the search bar persists between sessions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchPreferences {
    pub recent_searches: Vec<String>,
    pub saved_searches: Vec<SavedSearch>,
    pub search_filters: SearchFilters,
}
