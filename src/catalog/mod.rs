//! In-memory document catalog.
//!
//! Holds fetched document lists together with the fixed category and tag
//! dictionaries. Lists are kept per viewer: every Google session gets its own
//! entry, and callers without a session share one entry holding the offline
//! list. A single instance is created at startup and shared through `AppState`.

mod classify;
pub(crate) mod dictionary;
mod query;

pub use classify::{categorize_title, smart_categorize};
pub use query::{sort_documents, suggestions, SortKey};

use query::{
    apply_filters, filter_by_category, filter_by_priority, filter_by_tag, search_documents,
};

use std::collections::HashMap;

use chrono::Utc;
use sha2::{Digest, Sha256};
use tokio::sync::RwLock;

use crate::errors::AppError;
use crate::google::GoogleClient;
use crate::models::{normalize_category_id, Category, Document, SearchFilters, Tag};

/// Number of viewer lists kept before the least recently loaded one is dropped.
pub const MAX_CATALOG_VIEWERS: usize = 64;

/// Who a document list was loaded for.
///
/// Sessions are identified by a SHA-256 digest of the access token, never the
/// token itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CatalogViewer {
    Anonymous,
    Session(String),
}

impl CatalogViewer {
    pub fn from_access_token(access_token: Option<&str>) -> Self {
        match access_token {
            Some(token) => {
                let mut hasher = Sha256::new();
                hasher.update(token.as_bytes());
                CatalogViewer::Session(hex::encode(hasher.finalize()))
            }
            None => CatalogViewer::Anonymous,
        }
    }
}

struct CatalogEntry {
    documents: Vec<Document>,
    loaded_seq: u64,
}

#[derive(Default)]
struct CatalogState {
    entries: HashMap<CatalogViewer, CatalogEntry>,
    next_seq: u64,
}

/// Document catalog shared by every request.
pub struct DocumentCatalog {
    state: RwLock<CatalogState>,
    categories: Vec<Category>,
    tags: Vec<Tag>,
}

impl Default for DocumentCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentCatalog {
    /// Create an empty catalog with the standard dictionaries.
    pub fn new() -> Self {
        Self {
            state: RwLock::new(CatalogState::default()),
            categories: dictionary::category_dictionary(),
            tags: dictionary::tag_dictionary(),
        }
    }

    /// Reload the caller's list from Google Drive, falling back to the offline
    /// list on any failure.
    ///
    /// The result replaces that viewer's list wholesale; overlapping refreshes
    /// for the same viewer resolve as last writer wins.
    pub async fn fetch_documents(
        &self,
        google: &GoogleClient,
        access_token: Option<&str>,
    ) -> Vec<Document> {
        let viewer = CatalogViewer::from_access_token(access_token);

        let fetched = match access_token {
            Some(token) => match google.list_documents(token).await {
                Ok(files) => {
                    tracing::info!("Successfully fetched documents from Google Drive");
                    Some(
                        files
                            .into_iter()
                            .map(|f| f.into_document(&self.tags))
                            .collect::<Vec<_>>(),
                    )
                }
                Err(e) => {
                    tracing::info!("Drive fetch failed, using mock data: {}", e);
                    None
                }
            },
            None => {
                tracing::info!("No Google session, using mock data");
                None
            }
        };

        let documents = fetched.unwrap_or_else(|| self.mock_documents());
        self.load(viewer, documents.clone()).await;
        documents
    }

    /// Fetch the caller's list unless one is already loaded, even an empty one.
    pub async fn ensure_loaded(
        &self,
        google: &GoogleClient,
        access_token: Option<&str>,
    ) -> CatalogViewer {
        let viewer = CatalogViewer::from_access_token(access_token);
        if !self.is_loaded(&viewer).await {
            self.fetch_documents(google, access_token).await;
        }
        viewer
    }

    /// The offline document list.
    pub fn mock_documents(&self) -> Vec<Document> {
        dictionary::mock_documents(&self.tags)
    }

    /// Replace one viewer's list directly.
    pub async fn load(&self, viewer: CatalogViewer, documents: Vec<Document>) {
        let mut state = self.state.write().await;
        let loaded_seq = state.next_seq;
        state.next_seq += 1;
        state.entries.insert(
            viewer,
            CatalogEntry {
                documents,
                loaded_seq,
            },
        );

        while state.entries.len() > MAX_CATALOG_VIEWERS {
            let oldest = state
                .entries
                .iter()
                .min_by_key(|(_, entry)| entry.loaded_seq)
                .map(|(viewer, _)| viewer.clone());
            match oldest {
                Some(viewer) => state.entries.remove(&viewer),
                None => break,
            };
        }
    }

    pub async fn is_loaded(&self, viewer: &CatalogViewer) -> bool {
        self.state.read().await.entries.contains_key(viewer)
    }

    async fn read<R>(&self, viewer: &CatalogViewer, f: impl FnOnce(&[Document]) -> R) -> R {
        let state = self.state.read().await;
        let documents = state
            .entries
            .get(viewer)
            .map(|entry| entry.documents.as_slice())
            .unwrap_or_default();
        f(documents)
    }

    pub async fn get_document(&self, viewer: &CatalogViewer, document_id: &str) -> Option<Document> {
        self.read(viewer, |docs| docs.iter().find(|d| d.id == document_id).cloned())
            .await
    }

    pub async fn search_documents(&self, viewer: &CatalogViewer, query: &str) -> Vec<Document> {
        self.read(viewer, |docs| search_documents(docs, query)).await
    }

    /// Text search narrowed by the category, priority, tag and date-range filters.
    pub async fn advanced_search(
        &self,
        viewer: &CatalogViewer,
        query: &str,
        filters: &SearchFilters,
    ) -> Vec<Document> {
        apply_filters(
            self.search_documents(viewer, query).await,
            filters,
            Utc::now(),
        )
    }

    pub async fn filter_by_category(&self, viewer: &CatalogViewer, category: &str) -> Vec<Document> {
        self.read(viewer, |docs| filter_by_category(docs, category))
            .await
    }

    pub async fn filter_by_tag(&self, viewer: &CatalogViewer, tag_id: &str) -> Vec<Document> {
        self.read(viewer, |docs| filter_by_tag(docs, tag_id)).await
    }

    pub async fn filter_by_priority(&self, viewer: &CatalogViewer, priority: &str) -> Vec<Document> {
        self.read(viewer, |docs| filter_by_priority(docs, priority))
            .await
    }

    /// Categories with counts recomputed from the viewer's documents.
    pub async fn get_categories(&self, viewer: &CatalogViewer) -> Vec<Category> {
        self.read(viewer, |docs| {
            self.categories
                .iter()
                .map(|category| Category {
                    count: docs
                        .iter()
                        .filter(|d| normalize_category_id(&d.category) == category.id)
                        .count(),
                    ..category.clone()
                })
                .collect()
        })
        .await
    }

    pub fn get_tags(&self) -> &[Tag] {
        &self.tags
    }

    /// Attach a tag; attaching a tag the document already has is a no-op.
    pub async fn add_tag(
        &self,
        viewer: &CatalogViewer,
        document_id: &str,
        tag_id: &str,
    ) -> Result<Document, AppError> {
        let tag = self
            .tags
            .iter()
            .find(|t| t.id == tag_id)
            .cloned()
            .ok_or_else(|| AppError::Validation(format!("Unknown tag {}", tag_id)))?;

        let mut state = self.state.write().await;
        let document = find_mut(&mut state, viewer, document_id)?;

        if !document.has_tag(tag_id) {
            document.tags.push(tag);
            sync_document_tags(document_id, &document.tags);
        }
        Ok(document.clone())
    }

    /// Detach a tag; removing a tag the document lacks is a no-op.
    pub async fn remove_tag(
        &self,
        viewer: &CatalogViewer,
        document_id: &str,
        tag_id: &str,
    ) -> Result<Document, AppError> {
        let mut state = self.state.write().await;
        let document = find_mut(&mut state, viewer, document_id)?;

        if document.has_tag(tag_id) {
            document.tags.retain(|t| t.id != tag_id);
            sync_document_tags(document_id, &document.tags);
        }
        Ok(document.clone())
    }

    /// Move a document into the category with the given id.
    pub async fn update_document_category(
        &self,
        viewer: &CatalogViewer,
        document_id: &str,
        category_id: &str,
    ) -> Result<Document, AppError> {
        let category = self
            .categories
            .iter()
            .find(|c| c.id == category_id)
            .ok_or_else(|| AppError::Validation(format!("Unknown category {}", category_id)))?;

        let mut state = self.state.write().await;
        let document = find_mut(&mut state, viewer, document_id)?;

        document.category = category.name.clone();
        sync_document_category(document_id, &category.name);
        Ok(document.clone())
    }
}

fn find_mut<'a>(
    state: &'a mut CatalogState,
    viewer: &CatalogViewer,
    document_id: &str,
) -> Result<&'a mut Document, AppError> {
    state
        .entries
        .get_mut(viewer)
        .and_then(|entry| entry.documents.iter_mut().find(|d| d.id == document_id))
        .ok_or_else(|| AppError::NotFound(format!("Document {} not found", document_id)))
}

// No remote store exists for tags and categories yet; these only record the change.

fn sync_document_tags(document_id: &str, tags: &[Tag]) {
    let ids: Vec<&str> = tags.iter().map(|t| t.id.as_str()).collect();
    tracing::info!("Syncing tags for document {}: {:?}", document_id, ids);
}

fn sync_document_category(document_id: &str, category: &str) {
    tracing::info!("Syncing category for document {}: {}", document_id, category);
}
