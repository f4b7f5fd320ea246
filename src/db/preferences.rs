//! Search preference repository.
//!
//! Bounded lists are ordered by a monotonically increasing `seq` column; the
//! highest `seq` is the most recent entry.

use chrono::Utc;
use sqlx::{Row, SqlitePool};

use crate::errors::AppError;
use crate::models::{SavedSearch, SearchFilters, SearchPreferences};

/// Number of recent searches kept.
pub const MAX_RECENT_SEARCHES: i64 = 10;
/// Number of saved searches kept.
pub const MAX_SAVED_SEARCHES: i64 = 20;

/// Persistent store behind the search bar.
#[derive(Clone)]
pub struct PreferenceStore {
    pool: SqlitePool,
}

impl PreferenceStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Full snapshot of recent searches, saved searches and active filters.
    pub async fn get_preferences(&self) -> Result<SearchPreferences, AppError> {
        Ok(SearchPreferences {
            recent_searches: self.list_recent_searches().await?,
            saved_searches: self.list_saved_searches().await?,
            search_filters: self.get_search_filters().await?,
        })
    }

    // ==================== RECENT SEARCHES ====================

    /// Most recent first.
    pub async fn list_recent_searches(&self) -> Result<Vec<String>, AppError> {
        let rows = sqlx::query("SELECT query FROM recent_searches ORDER BY seq DESC")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.iter().map(|row| row.get("query")).collect())
    }

    /// Move `query` to the front, dropping any older duplicate and anything past the limit.
    pub async fn add_recent_search(&self, query: &str) -> Result<Vec<String>, AppError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO recent_searches (query, seq)
            VALUES (?, (SELECT COALESCE(MAX(seq), 0) + 1 FROM recent_searches))
            ON CONFLICT(query) DO UPDATE SET seq = excluded.seq
            "#,
        )
        .bind(query)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            "DELETE FROM recent_searches WHERE query NOT IN \
             (SELECT query FROM recent_searches ORDER BY seq DESC LIMIT ?)",
        )
        .bind(MAX_RECENT_SEARCHES)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        self.list_recent_searches().await
    }

    pub async fn clear_recent_searches(&self) -> Result<(), AppError> {
        sqlx::query("DELETE FROM recent_searches")
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    // ==================== SAVED SEARCHES ====================

    /// Newest first.
    pub async fn list_saved_searches(&self) -> Result<Vec<SavedSearch>, AppError> {
        let rows = sqlx::query(
            "SELECT id, query, filters, created_at FROM saved_searches ORDER BY seq DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(saved_search_from_row).collect()
    }

    /// Save a search at the front of the list, evicting the oldest past the limit.
    pub async fn add_saved_search(
        &self,
        query: &str,
        filters: &SearchFilters,
    ) -> Result<SavedSearch, AppError> {
        let saved = SavedSearch {
            id: uuid::Uuid::new_v4().to_string(),
            query: query.to_string(),
            filters: filters.clone(),
            created_at: Utc::now().to_rfc3339(),
        };
        let filters_json = serde_json::to_string(&saved.filters)?;

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO saved_searches (id, query, filters, created_at, seq)
            VALUES (?, ?, ?, ?, (SELECT COALESCE(MAX(seq), 0) + 1 FROM saved_searches))
            "#,
        )
        .bind(&saved.id)
        .bind(&saved.query)
        .bind(&filters_json)
        .bind(&saved.created_at)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            "DELETE FROM saved_searches WHERE id NOT IN \
             (SELECT id FROM saved_searches ORDER BY seq DESC LIMIT ?)",
        )
        .bind(MAX_SAVED_SEARCHES)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(saved)
    }

    /// Remove a saved search; unknown ids are ignored.
    pub async fn remove_saved_search(&self, id: &str) -> Result<(), AppError> {
        sqlx::query("DELETE FROM saved_searches WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    // ==================== ACTIVE FILTERS ====================

    pub async fn get_search_filters(&self) -> Result<SearchFilters, AppError> {
        let row = sqlx::query("SELECT filters FROM search_filters WHERE id = 1")
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => parse_filters(&row.get::<String, _>("filters")),
            None => Ok(SearchFilters::default()),
        }
    }

    /// Replace the active filters wholesale.
    pub async fn update_search_filters(
        &self,
        filters: &SearchFilters,
    ) -> Result<SearchFilters, AppError> {
        let filters_json = serde_json::to_string(filters)?;

        sqlx::query(
            r#"
            INSERT INTO search_filters (id, filters) VALUES (1, ?)
            ON CONFLICT(id) DO UPDATE SET filters = excluded.filters
            "#,
        )
        .bind(&filters_json)
        .execute(&self.pool)
        .await?;

        Ok(filters.clone())
    }
}

fn parse_filters(json: &str) -> Result<SearchFilters, AppError> {
    serde_json::from_str(json)
        .map_err(|e| AppError::Database(format!("Corrupt stored search filters: {}", e)))
}

fn saved_search_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<SavedSearch, AppError> {
    Ok(SavedSearch {
        id: row.get("id"),
        query: row.get("query"),
        filters: parse_filters(&row.get::<String, _>("filters"))?,
        created_at: row.get("created_at"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_database;
    use tempfile::TempDir;

    async fn store() -> (PreferenceStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let pool = init_database(&temp_dir.path().join("prefs.sqlite"))
            .await
            .unwrap();
        (PreferenceStore::new(pool), temp_dir)
    }

    #[tokio::test]
    async fn test_recent_searches_dedupe_and_order() {
        let (store, _dir) = store().await;

        store.add_recent_search("roadmap").await.unwrap();
        store.add_recent_search("notes").await.unwrap();
        let recent = store.add_recent_search("roadmap").await.unwrap();

        assert_eq!(recent, vec!["roadmap", "notes"]);
    }

    #[tokio::test]
    async fn test_recent_searches_capped() {
        let (store, _dir) = store().await;

        for i in 0..15 {
            store.add_recent_search(&format!("query {}", i)).await.unwrap();
        }

        let recent = store.list_recent_searches().await.unwrap();
        assert_eq!(recent.len(), MAX_RECENT_SEARCHES as usize);
        assert_eq!(recent[0], "query 14");
        assert_eq!(recent[9], "query 5");
    }

    #[tokio::test]
    async fn test_clear_recent_searches() {
        let (store, _dir) = store().await;
        store.add_recent_search("report").await.unwrap();
        store.clear_recent_searches().await.unwrap();
        assert!(store.list_recent_searches().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_saved_searches_capped_newest_first() {
        let (store, _dir) = store().await;

        for i in 0..22 {
            store
                .add_saved_search(&format!("saved {}", i), &SearchFilters::default())
                .await
                .unwrap();
        }

        let saved = store.list_saved_searches().await.unwrap();
        assert_eq!(saved.len(), MAX_SAVED_SEARCHES as usize);
        assert_eq!(saved[0].query, "saved 21");
        assert_eq!(saved[19].query, "saved 2");
    }

    #[tokio::test]
    async fn test_saved_search_keeps_filters_and_can_be_removed() {
        let (store, _dir) = store().await;
        let filters = SearchFilters {
            category: Some("reports".to_string()),
            tags: Some(vec!["urgent".to_string()]),
            ..Default::default()
        };

        let saved = store.add_saved_search("monthly", &filters).await.unwrap();
        let listed = store.list_saved_searches().await.unwrap();
        assert_eq!(listed, vec![saved.clone()]);

        store.remove_saved_search(&saved.id).await.unwrap();
        store.remove_saved_search("missing").await.unwrap();
        assert!(store.list_saved_searches().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_search_filters_overwritten_wholesale() {
        let (store, _dir) = store().await;
        assert_eq!(
            store.get_search_filters().await.unwrap(),
            SearchFilters::default()
        );

        store
            .update_search_filters(&SearchFilters {
                category: Some("proposals".to_string()),
                priority: Some("high".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        store
            .update_search_filters(&SearchFilters {
                priority: Some("low".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();

        let filters = store.get_search_filters().await.unwrap();
        assert_eq!(filters.category, None);
        assert_eq!(filters.priority.as_deref(), Some("low"));
    }
}
