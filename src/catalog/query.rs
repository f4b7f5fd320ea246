//! Search, filter and sort primitives over a document list.
//!
//! Everything here is a linear scan over a small, fully-loaded list; the
//! catalog service wraps these with its lock.

use std::cmp::Reverse;

use chrono::{DateTime, Duration, Months, NaiveDate, Utc};

use crate::models::{normalize_category_id, Document, SearchFilters};

/// Terms offered as completions in the search bar.
const COMMON_SEARCH_TERMS: [&str; 10] = [
    "meeting notes",
    "proposal",
    "report",
    "technical docs",
    "api documentation",
    "project plan",
    "strategy",
    "roadmap",
    "analysis",
    "presentation",
];

const MAX_SUGGESTIONS: usize = 5;

/// Sort orders offered by the dashboard grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Name,
    Priority,
    Modified,
    Created,
}

impl SortKey {
    /// Parse a sort key; anything unrecognized sorts by last modified.
    pub fn parse(s: Option<&str>) -> Self {
        match s {
            Some("name") => SortKey::Name,
            Some("priority") => SortKey::Priority,
            Some("created") => SortKey::Created,
            _ => SortKey::Modified,
        }
    }
}

/// Treat missing, empty and `"all"` selections as "no constraint".
fn active_selection(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty() && *v != "all")
}

fn contains_ci(haystack: &str, lower_needle: &str) -> bool {
    haystack.to_lowercase().contains(lower_needle)
}

fn matches_query(doc: &Document, lower_query: &str) -> bool {
    contains_ci(&doc.title, lower_query)
        || contains_ci(&doc.category, lower_query)
        || doc
            .description
            .as_deref()
            .is_some_and(|d| contains_ci(d, lower_query))
        || doc.tags.iter().any(|t| contains_ci(&t.name, lower_query))
        || doc
            .owner
            .as_deref()
            .is_some_and(|o| contains_ci(o, lower_query))
}

/// Case-insensitive substring search over title, category, description, tag names and owner.
///
/// A blank query returns every document unchanged.
pub fn search_documents(docs: &[Document], query: &str) -> Vec<Document> {
    if query.trim().is_empty() {
        return docs.to_vec();
    }

    let lower_query = query.to_lowercase();
    docs.iter()
        .filter(|doc| matches_query(doc, &lower_query))
        .cloned()
        .collect()
}

/// Documents whose normalized category id equals `category`; `"all"` keeps everything.
pub fn filter_by_category(docs: &[Document], category: &str) -> Vec<Document> {
    if category == "all" {
        return docs.to_vec();
    }
    docs.iter()
        .filter(|doc| normalize_category_id(&doc.category) == category)
        .cloned()
        .collect()
}

pub fn filter_by_tag(docs: &[Document], tag_id: &str) -> Vec<Document> {
    docs.iter().filter(|doc| doc.has_tag(tag_id)).cloned().collect()
}

pub fn filter_by_priority(docs: &[Document], priority: &str) -> Vec<Document> {
    docs.iter()
        .filter(|doc| doc.priority.as_str() == priority)
        .cloned()
        .collect()
}

/// Narrow search results by category, priority, tag and date-range constraints.
pub fn apply_filters(
    mut results: Vec<Document>,
    filters: &SearchFilters,
    now: DateTime<Utc>,
) -> Vec<Document> {
    if let Some(category) = active_selection(&filters.category) {
        results.retain(|doc| normalize_category_id(&doc.category) == category);
    }

    if let Some(priority) = active_selection(&filters.priority) {
        results.retain(|doc| doc.priority.as_str() == priority);
    }

    if let Some(tags) = filters.tags.as_ref().filter(|t| !t.is_empty()) {
        results.retain(|doc| tags.iter().any(|tag_id| doc.has_tag(tag_id)));
    }

    if let Some(start) = active_selection(&filters.date_range).and_then(|r| range_start(r, now)) {
        // Documents without a parseable timestamp are kept.
        results.retain(|doc| modified_at(&doc.last_modified, now).map_or(true, |at| at >= start));
    }

    results
}

/// Earliest instant included by a named date range.
pub fn range_start(range: &str, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    match range {
        "today" => now.date_naive().and_hms_opt(0, 0, 0).map(|t| t.and_utc()),
        "week" => Some(now - Duration::days(7)),
        "month" => now.checked_sub_months(Months::new(1)),
        "quarter" => now.checked_sub_months(Months::new(3)),
        _ => None,
    }
}

/// Interpret a `lastModified` display string as an instant.
///
/// Understands RFC 3339, `M/D/YYYY`, `YYYY-MM-DD` and relative ages such as
/// "2 hours ago" or "1 week ago". Returns `None` for anything else.
pub fn modified_at(display: &str, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    let s = display.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in ["%m/%d/%Y", "%Y-%m-%d"] {
        if let Ok(date) = NaiveDate::parse_from_str(s, format) {
            return date.and_hms_opt(0, 0, 0).map(|t| t.and_utc());
        }
    }

    relative_age(s).and_then(|age| now.checked_sub_signed(age))
}

fn relative_age(s: &str) -> Option<Duration> {
    let lower = s.to_lowercase();
    match lower.as_str() {
        "just now" | "today" => return Some(Duration::zero()),
        "yesterday" => return Some(Duration::days(1)),
        _ => {}
    }

    let parts: Vec<&str> = lower.split_whitespace().collect();
    let [amount, unit, "ago"] = parts.as_slice() else {
        return None;
    };

    let amount: i32 = match *amount {
        "a" | "an" => 1,
        n => n.parse().ok()?,
    };

    let unit_duration = match unit.trim_end_matches('s') {
        "second" => Duration::seconds(1),
        "minute" => Duration::minutes(1),
        "hour" => Duration::hours(1),
        "day" => Duration::days(1),
        "week" => Duration::weeks(1),
        "month" => Duration::days(30),
        "year" => Duration::days(365),
        _ => return None,
    };

    unit_duration.checked_mul(amount)
}

/// Sort in place using one of the dashboard's orders.
///
/// `Modified` and `Created` both order by `lastModified`, newest first; there
/// is no separate creation timestamp. Undated documents keep their relative
/// order after all dated ones.
pub fn sort_documents(docs: &mut [Document], key: SortKey, now: DateTime<Utc>) {
    match key {
        SortKey::Name => docs.sort_by(|a, b| {
            a.title
                .to_lowercase()
                .cmp(&b.title.to_lowercase())
                .then_with(|| a.title.cmp(&b.title))
        }),
        SortKey::Priority => docs.sort_by_key(|doc| Reverse(doc.priority.rank())),
        SortKey::Modified | SortKey::Created => {
            docs.sort_by_cached_key(|doc| Reverse(modified_at(&doc.last_modified, now)))
        }
    }
}

/// Up to five common search terms containing `query`.
pub fn suggestions(query: &str) -> Vec<String> {
    if query.trim().is_empty() {
        return Vec::new();
    }

    let lower_query = query.to_lowercase();
    COMMON_SEARCH_TERMS
        .iter()
        .filter(|term| term.contains(&lower_query))
        .take(MAX_SUGGESTIONS)
        .map(|term| term.to_string())
        .collect()
}
