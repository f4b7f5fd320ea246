//! Category model matching the dashboard Category interface.

use serde::{Deserialize, Serialize};

/// A fixed document classification with a live document count.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub color: String,
    pub icon: String,
    pub count: usize,
}

impl Category {
    pub fn new(id: &str, name: &str, color: &str, icon: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            color: color.to_string(),
            icon: icon.to_string(),
            count: 0,
        }
    }
}

/// Map a free-text category label to its category id.
///
/// Only the first space is replaced, so "Meeting Notes" becomes "meeting-notes".
pub fn normalize_category_id(label: &str) -> String {
    label.to_lowercase().replacen(' ', "-", 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_category_id() {
        assert_eq!(normalize_category_id("Meeting Notes"), "meeting-notes");
        assert_eq!(normalize_category_id("Technical Docs"), "technical-docs");
        assert_eq!(normalize_category_id("General"), "general");
    }

    #[test]
    fn test_normalize_replaces_first_space_only() {
        assert_eq!(normalize_category_id("Very Long Label"), "very-long label");
    }
}
