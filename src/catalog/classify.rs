//! Keyword heuristics that guess a category, tags and priority for a document.

use crate::models::{Priority, Tag};

/// Result of [`smart_categorize`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub category: String,
    pub tags: Vec<Tag>,
    pub priority: Priority,
}

fn contains_any(text: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| text.contains(n))
}

/// Category label for a Drive listing, based on the title alone.
pub fn categorize_title(title: &str) -> &'static str {
    let lower = title.to_lowercase();

    if contains_any(&lower, &["meeting", "standup", "notes"]) {
        "Meeting Notes"
    } else if contains_any(&lower, &["proposal", "pitch"]) {
        "Proposals"
    } else if contains_any(&lower, &["report", "analysis"]) {
        "Reports"
    } else if contains_any(&lower, &["api", "technical", "doc"]) {
        "Technical Docs"
    } else {
        "General"
    }
}

/// Guess category, tags and priority from a title and optional body text.
pub fn smart_categorize(title: &str, content: Option<&str>, tags: &[Tag]) -> Classification {
    let text = format!(
        "{} {}",
        title.to_lowercase(),
        content.map(str::to_lowercase).unwrap_or_default()
    );

    let category = if contains_any(&text, &["meeting", "standup", "notes"]) {
        "Meeting Notes"
    } else if contains_any(&text, &["proposal", "pitch", "rfp"]) {
        "Proposals"
    } else if contains_any(&text, &["report", "analysis", "summary"]) {
        "Reports"
    } else if contains_any(&text, &["api", "technical", "documentation", "spec"]) {
        "Technical Docs"
    } else {
        "General"
    };

    let mut matched: Vec<&str> = Vec::new();
    let mut priority = Priority::Medium;

    if contains_any(&text, &["urgent", "asap", "priority"]) {
        matched.push("urgent");
        priority = Priority::High;
    }
    if contains_any(&text, &["draft", "wip", "work in progress"]) {
        matched.push("draft");
    }
    if contains_any(&text, &["review", "feedback"]) {
        matched.push("review");
    }
    if contains_any(&text, &["template", "boilerplate"]) {
        matched.push("template");
    }

    let tags = matched
        .into_iter()
        .filter_map(|id| tags.iter().find(|t| t.id == id).cloned())
        .collect();

    Classification {
        category: category.to_string(),
        tags,
        priority,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::dictionary::tag_dictionary;

    #[test]
    fn test_categorize_title() {
        assert_eq!(categorize_title("Weekly Standup"), "Meeting Notes");
        assert_eq!(categorize_title("Sales Pitch Deck"), "Proposals");
        assert_eq!(categorize_title("Churn Analysis"), "Reports");
        assert_eq!(categorize_title("Design doc: billing"), "Technical Docs");
        assert_eq!(categorize_title("Holiday plans"), "General");
    }

    #[test]
    fn test_categorize_title_checks_meeting_first() {
        assert_eq!(categorize_title("Proposal review meeting"), "Meeting Notes");
    }

    #[test]
    fn test_smart_categorize_tags_and_priority() {
        let tags = tag_dictionary();
        let result = smart_categorize("URGENT: RFP draft for review", None, &tags);

        assert_eq!(result.category, "Proposals");
        assert_eq!(result.priority, Priority::High);
        let ids: Vec<&str> = result.tags.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["urgent", "draft", "review"]);
    }

    #[test]
    fn test_smart_categorize_uses_content() {
        let tags = tag_dictionary();
        let result = smart_categorize(
            "Untitled",
            Some("Boilerplate for the API specification"),
            &tags,
        );

        assert_eq!(result.category, "Technical Docs");
        assert_eq!(result.priority, Priority::Medium);
        assert_eq!(result.tags.len(), 1);
        assert_eq!(result.tags[0].id, "template");
    }

    #[test]
    fn test_smart_categorize_defaults() {
        let result = smart_categorize("Holiday plans", None, &tag_dictionary());
        assert_eq!(result.category, "General");
        assert!(result.tags.is_empty());
        assert_eq!(result.priority, Priority::Medium);
    }
}
