//! Static category and tag dictionaries, plus the offline document list.

use crate::models::{Category, Document, Priority, Tag};

pub fn category_dictionary() -> Vec<Category> {
    vec![
        Category::new("meeting-notes", "Meeting Notes", "bg-blue-100 text-blue-800", "Calendar"),
        Category::new("proposals", "Proposals", "bg-green-100 text-green-800", "PresentationChart"),
        Category::new("reports", "Reports", "bg-purple-100 text-purple-800", "ClipboardList"),
        Category::new("technical-docs", "Technical Docs", "bg-orange-100 text-orange-800", "BookOpen"),
        Category::new("general", "General", "bg-gray-100 text-gray-800", "FileText"),
    ]
}

pub fn tag_dictionary() -> Vec<Tag> {
    vec![
        Tag::new("urgent", "Urgent", "bg-red-100 text-red-800"),
        Tag::new("draft", "Draft", "bg-yellow-100 text-yellow-800"),
        Tag::new("review", "Review", "bg-blue-100 text-blue-800"),
        Tag::new("approved", "Approved", "bg-green-100 text-green-800"),
        Tag::new("archived", "Archived", "bg-gray-100 text-gray-800"),
        Tag::new("template", "Template", "bg-purple-100 text-purple-800"),
    ]
}

/// Look up tags by id, skipping ids missing from the dictionary.
fn pick_tags(dictionary: &[Tag], ids: &[&str]) -> Vec<Tag> {
    ids.iter()
        .filter_map(|id| dictionary.iter().find(|t| t.id == *id).cloned())
        .collect()
}

/// Document list served when Google Drive cannot be reached.
pub fn mock_documents(tags: &[Tag]) -> Vec<Document> {
    let entry = |id: &str,
                 title: &str,
                 category: &str,
                 last_modified: &str,
                 collaborators: u32,
                 is_shared: bool,
                 tag_ids: &[&str],
                 priority: Priority,
                 description: &str| Document {
        id: id.to_string(),
        title: title.to_string(),
        category: category.to_string(),
        last_modified: last_modified.to_string(),
        collaborators,
        is_shared,
        web_view_link: None,
        owner: None,
        tags: pick_tags(tags, tag_ids),
        priority,
        description: Some(description.to_string()),
    };

    vec![
        entry(
            "1",
            "Q4 Marketing Strategy Meeting Notes",
            "Meeting Notes",
            "2 hours ago",
            4,
            true,
            &["review", "urgent"],
            Priority::High,
            "Strategic planning session for Q4 marketing initiatives",
        ),
        entry(
            "2",
            "Product Roadmap 2024",
            "Technical Docs",
            "1 day ago",
            8,
            true,
            &["draft"],
            Priority::Medium,
            "Comprehensive product development roadmap",
        ),
        entry(
            "3",
            "Client Proposal - Acme Corp",
            "Proposals",
            "3 days ago",
            2,
            true,
            &["approved"],
            Priority::High,
            "Project proposal for Acme Corporation partnership",
        ),
        entry(
            "4",
            "Weekly Team Standup Notes",
            "Meeting Notes",
            "5 days ago",
            6,
            true,
            &["template"],
            Priority::Low,
            "Regular team standup meeting template",
        ),
        entry(
            "5",
            "API Documentation v2.0",
            "Technical Docs",
            "1 week ago",
            3,
            false,
            &["review"],
            Priority::Medium,
            "Updated API documentation for version 2.0",
        ),
        entry(
            "6",
            "Monthly Performance Report",
            "Reports",
            "2 weeks ago",
            5,
            true,
            &["archived"],
            Priority::Low,
            "Monthly team and project performance analysis",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dictionary_sizes() {
        assert_eq!(category_dictionary().len(), 5);
        assert_eq!(tag_dictionary().len(), 6);
    }

    #[test]
    fn test_mock_documents_reference_known_tags() {
        let tags = tag_dictionary();
        let docs = mock_documents(&tags);

        let ids: Vec<&str> = docs.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3", "4", "5", "6"]);

        let first: Vec<&str> = docs[0].tags.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(first, vec!["review", "urgent"]);
        assert!(docs.iter().all(|d| d.tags.iter().all(|t| tags.contains(t))));
    }
}
