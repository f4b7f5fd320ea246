//! Tag model matching the dashboard Tag interface.

use serde::{Deserialize, Serialize};

/// A label that can be attached to documents.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Tag {
    pub id: String,
    pub name: String,
    /// Tailwind classes used by the front-end badge.
    pub color: String,
}

impl Tag {
    pub fn new(id: &str, name: &str, color: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            color: color.to_string(),
        }
    }
}
