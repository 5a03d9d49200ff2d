//! Term records supplied by the host.

use serde::{Deserialize, Serialize};

/// A taxonomy entry as supplied by the host's term store.
///
/// Every field defaults when missing, so an incomplete record still renders
/// (with empty derived fields) instead of failing the whole list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Term {
    /// Stable identifier.
    pub id: u64,
    pub name: String,
    pub slug: String,
    pub taxonomy: String,
    /// Description, the source of the excerpt.
    pub description: String,
    pub parent: u64,
    pub term_group: u64,
    /// Number of posts in the term.
    pub count: u64,
    pub permalink: String,
    /// URL of the term's associated image, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Term {
    /// Creates a term with the fields every list needs.
    pub fn new(id: u64, name: impl Into<String>, permalink: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            permalink: permalink.into(),
            ..Self::default()
        }
    }

    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = slug.into();
        self
    }

    pub fn with_count(mut self, count: u64) -> Self {
        self.count = count;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.image = Some(url.into());
        self
    }

    pub fn with_taxonomy(mut self, taxonomy: impl Into<String>) -> Self {
        self.taxonomy = taxonomy.into();
        self
    }
}
