//! Document model

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{markdown, FrontMatter, FrontMatterError};
use crate::helpers::date::parse_date_string;

/// A markdown document: a blog post or a singleton page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    /// Filename without its markdown extension
    pub slug: String,

    /// Parsed header block
    pub front_matter: FrontMatter,

    /// Raw markdown body after the header
    pub content: String,
}

impl Document {
    /// Create a document from its parts
    pub fn new(
        slug: impl Into<String>,
        front_matter: FrontMatter,
        content: impl Into<String>,
    ) -> Self {
        Self {
            slug: slug.into(),
            front_matter,
            content: content.into(),
        }
    }

    /// Title from front-matter, falling back to the slug
    pub fn title(&self) -> &str {
        self.front_matter.title.as_deref().unwrap_or(&self.slug)
    }

    /// Front-matter date, if present and parseable
    pub fn date(&self) -> Option<DateTime<Utc>> {
        self.front_matter
            .date
            .as_deref()
            .and_then(parse_date_string)
    }

    /// Exact, case-sensitive tag membership
    pub fn has_tag(&self, tag: &str) -> bool {
        self.front_matter.tags.iter().any(|t| t == tag)
    }

    /// Whether two documents share at least one tag
    pub fn shares_tag_with(&self, other: &Document) -> bool {
        self.front_matter.tags.iter().any(|t| other.has_tag(t))
    }

    /// Estimated reading time in whole minutes, at least one
    pub fn reading_time(&self, words_per_minute: usize) -> usize {
        let words = markdown::word_count(&self.content);
        words.div_ceil(words_per_minute.max(1)).max(1)
    }

    /// Short summary for listings.
    ///
    /// Uses the `description` key when set, then a `<!-- more -->`
    /// excerpt, then the first paragraph of the body.
    pub fn summary(&self) -> Option<String> {
        self.excerpt()
            .or_else(|| markdown::first_paragraph(&self.content))
    }

    /// Lead text set apart from the body: the `description` key, or the
    /// part before a `<!-- more -->` marker. `None` when the body would
    /// only repeat itself.
    pub fn excerpt(&self) -> Option<String> {
        if let Some(description) = &self.front_matter.description {
            return Some(description.clone());
        }
        markdown::split_excerpt(&self.content).and_then(markdown::first_paragraph)
    }

    /// Reassemble the markdown file this document was read from
    pub fn to_markdown(&self) -> Result<String, FrontMatterError> {
        Ok(format!("{}{}", self.front_matter.to_header()?, self.content))
    }
}
