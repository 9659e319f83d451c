//! Post model

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A heading listed in a post's table of contents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TocEntry {
    /// Anchor id of the heading
    pub id: String,
    /// Plain heading text
    pub title: String,
    /// Heading level (2 for `##`)
    pub level: u8,
}

impl TocEntry {
    pub fn new(id: impl Into<String>, title: impl Into<String>, level: u8) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            level,
        }
    }
}

/// A blog post. Never mutated once loaded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    /// Unique, URL-safe identifier; list key and route segment
    pub slug: String,

    /// Post title
    pub title: String,

    /// Short summary shown on cards and searched
    pub summary: String,

    /// Tags in front-matter order
    pub tags: Vec<String>,

    /// Publication date
    pub date: DateTime<Local>,

    /// Rendered HTML content
    pub content: String,

    /// Headings for the table of contents
    pub toc: Vec<TocEntry>,

    /// Drafts are loaded but never published
    pub draft: bool,

    /// Source file path relative to the source directory
    pub source: PathBuf,
}

impl Post {
    /// Create a post with only the listing fields set
    pub fn new(slug: impl Into<String>, title: impl Into<String>, date: DateTime<Local>) -> Self {
        Self {
            slug: slug.into(),
            title: title.into(),
            summary: String::new(),
            tags: Vec::new(),
            date,
            content: String::new(),
            toc: Vec::new(),
            draft: false,
            source: PathBuf::new(),
        }
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Route path of the post relative to the site root
    pub fn path(&self, category: &str) -> String {
        format!("{}/{}/", category.trim_matches('/'), self.slug)
    }
}
