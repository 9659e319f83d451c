//! Title, summary and tag search over loaded posts

use serde::Serialize;

use crate::config::SiteConfig;
use crate::content::Post;
use crate::helpers::url_for;
use crate::views::tag_url;

/// Text a query is matched against: title, summary and space-joined tags
pub fn haystack(post: &Post) -> String {
    format!("{}{}{}", post.title, post.summary, post.tags.join(" "))
}

/// Posts whose searchable text contains `query`, ignoring case.
///
/// An empty query keeps every post. Order is preserved and the input is
/// never modified.
pub fn filter_posts<'a>(query: &str, posts: &'a [Post]) -> Vec<&'a Post> {
    let needle = query.to_lowercase();
    posts
        .iter()
        .filter(|post| needle.is_empty() || haystack(post).to_lowercase().contains(&needle))
        .collect()
}

/// Message shown when a query matches nothing
pub fn not_found_message(query: &str) -> String {
    format!("\" {} \" is not found", query)
}

/// Tag of a search record, with the link its card shows
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchTag {
    pub name: String,
    pub slug: String,
    pub url: String,
}

/// One record of the `search.json` index consumed by the browser.
///
/// Carries everything the browser needs to rebuild a card exactly as
/// `views::render_card` draws it.
#[derive(Debug, Clone, Serialize)]
pub struct SearchEntry {
    pub slug: String,
    pub title: String,
    pub summary: String,
    pub tags: Vec<SearchTag>,
    /// ISO date for the `datetime` attribute
    pub date: String,
    /// Human-readable date, e.g. "March 5, 2024"
    pub display_date: String,
    pub url: String,
}

/// Search index written alongside the generated pages
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct SearchIndex {
    pub entries: Vec<SearchEntry>,
}

impl SearchIndex {
    pub fn build(config: &SiteConfig, posts: &[Post]) -> Self {
        let entries = posts
            .iter()
            .map(|p| SearchEntry {
                slug: p.slug.clone(),
                title: p.title.clone(),
                summary: p.summary.clone(),
                tags: p
                    .tags
                    .iter()
                    .map(|tag| SearchTag {
                        name: tag.clone(),
                        slug: slug::slugify(tag),
                        url: tag_url(config, tag),
                    })
                    .collect(),
                date: p.date.format("%Y-%m-%d").to_string(),
                display_date: p.date.format("%B %-d, %Y").to_string(),
                url: url_for(config, &p.path(&config.category)),
            })
            .collect();
        Self { entries }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
