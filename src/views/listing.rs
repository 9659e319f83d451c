//! Searchable, paginated grid of posts (the posts index)

use super::card::render_card_list;
use crate::config::SiteConfig;
use crate::content::Post;
use crate::helpers::{html_escape, url_for};
use crate::pagination::{page_path, Pagination};
use crate::search::filter_posts;

/// State of a posts listing page
#[derive(Debug, Clone)]
pub struct ListingView<'a> {
    title: String,
    posts: &'a [Post],
    initial_display_posts: &'a [Post],
    pagination: Option<Pagination>,
    tag: Option<String>,
    query: String,
}

impl<'a> ListingView<'a> {
    pub fn new(title: impl Into<String>, posts: &'a [Post]) -> Self {
        Self {
            title: title.into(),
            posts,
            initial_display_posts: &[],
            pagination: None,
            tag: None,
            query: String::new(),
        }
    }

    /// Precomputed first render, shown while no query is active
    pub fn with_initial_display(mut self, posts: &'a [Post]) -> Self {
        self.initial_display_posts = posts;
        self
    }

    pub fn with_pagination(mut self, pagination: Pagination) -> Self {
        self.pagination = Some(pagination);
        self
    }

    /// Restrict browser-side search to posts carrying the tag with `slug`
    pub fn with_tag(mut self, slug: impl Into<String>) -> Self {
        self.tag = Some(slug.into());
        self
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Posts matching the current query
    pub fn filtered(&self) -> Vec<&'a Post> {
        filter_posts(&self.query, self.posts)
    }

    /// Posts to show: the initial page while idle, every match while searching
    pub fn displayed(&self) -> Vec<&'a Post> {
        if !self.initial_display_posts.is_empty() && self.query.is_empty() {
            self.initial_display_posts.iter().collect()
        } else {
            self.filtered()
        }
    }

    /// Not-found message when the query matches nothing
    pub fn not_found(&self) -> Option<String> {
        not_found(&self.query, self.filtered().is_empty())
    }

    /// Pagination controls, hidden while searching or for a single page
    pub fn visible_pagination(&self) -> Option<Pagination> {
        self.pagination
            .filter(|p| p.total_pages > 1 && self.query.is_empty())
    }

    /// Render the listing body; `base_path` is the route of page 1
    pub fn render(&self, config: &SiteConfig, base_path: &str) -> String {
        let mut html = String::from(r#"<section class="listing">"#);
        html.push_str(&render_heading(&self.title, &self.query, self.tag.as_deref()));
        html.push_str(&render_not_found(&self.query, self.filtered().is_empty()));
        html.push_str(&render_card_list(config, &self.displayed()));
        if let Some(pagination) = self.visible_pagination() {
            html.push_str(&render_pagination(config, &pagination, base_path));
        }
        html.push_str("</section>");
        html
    }
}

pub(super) fn not_found(query: &str, no_results: bool) -> Option<String> {
    no_results.then(|| crate::search::not_found_message(query))
}

/// Title plus the search box; `tag` limits the search to one tag's posts
pub(super) fn render_heading(title: &str, query: &str, tag: Option<&str>) -> String {
    let scope = tag
        .map(|slug| format!(r#" data-tag="{}""#, html_escape(slug)))
        .unwrap_or_default();
    format!(
        r#"<header class="listing-header"><h1>{}</h1><input id="search" type="text" aria-label="Search articles" placeholder="Search articles"{} value="{}"></header>"#,
        html_escape(title),
        scope,
        html_escape(query)
    )
}

/// Not-found banner; rendered hidden when there are results so the browser
/// script can reveal it
pub(super) fn render_not_found(query: &str, no_results: bool) -> String {
    format!(
        r#"<div id="not-found" class="not-found"{}><span class="query">" {} "</span><span> is not found</span></div>"#,
        if no_results { "" } else { " hidden" },
        html_escape(query)
    )
}

/// Previous / "N of M" / next controls
pub fn render_pagination(config: &SiteConfig, pagination: &Pagination, base_path: &str) -> String {
    let mut html = String::from(r#"<nav id="pagination" class="pagination">"#);

    if pagination.has_prev() {
        html.push_str(&format!(
            r#"<a class="pagination-prev" rel="previous" href="{}">Previous</a>"#,
            url_for(config, &page_path(base_path, pagination.current_page - 1))
        ));
    } else {
        html.push_str(r#"<span class="pagination-prev disabled">Previous</span>"#);
    }

    html.push_str(&format!(
        r#"<span class="pagination-current">{} of {}</span>"#,
        pagination.current_page, pagination.total_pages
    ));

    if pagination.has_next() {
        html.push_str(&format!(
            r#"<a class="pagination-next" rel="next" href="{}">Next</a>"#,
            url_for(config, &page_path(base_path, pagination.current_page + 1))
        ));
    } else {
        html.push_str(r#"<span class="pagination-next disabled">Next</span>"#);
    }

    html.push_str("</nav>");
    html
}
