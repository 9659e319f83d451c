//! Homepage: latest posts with search

use super::card::render_card_list;
use super::listing::{not_found, render_heading, render_not_found};
use crate::config::SiteConfig;
use crate::content::Post;
use crate::helpers::{link_to, url_for};
use crate::search::filter_posts;

/// State of the homepage
#[derive(Debug, Clone)]
pub struct HomeView<'a> {
    posts: &'a [Post],
    max_display: usize,
    query: String,
}

impl<'a> HomeView<'a> {
    pub fn new(posts: &'a [Post], max_display: usize) -> Self {
        Self {
            posts,
            max_display,
            query: String::new(),
        }
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn filtered(&self) -> Vec<&'a Post> {
        filter_posts(&self.query, self.posts)
    }

    /// Latest `max_display` posts, or every match while searching
    pub fn displayed(&self) -> Vec<&'a Post> {
        if self.query.is_empty() {
            self.posts.iter().take(self.max_display).collect()
        } else {
            self.filtered()
        }
    }

    pub fn not_found(&self) -> Option<String> {
        not_found(&self.query, self.filtered().is_empty())
    }

    /// The "All Posts" link only appears when some posts are cut off
    pub fn shows_all_posts_link(&self) -> bool {
        self.posts.len() > self.max_display
    }

    pub fn render(&self, config: &SiteConfig) -> String {
        let mut html = String::from(r#"<section class="home">"#);
        html.push_str(&render_heading("Latest", &self.query, None));
        html.push_str(&render_not_found(&self.query, self.filtered().is_empty()));
        html.push_str(&render_card_list(config, &self.displayed()));
        if self.shows_all_posts_link() {
            html.push_str(&format!(
                r#"<div class="all-posts">{}</div>"#,
                link_to(
                    &url_for(config, &format!("{}/", config.category)),
                    "All Posts &rarr;",
                    Some("all-posts-link"),
                )
            ));
        }
        html.push_str("</section>");
        html
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Local, TimeZone};

    fn posts(count: usize) -> Vec<Post> {
        let start = Local.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        (0..count)
            .map(|i| {
                Post::new(format!("p{}", i), format!("Flutter tip {}", i), start - Duration::days(i as i64))
                    .with_tags(if i == 11 { vec!["rare"] } else { vec!["flutter"] })
            })
            .collect()
    }

    #[test]
    fn test_caps_display_without_query() {
        let all = posts(12);
        let view = HomeView::new(&all, 10);
        assert_eq!(view.displayed().len(), 10);
        assert!(view.shows_all_posts_link());
        assert!(view.render(&SiteConfig::default()).contains(r#"href="/posts/""#));
    }

    #[test]
    fn test_search_reaches_past_the_cap() {
        let all = posts(12);
        let mut view = HomeView::new(&all, 10);
        view.set_query("Rare");
        let shown = view.displayed();
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].slug, "p11");
    }

    #[test]
    fn test_no_link_when_everything_fits() {
        let all = posts(10);
        let view = HomeView::new(&all, 10);
        assert!(!view.shows_all_posts_link());
        assert!(!view.render(&SiteConfig::default()).contains("all-posts-link"));
    }

    #[test]
    fn test_not_found_message() {
        let all = posts(3);
        let mut view = HomeView::new(&all, 10);
        view.set_query("nonexistent-term-xyz");
        assert!(view.displayed().is_empty());
        assert_eq!(
            view.not_found().as_deref(),
            Some("\" nonexistent-term-xyz \" is not found")
        );
    }
}
