//! Post summary card shared by every listing

use crate::config::SiteConfig;
use crate::content::Post;
use crate::helpers::{html_escape, url_for};

/// Render one post summary as a grid item
pub fn render_card(config: &SiteConfig, post: &Post) -> String {
    let url = url_for(config, &post.path(&config.category));

    let mut html = format!(
        r#"<li class="card" data-slug="{}"><article><a class="card-title" href="{}"><h2>{}</h2></a><time datetime="{}">{}</time>"#,
        html_escape(&post.slug),
        url,
        html_escape(&post.title),
        post.date.format("%Y-%m-%d"),
        post.date.format("%B %-d, %Y"),
    );

    if !post.summary.is_empty() {
        html.push_str(&format!(
            r#"<p class="card-summary">{}</p>"#,
            html_escape(&post.summary)
        ));
    }

    if !post.tags.is_empty() {
        html.push_str(r#"<ul class="card-tags">"#);
        for tag in &post.tags {
            html.push_str(&format!(
                r#"<li><a class="tag" href="{}">{}</a></li>"#,
                tag_url(config, tag),
                html_escape(tag)
            ));
        }
        html.push_str("</ul>");
    }

    html.push_str("</article></li>");
    html
}

/// Render a grid of cards
pub fn render_card_list(config: &SiteConfig, posts: &[&Post]) -> String {
    let mut html = r#"<ul id="post-list" class="post-grid">"#.to_string();
    for post in posts {
        html.push_str(&render_card(config, post));
    }
    html.push_str("</ul>");
    html
}

/// URL of a tag's listing page
pub fn tag_url(config: &SiteConfig, tag: &str) -> String {
    url_for(
        config,
        &format!("{}/{}/", config.tag_dir.trim_matches('/'), slug::slugify(tag)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeZone};

    #[test]
    fn test_render_card() {
        let date = Local.with_ymd_and_hms(2024, 3, 5, 0, 0, 0).unwrap();
        let post = Post::new("bloc-101", "BLoC <101>", date)
            .with_summary("Streams & sinks")
            .with_tags(["Flutter", "State Management"]);

        let html = render_card(&SiteConfig::default(), &post);
        assert!(html.contains(r#"href="/posts/bloc-101/""#));
        assert!(html.contains("BLoC &lt;101&gt;"));
        assert!(html.contains("Streams &amp; sinks"));
        assert!(html.contains("March 5, 2024"));
        assert!(html.contains(r#"href="/tags/state-management/""#));
    }

    #[test]
    fn test_card_without_summary_or_tags() {
        let date = Local.with_ymd_and_hms(2024, 3, 5, 0, 0, 0).unwrap();
        let html = render_card(&SiteConfig::default(), &Post::new("plain", "Plain", date));
        assert!(!html.contains("card-summary"));
        assert!(!html.contains("card-tags"));
    }
}
