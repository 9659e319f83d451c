//! Single post page with its table of contents

use super::card::tag_url;
use super::toc::render_toc;
use crate::config::SiteConfig;
use crate::content::Post;
use crate::helpers::html_escape;

pub fn render_post(config: &SiteConfig, post: &Post) -> String {
    let mut html = String::from(r#"<div class="post-layout">"#);

    html.push_str(&format!(
        r#"<article class="post"><header><h1>{}</h1><time datetime="{}">{}</time>"#,
        html_escape(&post.title),
        post.date.format("%Y-%m-%d"),
        post.date.format("%B %-d, %Y"),
    ));

    if !post.tags.is_empty() {
        html.push_str(r#"<ul class="post-tags">"#);
        for tag in &post.tags {
            html.push_str(&format!(
                r#"<li><a class="tag" href="{}">{}</a></li>"#,
                tag_url(config, tag),
                html_escape(tag)
            ));
        }
        html.push_str("</ul>");
    }

    html.push_str(&format!(
        r#"</header><div class="post-content">{}</div></article>"#,
        post.content
    ));

    let toc = render_toc(&post.toc, None, config.toc.offset);
    if !toc.is_empty() {
        html.push_str(&format!(r#"<aside class="post-sidebar">{}</aside>"#, toc));
    }

    html.push_str("</div>");
    html
}
