//! Atom feed

use chrono::{DateTime, Utc};

use crate::config::SiteConfig;
use crate::content::Post;
use crate::helpers::{escape_xml, full_url_for};

/// Build an Atom document for `posts`, newest first
pub fn atom_feed(config: &SiteConfig, posts: &[Post], now: DateTime<Utc>) -> String {
    let home = full_url_for(config, "");
    let updated = posts
        .first()
        .map(|p| p.date.with_timezone(&Utc))
        .unwrap_or(now);

    let mut feed = String::new();
    feed.push_str(r#"<?xml version="1.0" encoding="utf-8"?>"#);
    feed.push('\n');
    feed.push_str(r#"<feed xmlns="http://www.w3.org/2005/Atom">"#);
    feed.push('\n');
    feed.push_str(&format!("  <title>{}</title>\n", escape_xml(&config.title)));
    if !config.description.is_empty() {
        feed.push_str(&format!(
            "  <subtitle>{}</subtitle>\n",
            escape_xml(&config.description)
        ));
    }
    feed.push_str(&format!(
        "  <link href=\"{}\" rel=\"self\"/>\n",
        escape_xml(&full_url_for(config, "atom.xml"))
    ));
    feed.push_str(&format!("  <link href=\"{}\"/>\n", escape_xml(&home)));
    feed.push_str(&format!("  <updated>{}</updated>\n", updated.to_rfc3339()));
    feed.push_str(&format!("  <id>{}</id>\n", escape_xml(&home)));
    feed.push_str(&format!(
        "  <author>\n    <name>{}</name>\n  </author>\n",
        escape_xml(&config.author)
    ));

    for post in posts {
        let url = escape_xml(&full_url_for(config, &post.path(&config.category)));
        feed.push_str("  <entry>\n");
        feed.push_str(&format!("    <title>{}</title>\n", escape_xml(&post.title)));
        feed.push_str(&format!("    <link href=\"{}\"/>\n", url));
        feed.push_str(&format!("    <id>{}</id>\n", url));
        feed.push_str(&format!(
            "    <published>{}</published>\n",
            post.date.to_rfc3339()
        ));
        feed.push_str(&format!("    <updated>{}</updated>\n", post.date.to_rfc3339()));
        if !post.summary.is_empty() {
            feed.push_str(&format!(
                "    <summary type=\"html\">{}</summary>\n",
                escape_xml(&post.summary)
            ));
        }
        feed.push_str(&format!(
            "    <content type=\"html\">{}</content>\n",
            escape_xml(&post.content)
        ));
        for tag in &post.tags {
            feed.push_str(&format!("    <category term=\"{}\"/>\n", escape_xml(tag)));
        }
        feed.push_str("  </entry>\n");
    }

    feed.push_str("</feed>\n");
    feed
}
