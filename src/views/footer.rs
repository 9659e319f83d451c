//! Page footer with social links and attribution

use crate::config::SiteConfig;
use crate::helpers::{html_escape, link_to, mailto};

/// Social link kinds, in display order. A separator follows `upwork`.
const CONTACT_KINDS: [&str; 3] = ["mail", "linkedin", "upwork"];
const PROFILE_KINDS: [&str; 4] = ["github", "facebook", "instagram", "youtube"];

fn social_href(config: &SiteConfig, kind: &str) -> Option<String> {
    let href = match kind {
        "mail" => return mailto(&config.email),
        "linkedin" => &config.social.linkedin,
        "upwork" => &config.social.upwork,
        "github" => &config.social.github,
        "facebook" => &config.social.facebook,
        "instagram" => &config.social.instagram,
        "youtube" => &config.social.youtube,
        _ => return None,
    };
    let href = href.trim();
    (!href.is_empty()).then(|| href.to_string())
}

fn social_icon(kind: &str, href: &str) -> String {
    let target = if href.starts_with("mailto:") {
        ""
    } else {
        r#" target="_blank" rel="noopener noreferrer""#
    };
    format!(
        r#"<a class="social-icon social-{}" href="{}"{}><span class="sr-only">{}</span></a>"#,
        kind,
        html_escape(href),
        target,
        kind
    )
}

fn icon_group(config: &SiteConfig, kinds: &[&str]) -> Vec<String> {
    kinds
        .iter()
        .filter_map(|kind| social_href(config, kind).map(|href| social_icon(kind, &href)))
        .collect()
}

/// Render the footer for `year`
pub fn render_footer(config: &SiteConfig, year: i32) -> String {
    let separator = r#"<div class="separator"> • </div>"#;

    let contacts = icon_group(config, &CONTACT_KINDS);
    let profiles = icon_group(config, &PROFILE_KINDS);

    let mut html = String::from(r#"<footer class="site-footer"><div class="social-links">"#);
    html.push_str(&contacts.concat());
    if !contacts.is_empty() && !profiles.is_empty() {
        html.push_str(separator);
    }
    html.push_str(&profiles.concat());
    html.push_str("</div>");

    let author = html_escape(&config.author);
    let author = if config.author_url.is_empty() {
        format!("<span>{}</span>", author)
    } else {
        link_to(&config.author_url, &author, Some("author-link"))
    };

    html.push_str(&format!(
        r#"<div class="attribution">{author}{separator}<div>© {year}</div>{separator}<div>{title}</div></div>"#,
        author = author,
        separator = separator,
        year = year,
        title = html_escape(&config.title),
    ));
    html.push_str("</footer>");
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helpers::strip_html;

    fn config() -> SiteConfig {
        let mut config = SiteConfig {
            title: "Lazycat Labs".to_string(),
            author: "Jane Doe".to_string(),
            author_url: "https://lazycatlabs.com".to_string(),
            email: "jane@example.com".to_string(),
            ..SiteConfig::default()
        };
        config.social.github = "https://github.com/jane".to_string();
        config.social.youtube = "https://youtube.com/@jane".to_string();
        config
    }

    #[test]
    fn test_footer_links_and_attribution() {
        let html = render_footer(&config(), 2026);
        assert!(html.contains(r#"href="mailto:jane@example.com""#));
        assert!(html.contains("social-github"));
        assert!(html.contains("social-youtube"));
        assert!(html.contains(r#"href="https://lazycatlabs.com""#));
        assert!(strip_html(&html).contains("Jane Doe • © 2026 • Lazycat Labs"));
    }

    #[test]
    fn test_footer_skips_empty_links() {
        let html = render_footer(&config(), 2026);
        assert!(!html.contains("social-linkedin"));
        assert!(!html.contains("social-facebook"));

        let bare = render_footer(&SiteConfig::default(), 2026);
        assert!(!bare.contains("social-icon"));
        assert!(!bare.contains(r#"<div class="social-links"><div class="separator">"#));
        assert!(bare.contains("<span>John Doe</span>"));
    }

    #[test]
    fn test_mail_link_stays_in_tab() {
        let html = render_footer(&config(), 2026);
        assert!(html.contains(r#"href="mailto:jane@example.com"><span"#));
    }
}
