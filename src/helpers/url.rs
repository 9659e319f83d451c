//! URL helper functions

use crate::config::SiteConfig;

/// Generate a URL with the root path
///
/// # Examples
/// ```ignore
/// url_for(&config, "/posts/") // -> "/blog/posts/"
/// ```
pub fn url_for(config: &SiteConfig, path: &str) -> String {
    let root = config.root.trim_end_matches('/');
    let path = path.trim_start_matches('/');

    if path.is_empty() {
        format!("{}/", root)
    } else {
        format!("{}/{}", root, path)
    }
}

/// Generate a full URL including the domain
pub fn full_url_for(config: &SiteConfig, path: &str) -> String {
    format!(
        "{}{}",
        config.url.trim_end_matches('/'),
        url_for(config, path)
    )
}

/// Build a `mailto:` link, or nothing for an empty address
pub fn mailto(email: &str) -> Option<String> {
    let email = email.trim();
    if email.is_empty() {
        None
    } else {
        Some(format!("mailto:{}", email))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> SiteConfig {
        SiteConfig {
            url: "https://example.com/".to_string(),
            root: "/blog/".to_string(),
            ..SiteConfig::default()
        }
    }

    #[test]
    fn test_url_for() {
        let config = test_config();
        assert_eq!(url_for(&config, "/posts/"), "/blog/posts/");
        assert_eq!(url_for(&config, ""), "/blog/");
        assert_eq!(url_for(&SiteConfig::default(), "tags/rust/"), "/tags/rust/");
    }

    #[test]
    fn test_full_url_for() {
        assert_eq!(
            full_url_for(&test_config(), "/posts/hello/"),
            "https://example.com/blog/posts/hello/"
        );
    }

    #[test]
    fn test_mailto() {
        assert_eq!(mailto("me@example.com").as_deref(), Some("mailto:me@example.com"));
        assert_eq!(mailto("  "), None);
    }
}
