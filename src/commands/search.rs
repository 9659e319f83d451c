//! Search posts from the command line

use anyhow::Result;

use crate::content::loader::ContentLoader;
use crate::content::Post;
use crate::search::{filter_posts, not_found_message};
use crate::Folio;

pub fn run(folio: &Folio, query: &str) -> Result<()> {
    let posts = ContentLoader::new(folio).load_posts()?;
    println!("{}", render(&posts, query));
    Ok(())
}

/// Matching posts one per line, or the not-found message
pub fn render(posts: &[Post], query: &str) -> String {
    let matches = filter_posts(query, posts);
    if matches.is_empty() {
        return not_found_message(query);
    }
    matches
        .iter()
        .map(|p| format!("{} - {} ({})", p.date.format("%Y-%m-%d"), p.title, p.slug))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeZone};

    fn posts() -> Vec<Post> {
        let date = Local.with_ymd_and_hms(2024, 4, 1, 0, 0, 0).unwrap();
        vec![
            Post::new("bloc", "BLoC Pattern", date).with_summary("Streams"),
            Post::new("riverpod", "Riverpod", date).with_tags(["state"]),
        ]
    }

    #[test]
    fn test_render_matches() {
        assert_eq!(render(&posts(), "STATE"), "2024-04-01 - Riverpod (riverpod)");
        assert_eq!(render(&posts(), "").lines().count(), 2);
    }

    #[test]
    fn test_render_not_found() {
        assert_eq!(render(&posts(), "xyz"), "\" xyz \" is not found");
    }
}
