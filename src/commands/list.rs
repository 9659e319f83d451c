//! List site content

use anyhow::Result;
use std::collections::HashMap;
use std::fmt::Write;

use crate::content::loader::ContentLoader;
use crate::content::Post;
use crate::Folio;

/// List site content by type
pub fn run(folio: &Folio, content_type: &str) -> Result<()> {
    let posts = ContentLoader::new(folio).load_posts()?;
    print!("{}", render(&posts, content_type)?);
    Ok(())
}

/// Text listing of `posts` by type
pub fn render(posts: &[Post], content_type: &str) -> Result<String> {
    let mut out = String::new();

    match content_type {
        "post" | "posts" => {
            writeln!(out, "Posts ({}):", posts.len())?;
            for post in posts {
                writeln!(
                    out,
                    "  {} - {} [{}]",
                    post.date.format("%Y-%m-%d"),
                    post.title,
                    post.source.display()
                )?;
            }
        }
        "tag" | "tags" => {
            let mut counts: HashMap<&str, usize> = HashMap::new();
            for post in posts {
                for tag in &post.tags {
                    *counts.entry(tag.as_str()).or_insert(0) += 1;
                }
            }
            let mut tags: Vec<_> = counts.into_iter().collect();
            tags.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

            writeln!(out, "Tags ({}):", tags.len())?;
            for (tag, count) in tags {
                writeln!(out, "  {} ({})", tag, count)?;
            }
        }
        _ => {
            anyhow::bail!("Unknown type: {}. Available: post, tag", content_type);
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeZone};

    fn posts() -> Vec<Post> {
        let date = Local.with_ymd_and_hms(2024, 4, 1, 0, 0, 0).unwrap();
        vec![
            Post::new("a", "Alpha", date).with_tags(["rust", "cli"]),
            Post::new("b", "Beta", date).with_tags(["rust"]),
        ]
    }

    #[test]
    fn test_list_posts() {
        let out = render(&posts(), "post").unwrap();
        assert!(out.starts_with("Posts (2):\n"));
        assert!(out.contains("  2024-04-01 - Alpha ["));
    }

    #[test]
    fn test_list_tags_by_count() {
        let out = render(&posts(), "tags").unwrap();
        assert_eq!(out, "Tags (2):\n  rust (2)\n  cli (1)\n");
    }

    #[test]
    fn test_unknown_type() {
        assert!(render(&posts(), "category").is_err());
    }
}
