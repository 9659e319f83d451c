//! Content loader - loads posts of a category from the source directory

use anyhow::Result;
use chrono::Local;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use super::{ContentError, FrontMatter, MarkdownRenderer, Post};
use crate::Folio;

/// Loads content from the source directory
pub struct ContentLoader<'a> {
    folio: &'a Folio,
    renderer: MarkdownRenderer,
    include_drafts: bool,
}

impl<'a> ContentLoader<'a> {
    /// Create a new content loader
    pub fn new(folio: &'a Folio) -> Self {
        let renderer = MarkdownRenderer::with_options(
            &folio.config.highlight.theme,
            folio.config.highlight.line_number,
            folio.config.toc.max_depth,
        );
        Self {
            folio,
            renderer,
            include_drafts: false,
        }
    }

    /// Keep posts marked `draft: true`
    pub fn include_drafts(mut self, include: bool) -> Self {
        self.include_drafts = include;
        self
    }

    /// Load the configured category
    pub fn load_posts(&self) -> Result<Vec<Post>> {
        self.load_category(&self.folio.config.category)
    }

    /// Load every post under `<source_dir>/<category>`, newest first
    pub fn load_category(&self, category: &str) -> Result<Vec<Post>> {
        let dir = self.folio.source_dir.join(category);
        if !dir.exists() {
            tracing::debug!("Content directory {:?} does not exist", dir);
            return Ok(Vec::new());
        }

        let mut posts = Vec::new();

        for entry in WalkDir::new(&dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() || !is_markdown_file(path) {
                continue;
            }
            match self.load_post(path) {
                Ok(post) if post.draft && !self.include_drafts => {
                    tracing::debug!("Skipping draft {:?}", path);
                }
                Ok(post) => posts.push(post),
                Err(e) => tracing::warn!("Failed to load post {:?}: {}", path, e),
            }
        }

        ensure_unique_slugs(&posts)?;

        // Newest first; ties keep a stable order by slug
        posts.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.slug.cmp(&b.slug)));

        Ok(posts)
    }

    /// Load a single post from a file
    fn load_post(&self, path: &Path) -> Result<Post> {
        let content = fs::read_to_string(path)?;
        let (fm, body) = FrontMatter::parse(&content);

        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("untitled");

        let date = match fm.parse_date() {
            Some(date) => date,
            None => fs::metadata(path)?
                .modified()
                .map(chrono::DateTime::<Local>::from)
                .unwrap_or_else(|_| Local::now()),
        };

        let slug = fm
            .slug
            .as_deref()
            .map(slug::slugify)
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| slug::slugify(stem));

        let rendered = self.renderer.render(body)?;

        let mut post = Post::new(slug, fm.title.unwrap_or_else(|| stem.to_string()), date)
            .with_summary(fm.summary.unwrap_or_default())
            .with_tags(fm.tags);
        post.content = rendered.html;
        post.toc = rendered.toc;
        post.draft = fm.draft;
        post.source = path
            .strip_prefix(&self.folio.source_dir)
            .unwrap_or(path)
            .to_path_buf();

        Ok(post)
    }
}

/// Check that no two posts share a slug
pub fn ensure_unique_slugs(posts: &[Post]) -> Result<(), ContentError> {
    let mut seen: HashMap<&str, &Post> = HashMap::new();
    for post in posts {
        if let Some(first) = seen.insert(&post.slug, post) {
            return Err(ContentError::DuplicateSlug {
                slug: post.slug.clone(),
                first: first.source.clone(),
                second: post.source.clone(),
            });
        }
    }
    Ok(())
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "markdown")
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;

    fn site_with_posts(files: &[(&str, &str)]) -> (tempfile::TempDir, Folio) {
        let dir = tempfile::tempdir().unwrap();
        let posts_dir = dir.path().join("data/posts");
        fs::create_dir_all(&posts_dir).unwrap();
        for (name, content) in files {
            fs::write(posts_dir.join(name), content).unwrap();
        }
        let folio = Folio::with_config(dir.path().to_path_buf(), SiteConfig::default());
        (dir, folio)
    }

    #[test]
    fn test_load_posts_sorted_newest_first() {
        let (_dir, folio) = site_with_posts(&[
            (
                "older.md",
                "---\ntitle: Older\ndate: 2023-01-01\ntags: [rust]\n---\nOld body",
            ),
            (
                "newer.md",
                "---\ntitle: Newer\ndate: 2024-03-01\nsummary: Fresh\n---\n## Intro\nNew body",
            ),
            ("notes.txt", "not a post"),
        ]);

        let posts = ContentLoader::new(&folio).load_posts().unwrap();
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].slug, "newer");
        assert_eq!(posts[0].summary, "Fresh");
        assert_eq!(posts[0].toc.len(), 1);
        assert_eq!(posts[1].slug, "older");
        assert_eq!(posts[1].tags, vec!["rust"]);
        assert_eq!(posts[1].summary, "");
        assert_eq!(posts[1].source, Path::new("posts/older.md"));
    }

    #[test]
    fn test_front_matter_slug_wins() {
        let (_dir, folio) = site_with_posts(&[(
            "2024-01-01-file-name.md",
            "---\ntitle: Custom\nslug: My Custom Slug\ndate: 2024-01-01\n---\nbody",
        )]);
        let posts = ContentLoader::new(&folio).load_posts().unwrap();
        assert_eq!(posts[0].slug, "my-custom-slug");
    }

    #[test]
    fn test_drafts_are_skipped_by_default() {
        let (_dir, folio) = site_with_posts(&[
            ("a.md", "---\ntitle: A\ndate: 2024-01-01\ndraft: true\n---\n"),
            ("b.md", "---\ntitle: B\ndate: 2024-01-02\n---\n"),
        ]);
        let posts = ContentLoader::new(&folio).load_posts().unwrap();
        assert_eq!(posts.len(), 1);

        let posts = ContentLoader::new(&folio)
            .include_drafts(true)
            .load_posts()
            .unwrap();
        assert_eq!(posts.len(), 2);
    }

    #[test]
    fn test_duplicate_slugs_are_rejected() {
        let (_dir, folio) = site_with_posts(&[
            ("a.md", "---\ntitle: A\nslug: same\ndate: 2024-01-01\n---\n"),
            ("b.md", "---\ntitle: B\nslug: same\ndate: 2024-01-02\n---\n"),
        ]);
        let err = ContentLoader::new(&folio).load_posts().unwrap_err();
        let err = err.downcast::<ContentError>().unwrap();
        assert!(matches!(err, ContentError::DuplicateSlug { ref slug, .. } if slug == "same"));
    }

    #[test]
    fn test_missing_category_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let folio = Folio::with_config(dir.path().to_path_buf(), SiteConfig::default());
        let posts = ContentLoader::new(&folio).load_category("notes").unwrap();
        assert!(posts.is_empty());
    }
}
