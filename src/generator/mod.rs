//! Generator module - writes every page of the site to the public directory

use anyhow::{Context, Result};
use chrono::Datelike;
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use walkdir::WalkDir;

mod feed;

use crate::content::Post;
use crate::helpers::strip_html;
use crate::pagination::{page_path, paginate};
use crate::search::SearchIndex;
use crate::views::layout::{SCRIPT_PATH, SEARCH_INDEX_PATH, SITE_SCRIPT, SITE_STYLE, STYLE_PATH};
use crate::views::{render_page, render_post, HomeView, ListingView, PageMeta};
use crate::Folio;

/// Number of posts included in the Atom feed
const FEED_LIMIT: usize = 20;

/// Characters of post text used as a fallback meta description
const DESCRIPTION_LENGTH: usize = 160;

/// Plain-text opening of rendered HTML, cut at a word boundary
fn excerpt(html: &str, max_chars: usize) -> String {
    let text = strip_html(html);
    let words: Vec<&str> = text.split_whitespace().collect();
    let mut out = String::new();
    for word in words {
        let extra = if out.is_empty() { 0 } else { 1 };
        if out.chars().count() + extra + word.chars().count() > max_chars {
            if out.is_empty() {
                out = word.chars().take(max_chars).collect();
            }
            out.push('…');
            break;
        }
        if extra == 1 {
            out.push(' ');
        }
        out.push_str(word);
    }
    out
}

/// Static site generator
pub struct Generator {
    folio: Folio,
    year: i32,
}

impl Generator {
    /// Create a new generator
    pub fn new(folio: &Folio) -> Self {
        Self {
            folio: folio.clone(),
            year: chrono::Local::now().year(),
        }
    }

    /// Pin the footer year, for reproducible output
    pub fn with_year(mut self, year: i32) -> Self {
        self.year = year;
        self
    }

    /// Generate the entire site from posts sorted newest first
    pub fn generate(&self, posts: &[Post]) -> Result<()> {
        fs::create_dir_all(&self.folio.public_dir)?;

        self.write_assets()?;
        self.copy_static_files()?;

        self.generate_home(posts)?;
        self.generate_index_pages(posts)?;
        self.generate_post_pages(posts)?;
        self.generate_tag_pages(posts)?;
        self.generate_search_index(posts)?;
        self.generate_feed(posts)?;

        Ok(())
    }

    fn write_assets(&self) -> Result<()> {
        self.write(SCRIPT_PATH, SITE_SCRIPT)?;
        self.write(STYLE_PATH, SITE_STYLE)?;
        Ok(())
    }

    /// Homepage: latest posts plus search
    fn generate_home(&self, posts: &[Post]) -> Result<()> {
        let config = &self.folio.config;
        let view = HomeView::new(posts, config.max_display);
        let meta = PageMeta {
            title: &config.title,
            description: &config.description,
            path: "",
        };
        let html = render_page(config, &meta, &view.render(config), self.year);
        self.write_page("", &html)?;
        tracing::info!("Generated home page");
        Ok(())
    }

    /// Posts index, one page per `posts_per_page` posts
    fn generate_index_pages(&self, posts: &[Post]) -> Result<()> {
        let config = &self.folio.config;
        let base = config.category.as_str();
        let first = paginate(posts, config.posts_per_page, 1);
        let total_pages = first.pagination.total_pages;

        let title = format!("Blog - {}", config.author);
        for page_num in 1..=total_pages {
            let page = paginate(posts, config.posts_per_page, page_num);
            let view = ListingView::new("Posts", posts)
                .with_initial_display(page.items)
                .with_pagination(page.pagination);

            let path = page_path(base, page_num);
            let meta = PageMeta {
                title: &title,
                description: &config.description,
                path: &path,
            };
            let html = render_page(config, &meta, &view.render(config, base), self.year);
            self.write_page(&path, &html)?;
            tracing::debug!("Generated posts page {}/{}", page_num, total_pages);
        }

        tracing::info!("Generated {} posts index pages", total_pages);
        Ok(())
    }

    /// One page per post
    fn generate_post_pages(&self, posts: &[Post]) -> Result<()> {
        let config = &self.folio.config;
        for post in posts {
            let path = post.path(&config.category);
            let description = if post.summary.is_empty() {
                excerpt(&post.content, DESCRIPTION_LENGTH)
            } else {
                post.summary.clone()
            };
            let meta = PageMeta {
                title: &post.title,
                description: &description,
                path: &path,
            };
            let html = render_page(config, &meta, &render_post(config, post), self.year);
            self.write_page(&path, &html)
                .with_context(|| format!("Failed to write post '{}'", post.slug))?;
        }
        tracing::info!("Generated {} post pages", posts.len());
        Ok(())
    }

    /// One searchable listing per tag
    fn generate_tag_pages(&self, posts: &[Post]) -> Result<()> {
        let config = &self.folio.config;

        let mut tags: BTreeMap<String, (String, Vec<Post>)> = BTreeMap::new();
        for post in posts {
            for tag in &post.tags {
                let slug = slug::slugify(tag);
                if slug.is_empty() {
                    continue;
                }
                tags.entry(slug)
                    .or_insert_with(|| (tag.clone(), Vec::new()))
                    .1
                    .push(post.clone());
            }
        }

        for (slug, (name, tagged)) in &tags {
            let path = format!("{}/{}/", config.tag_dir.trim_matches('/'), slug);
            let title = format!("#{}", name);
            let view = ListingView::new(title.as_str(), tagged).with_tag(slug.as_str());
            let meta = PageMeta {
                title: &title,
                description: &config.description,
                path: &path,
            };
            let html = render_page(config, &meta, &view.render(config, &path), self.year);
            self.write_page(&path, &html)?;
        }

        tracing::info!("Generated {} tag pages", tags.len());
        Ok(())
    }

    fn generate_search_index(&self, posts: &[Post]) -> Result<()> {
        let index = SearchIndex::build(&self.folio.config, posts);
        self.write(SEARCH_INDEX_PATH, &index.to_json()?)?;
        tracing::info!("Generated {}", SEARCH_INDEX_PATH);
        Ok(())
    }

    fn generate_feed(&self, posts: &[Post]) -> Result<()> {
        let limit = posts.len().min(FEED_LIMIT);
        let xml = feed::atom_feed(&self.folio.config, &posts[..limit], chrono::Utc::now());
        self.write("atom.xml", &xml)?;
        tracing::info!("Generated atom.xml");
        Ok(())
    }

    /// Copy `<base>/<static_dir>` verbatim into the public directory
    fn copy_static_files(&self) -> Result<()> {
        let static_dir = self.folio.base_dir.join(&self.folio.config.static_dir);
        if !static_dir.exists() {
            return Ok(());
        }

        let mut copied = 0;
        for entry in WalkDir::new(&static_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let relative = path.strip_prefix(&static_dir)?;
            let dest = self.folio.public_dir.join(relative);
            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(path, &dest)
                .with_context(|| format!("Failed to copy {:?} to {:?}", path, dest))?;
            copied += 1;
        }

        tracing::debug!("Copied {} static files", copied);
        Ok(())
    }

    /// Write `<route>/index.html`
    fn write_page(&self, route: &str, html: &str) -> Result<PathBuf> {
        let route = route.trim_matches('/');
        let relative = if route.is_empty() {
            "index.html".to_string()
        } else {
            format!("{}/index.html", route)
        };
        self.write(&relative, html)
    }

    fn write(&self, relative: &str, contents: &str) -> Result<PathBuf> {
        let output_path = self.folio.public_dir.join(relative);
        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create dir {:?}", parent))?;
        }
        fs::write(&output_path, contents)
            .with_context(|| format!("Failed to write {:?}", output_path))?;
        tracing::debug!("Generated: {:?}", output_path);
        Ok(output_path)
    }
}
