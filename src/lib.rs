//! folio: a static generator for a personal blog and portfolio site
//!
//! Posts are markdown files with YAML front matter. The generator renders a
//! homepage of recent posts, a paginated posts index, one page per post with
//! a scroll-spy table of contents, and tag pages. Search, pagination and
//! scroll-spy are modelled as plain Rust state so they can be tested without
//! a browser; the generated pages ship a small script that mirrors them.

pub mod commands;
pub mod config;
pub mod content;
pub mod generator;
pub mod helpers;
pub mod pagination;
pub mod scrollspy;
pub mod search;
pub mod server;
pub mod views;

use anyhow::Result;
use std::path::{Path, PathBuf};

/// Name of the site configuration file at the base directory
pub const CONFIG_FILE: &str = "_config.yml";

/// The main application handle
#[derive(Debug, Clone)]
pub struct Folio {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Source directory holding content categories
    pub source_dir: PathBuf,
    /// Public (output) directory
    pub public_dir: PathBuf,
}

impl Folio {
    /// Create a new instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join(CONFIG_FILE);

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            tracing::debug!("No {} found, using defaults", CONFIG_FILE);
            config::SiteConfig::default()
        };

        Ok(Self::with_config(base_dir, config))
    }

    /// Create an instance from an already loaded configuration
    pub fn with_config(base_dir: PathBuf, config: config::SiteConfig) -> Self {
        let source_dir = base_dir.join(&config.source_dir);
        let public_dir = base_dir.join(&config.public_dir);

        Self {
            config,
            base_dir,
            source_dir,
            public_dir,
        }
    }

    /// Directory holding the posts of the configured category
    pub fn posts_dir(&self) -> PathBuf {
        self.source_dir.join(&self.config.category)
    }

    /// Generate the static site
    pub fn generate(&self) -> Result<()> {
        commands::generate::run(self)
    }

    /// Clean the public directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }

    /// Create a new post
    pub fn new_post(&self, title: &str) -> Result<()> {
        commands::new::create_post(self, title, None).map(|_| ())
    }
}
