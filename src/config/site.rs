//! Site configuration (_config.yml)

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while loading the site configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub author: String,
    pub author_url: String,
    pub email: String,
    pub language: String,

    // URL
    pub url: String,
    pub root: String,

    // Directory
    pub source_dir: String,
    pub category: String,
    pub public_dir: String,
    pub tag_dir: String,
    /// Copied verbatim into the public directory
    pub static_dir: String,

    // Listing
    pub max_display: usize,
    pub posts_per_page: usize,

    #[serde(default)]
    pub social: SocialConfig,
    #[serde(default)]
    pub toc: TocConfig,
    #[serde(default)]
    pub highlight: HighlightConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Folio".to_string(),
            description: String::new(),
            author: "John Doe".to_string(),
            author_url: String::new(),
            email: String::new(),
            language: "en".to_string(),

            url: "http://example.com".to_string(),
            root: "/".to_string(),

            source_dir: "data".to_string(),
            category: "posts".to_string(),
            public_dir: "public".to_string(),
            tag_dir: "tags".to_string(),
            static_dir: "static".to_string(),

            max_display: 10,
            posts_per_page: 10,

            social: SocialConfig::default(),
            toc: TocConfig::default(),
            highlight: HighlightConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: SiteConfig =
            serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        tracing::debug!("Loaded config from {:?}", path);
        Ok(config)
    }
}

/// Social profile links shown in the footer
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialConfig {
    pub linkedin: String,
    pub upwork: String,
    pub github: String,
    pub facebook: String,
    pub instagram: String,
    pub youtube: String,
}

/// Table of contents and scroll-spy settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TocConfig {
    /// Allowance for the fixed header when deciding the active section
    pub offset: f64,
    /// Deepest heading level listed in the table of contents
    pub max_depth: u8,
}

impl Default for TocConfig {
    fn default() -> Self {
        Self {
            offset: 100.0,
            max_depth: 3,
        }
    }
}

/// Code highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub theme: String,
    pub line_number: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            theme: "base16-ocean.dark".to_string(),
            line_number: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.title, "Folio");
        assert_eq!(config.category, "posts");
        assert_eq!(config.max_display, 10);
        assert_eq!(config.posts_per_page, 10);
        assert_eq!(config.toc.offset, 100.0);
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: Lazycat Labs
author: Test User
posts_per_page: 5
social:
  github: https://github.com/example
toc:
  offset: 64
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "Lazycat Labs");
        assert_eq!(config.author, "Test User");
        assert_eq!(config.posts_per_page, 5);
        assert_eq!(config.max_display, 10);
        assert_eq!(config.social.github, "https://github.com/example");
        assert!(config.social.youtube.is_empty());
        assert_eq!(config.toc.offset, 64.0);
        assert_eq!(config.toc.max_depth, 3);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = SiteConfig::load(dir.path().join("_config.yml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_load_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("_config.yml");
        fs::write(&path, "title: [unclosed").unwrap();
        let err = SiteConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
