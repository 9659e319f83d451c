//! Content module - loads posts and renders their markdown

mod frontmatter;
pub mod loader;
mod markdown;
mod post;

use std::path::PathBuf;
use thiserror::Error;

pub use frontmatter::FrontMatter;
pub use markdown::{MarkdownRenderer, Rendered};
pub use post::{Post, TocEntry};

/// Errors raised by the content source
#[derive(Error, Debug)]
pub enum ContentError {
    #[error("Duplicate slug '{slug}' in {first:?} and {second:?}")]
    DuplicateSlug {
        slug: String,
        first: PathBuf,
        second: PathBuf,
    },
}
