//! quill-rs: a content indexing and query pipeline for blog corpora
//!
//! This crate loads "frontmatter + Markdown" post files from a content
//! directory, materializes a published, date-sorted index, and answers
//! search, tag-filter, related-post and reading-order queries over it.
//! A presentation layer consumes the results as plain data; the pipeline
//! never calls back into it.

pub mod commands;
pub mod config;
pub mod content;
pub mod helpers;
pub mod index;
pub mod query;

use anyhow::Result;
use std::path::Path;

/// The main Quill application
#[derive(Clone)]
pub struct Quill {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: std::path::PathBuf,
    /// Content directory holding the post corpus
    pub content_dir: std::path::PathBuf,
}

impl Quill {
    /// Create a new Quill instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        let content_dir = base_dir.join(&config.content_dir);

        Ok(Self {
            config,
            base_dir,
            content_dir,
        })
    }

    /// Build the published post index
    pub fn build_index(&self) -> index::PostIndex {
        let loader = content::ContentLoader::new(self);
        index::PostIndex::build(&loader)
    }
}
