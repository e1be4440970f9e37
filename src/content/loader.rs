//! Content loader - reads posts from the content directory

use anyhow::{anyhow, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::{estimate_reading_time, FrontMatter, Post};
use crate::Quill;

/// Source file extensions recognized as posts
const POST_EXTENSIONS: [&str; 2] = ["mdx", "md"];

/// Loads posts from the content directory
pub struct ContentLoader<'a> {
    quill: &'a Quill,
}

impl<'a> ContentLoader<'a> {
    /// Create a new content loader
    pub fn new(quill: &'a Quill) -> Self {
        Self { quill }
    }

    /// Enumerate the slugs of every discoverable post.
    /// The ordering carries no meaning; display order comes from the index.
    /// A missing content directory yields an empty list, not an error.
    pub fn list_slugs(&self) -> Vec<String> {
        let content_dir = &self.quill.content_dir;
        if !content_dir.exists() {
            tracing::debug!("Content directory {:?} does not exist", content_dir);
            return Vec::new();
        }

        let mut slugs = Vec::new();
        for entry in WalkDir::new(content_dir)
            .max_depth(1)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if path.is_file() && is_post_file(path) {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    slugs.push(stem.to_string());
                }
            }
        }

        slugs
    }

    /// Load a single post by slug.
    /// Any failure (missing file, malformed front-matter, invalid date) is
    /// logged and reported as `None`; it never aborts the caller.
    pub fn load_post(&self, slug: &str) -> Option<Post> {
        match self.read_post(slug) {
            Ok(post) => Some(post),
            Err(e) => {
                tracing::warn!("Failed to load post {}: {:#}", slug, e);
                None
            }
        }
    }

    fn read_post(&self, slug: &str) -> Result<Post> {
        let path = self
            .resolve_source(slug)
            .ok_or_else(|| anyhow!("no source file for slug"))?;

        let content = fs::read_to_string(&path).with_context(|| format!("reading {:?}", path))?;
        let (fm, body) = FrontMatter::parse(&content)?;
        fm.validate()?;

        // validate() guarantees the required fields below are present
        let date = fm
            .parse_date()
            .ok_or_else(|| anyhow!("date did not parse"))?;

        Ok(Post {
            slug: slug.to_string(),
            title: fm.title.unwrap_or_default(),
            date,
            tags: fm.tags.unwrap_or_default(),
            summary: fm.summary.unwrap_or_default(),
            image: fm.image,
            author: fm.author.unwrap_or_else(|| self.quill.config.author.clone()),
            draft: fm.draft,
            featured: fm.featured,
            reading_time: estimate_reading_time(body),
            content: body.to_string(),
            extra: fm.extra,
        })
    }

    /// Map a slug to its source file, preferring `.mdx` over `.md`
    fn resolve_source(&self, slug: &str) -> Option<PathBuf> {
        POST_EXTENSIONS
            .iter()
            .map(|ext| self.quill.content_dir.join(format!("{}.{}", slug, ext)))
            .find(|p| p.is_file())
    }
}

/// Check if a file is a post source file
fn is_post_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| POST_EXTENSIONS.contains(&e))
        .unwrap_or(false)
}
