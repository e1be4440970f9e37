//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    /// Fallback author for posts whose front-matter carries none
    pub author: String,
    pub language: String,

    // URL
    pub url: String,

    // Content
    /// Directory holding the post corpus, relative to the site root
    pub content_dir: String,

    // Listings
    /// Maximum number of related posts surfaced next to a post
    pub related_posts: usize,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Quill".to_string(),
            description: String::new(),
            author: "Anonymous".to_string(),
            language: "en".to_string(),

            url: "http://example.com".to_string(),

            content_dir: "content/blog".to_string(),

            related_posts: 3,

            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}
