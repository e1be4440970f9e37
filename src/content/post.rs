//! Post model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A blog post
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    /// Slug (URL-friendly name), derived from the source file stem
    pub slug: String,

    /// Post title
    pub title: String,

    /// Publication date
    pub date: NaiveDate,

    /// Post tags; original casing preserved, compared case-insensitively
    pub tags: Vec<String>,

    /// Short summary shown in listings
    pub summary: String,

    /// Optional cover image URL
    pub image: Option<String>,

    /// Author, falling back to the site-wide default
    pub author: String,

    /// Drafts are excluded from the public index
    pub draft: bool,

    /// Featured posts are promoted in listings
    pub featured: bool,

    /// Raw markdown body, unparsed
    pub content: String,

    /// Human-readable reading-time estimate, recomputed on load
    pub reading_time: String,

    /// Custom front-matter fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Post {
    /// True when any tag matches `tag` ignoring case
    pub fn has_tag(&self, tag: &str) -> bool {
        let needle = tag.to_lowercase();
        self.tags.iter().any(|t| t.to_lowercase() == needle)
    }
}
