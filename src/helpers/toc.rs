//! Table of contents extraction
//!
//! A single regex pass over the raw markdown body picks up level-2 and
//! level-3 headings. Duplicate heading text produces colliding anchor ids;
//! anchors are best-effort scroll targets, not unique addresses.

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

lazy_static! {
    /// Level-2 or level-3 ATX headings at the start of a line
    static ref HEADING: Regex = Regex::new(r"(?m)^(#{2,3})\s+(.+)$").unwrap();
}

/// A heading entry in a post's table of contents
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TocEntry {
    /// Slug-safe anchor derived from the heading text
    pub id: String,
    /// Literal heading text
    pub text: String,
    /// Heading depth, 2 or 3
    pub level: usize,
}

/// Extract the table of contents from a raw markdown body, in document order
pub fn generate_toc(content: &str) -> Vec<TocEntry> {
    HEADING
        .captures_iter(content)
        .map(|cap| {
            let level = cap[1].len();
            let text = cap[2].trim().to_string();
            let id = slug::slugify(&text);
            TocEntry { id, text, level }
        })
        .collect()
}
