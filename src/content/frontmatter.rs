//! Front-matter parsing and validation

use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Errors produced while validating a post's front-matter
#[derive(Error, Debug)]
pub enum FrontMatterError {
    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    #[error("invalid date `{0}`, expected an ISO-8601 calendar date")]
    InvalidDate(String),
}

/// Accept either a single bare string or a list of strings for `tags`.
/// `None` is kept distinct from an empty list so validation can tell a
/// missing key apart from `tags: []`.
fn string_or_seq<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    let value = Option::<OneOrMany>::deserialize(deserializer)?;
    Ok(value.map(|v| match v {
        OneOrMany::One(tag) => vec![tag],
        OneOrMany::Many(tags) => tags,
    }))
}

/// Front-matter data from a post source file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    pub title: Option<String>,
    pub date: Option<String>,
    #[serde(deserialize_with = "string_or_seq")]
    pub tags: Option<Vec<String>>,
    pub summary: Option<String>,
    pub image: Option<String>,
    pub author: Option<String>,
    pub draft: bool,
    pub featured: bool,

    /// Additional custom fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl FrontMatter {
    /// Parse front-matter from content string
    /// Returns (front_matter, remaining_content)
    pub fn parse(content: &str) -> Result<(Self, &str)> {
        let content = content.trim_start();

        // YAML front-matter (---)
        if content.starts_with("---") {
            return Self::parse_yaml(content);
        }

        // JSON front-matter ({"key": ...)
        if content.starts_with('{') {
            return Self::parse_json(content);
        }

        // No front-matter found
        Ok((FrontMatter::default(), content))
    }

    fn parse_yaml(content: &str) -> Result<(Self, &str)> {
        let rest = &content[3..]; // Skip opening ---
        let rest = rest.trim_start_matches(['\n', '\r']);

        let Some(end_pos) = rest.find("\n---") else {
            // No closing ---, treat as no front-matter
            return Ok((FrontMatter::default(), content));
        };

        let yaml_content = &rest[..end_pos];
        let remaining = &rest[end_pos + 4..]; // Skip \n---
        let remaining = remaining.trim_start_matches(['\n', '\r']);

        if yaml_content.trim().is_empty() {
            return Ok((FrontMatter::default(), remaining));
        }

        let fm: FrontMatter = serde_yaml::from_str(yaml_content)
            .map_err(|e| anyhow!("failed to parse YAML front-matter: {}", e))?;
        Ok((fm, remaining))
    }

    fn parse_json(content: &str) -> Result<(Self, &str)> {
        // Find the matching closing brace of the leading object
        let mut depth = 0;
        let mut end_pos = 0;
        for (i, c) in content.char_indices() {
            match c {
                '{' => depth += 1,
                '}' => {
                    depth -= 1;
                    if depth == 0 {
                        end_pos = i + 1;
                        break;
                    }
                }
                _ => {}
            }
        }

        if end_pos == 0 {
            return Err(anyhow!("unterminated JSON front-matter"));
        }

        let json_content = &content[..end_pos];
        let remaining = content[end_pos..].trim_start_matches(['\n', '\r']);

        let fm: FrontMatter = serde_json::from_str(json_content)
            .map_err(|e| anyhow!("failed to parse JSON front-matter: {}", e))?;

        Ok((fm, remaining))
    }

    /// Check that every required field is present and the date parses.
    /// A post failing validation is excluded from the corpus, never patched up.
    pub fn validate(&self) -> Result<(), FrontMatterError> {
        if self.title.is_none() {
            return Err(FrontMatterError::MissingField("title"));
        }
        let Some(date) = &self.date else {
            return Err(FrontMatterError::MissingField("date"));
        };
        if self.tags.is_none() {
            return Err(FrontMatterError::MissingField("tags"));
        }
        if self.summary.is_none() {
            return Err(FrontMatterError::MissingField("summary"));
        }
        if parse_date_string(date).is_none() {
            return Err(FrontMatterError::InvalidDate(date.clone()));
        }
        Ok(())
    }

    /// Parse the date string into a calendar date
    pub fn parse_date(&self) -> Option<NaiveDate> {
        self.date.as_ref().and_then(|s| parse_date_string(s))
    }
}

/// Parse an ISO-8601 date string, tolerating a few common variants
fn parse_date_string(s: &str) -> Option<NaiveDate> {
    let s = s.trim();

    for fmt in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }

    // Full RFC 3339 timestamps keep only the calendar date
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_yaml_frontmatter() {
        let content = r#"---
title: Breaking the Vault
date: 2024-01-15
tags:
  - ctf
  - security
summary: A walkthrough of the Vault challenge.
---

This is the content.
"#;

        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title, Some("Breaking the Vault".to_string()));
        assert_eq!(fm.tags, Some(vec!["ctf".to_string(), "security".to_string()]));
        assert!(!fm.draft);
        assert!(remaining.contains("This is the content."));
        fm.validate().unwrap();
    }

    #[test]
    fn test_parse_json_frontmatter() {
        let content = r#"{"title": "Test Post", "date": "2024-02-01", "tags": ["a", "b"], "summary": "s"}

This is content.
"#;

        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title, Some("Test Post".to_string()));
        assert_eq!(fm.tags, Some(vec!["a".to_string(), "b".to_string()]));
        assert!(remaining.contains("This is content."));
        fm.validate().unwrap();
    }

    #[test]
    fn test_parse_single_string_tags() {
        let content = r#"---
title: Single Tag Post
date: 2024-01-15
tags: notes
summary: One tag only.
---

Content here.
"#;

        let (fm, _) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.tags, Some(vec!["notes".to_string()]));
    }

    #[test]
    fn test_empty_tag_list_is_valid() {
        let content = "---\ntitle: T\ndate: 2024-01-15\ntags: []\nsummary: S\n---\nbody";
        let (fm, _) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.tags, Some(Vec::new()));
        fm.validate().unwrap();
    }

    #[test]
    fn test_missing_required_field() {
        let content = "---\ntitle: T\ndate: 2024-01-15\nsummary: S\n---\nbody";
        let (fm, _) = FrontMatter::parse(content).unwrap();
        let err = fm.validate().unwrap_err();
        assert!(matches!(err, FrontMatterError::MissingField("tags")));
    }

    #[test]
    fn test_invalid_date_rejected() {
        let content = "---\ntitle: T\ndate: not-a-date\ntags: []\nsummary: S\n---\nbody";
        let (fm, _) = FrontMatter::parse(content).unwrap();
        let err = fm.validate().unwrap_err();
        assert!(matches!(err, FrontMatterError::InvalidDate(_)));
        assert!(fm.parse_date().is_none());
    }

    #[test]
    fn test_parse_date_variants() {
        for raw in ["2024-01-15", "2024/01/15", "2024-01-15T10:30:00+07:00"] {
            let fm = FrontMatter {
                date: Some(raw.to_string()),
                ..Default::default()
            };
            let d = fm.parse_date().unwrap();
            assert_eq!(d.to_string(), "2024-01-15");
        }
    }

    #[test]
    fn test_draft_and_featured_flags() {
        let content =
            "---\ntitle: T\ndate: 2024-01-15\ntags: []\nsummary: S\ndraft: true\nfeatured: true\n---\nbody";
        let (fm, _) = FrontMatter::parse(content).unwrap();
        assert!(fm.draft);
        assert!(fm.featured);
    }

    #[test]
    fn test_unknown_keys_flattened() {
        let content = "---\ntitle: T\ndate: 2024-01-15\ntags: []\nsummary: S\ncanonical: /x\n---\nbody";
        let (fm, _) = FrontMatter::parse(content).unwrap();
        assert!(fm.extra.contains_key("canonical"));
    }
}
