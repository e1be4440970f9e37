//! Post index - the materialized, published view of the corpus
//!
//! Every listing, search and relation consumes this index, never the raw
//! loader output. Drafts are dropped here, once, so no query path can
//! surface them.

use indexmap::IndexMap;
use serde::Serialize;
use std::collections::HashMap;

use crate::content::{ContentLoader, Post};

/// Number of published posts carrying a tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagCount {
    pub tag: String,
    pub count: usize,
}

/// The published corpus, date-descending
#[derive(Debug, Clone, Default)]
pub struct PostIndex {
    posts: Vec<Post>,
}

impl PostIndex {
    /// Build the index: load every slug, drop failures and drafts, sort
    /// newest-first. The result is immutable; rebuild to pick up changes.
    pub fn build(loader: &ContentLoader) -> Self {
        let mut posts: Vec<Post> = Vec::new();
        let mut seen: HashMap<String, usize> = HashMap::new();

        for slug in loader.list_slugs() {
            let Some(post) = loader.load_post(&slug) else {
                continue;
            };
            if post.draft {
                tracing::debug!("Skipping draft {}", post.slug);
                continue;
            }
            if let Some(&pos) = seen.get(&post.slug) {
                // Last write wins, but never silently
                tracing::warn!("Duplicate slug {}, keeping the later file", post.slug);
                posts[pos] = post;
            } else {
                seen.insert(post.slug.clone(), posts.len());
                posts.push(post);
            }
        }

        // Stable sort: equal dates keep their load order, so repeated
        // builds over the same corpus are deterministic
        posts.sort_by(|a, b| b.date.cmp(&a.date));

        Self { posts }
    }

    /// All published posts, newest first
    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    /// Look up a published post by slug
    pub fn get(&self, slug: &str) -> Option<&Post> {
        self.posts.iter().find(|p| p.slug == slug)
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    /// Tag frequencies across the published corpus, most used first.
    /// Tags are lowercased; equal counts keep first-seen order.
    pub fn tag_frequencies(&self) -> Vec<TagCount> {
        let mut counts: IndexMap<String, usize> = IndexMap::new();
        for post in &self.posts {
            for tag in &post.tags {
                *counts.entry(tag.to_lowercase()).or_insert(0) += 1;
            }
        }

        let mut entries: Vec<TagCount> = counts
            .into_iter()
            .map(|(tag, count)| TagCount { tag, count })
            .collect();
        entries.sort_by(|a, b| b.count.cmp(&a.count));
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::Quill;
    use std::fs;
    use tempfile::TempDir;

    fn post_source(title: &str, date: &str, tags: &[&str], draft: bool) -> String {
        let tag_lines: String = tags.iter().map(|t| format!("  - {}\n", t)).collect();
        format!(
            "---\ntitle: {}\ndate: {}\ntags:\n{}summary: About {}\ndraft: {}\n---\n\nBody of {}.\n",
            title, date, tag_lines, title, draft, title
        )
    }

    fn site_with_posts(posts: &[(&str, String)]) -> (TempDir, Quill) {
        let dir = TempDir::new().unwrap();
        let content_dir = dir.path().join("content/blog");
        fs::create_dir_all(&content_dir).unwrap();
        for (name, body) in posts {
            fs::write(content_dir.join(name), body).unwrap();
        }
        let quill = Quill {
            config: SiteConfig::default(),
            base_dir: dir.path().to_path_buf(),
            content_dir,
        };
        (dir, quill)
    }

    #[test]
    fn test_build_sorts_date_descending() {
        let (_dir, quill) = site_with_posts(&[
            ("old.mdx", post_source("Old", "2023-05-01", &["a"], false)),
            ("new.mdx", post_source("New", "2024-03-01", &["a"], false)),
            ("mid.mdx", post_source("Mid", "2023-11-20", &["a"], false)),
        ]);
        let loader = ContentLoader::new(&quill);
        let index = PostIndex::build(&loader);
        let slugs: Vec<_> = index.posts().iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["new", "mid", "old"]);
        for pair in index.posts().windows(2) {
            assert!(pair[0].date >= pair[1].date);
        }
    }

    #[test]
    fn test_build_is_deterministic() {
        let (_dir, quill) = site_with_posts(&[
            ("a.mdx", post_source("A", "2024-01-01", &["x"], false)),
            ("b.mdx", post_source("B", "2024-01-01", &["x"], false)),
            ("c.mdx", post_source("C", "2024-02-01", &["x"], false)),
        ]);
        let loader = ContentLoader::new(&quill);
        let first: Vec<String> = PostIndex::build(&loader)
            .posts()
            .iter()
            .map(|p| p.slug.clone())
            .collect();
        let second: Vec<String> = PostIndex::build(&loader)
            .posts()
            .iter()
            .map(|p| p.slug.clone())
            .collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_drafts_are_excluded() {
        let (_dir, quill) = site_with_posts(&[
            ("pub.mdx", post_source("Pub", "2024-01-01", &["ctf"], false)),
            ("wip.mdx", post_source("Wip", "2024-02-01", &["ctf"], true)),
        ]);
        let loader = ContentLoader::new(&quill);
        let index = PostIndex::build(&loader);
        assert_eq!(index.len(), 1);
        assert!(index.get("wip").is_none());
        assert!(index.get("pub").is_some());
    }

    #[test]
    fn test_broken_post_does_not_abort_build() {
        let (_dir, quill) = site_with_posts(&[
            ("good.mdx", post_source("Good", "2024-01-01", &["a"], false)),
            ("bad.mdx", post_source("Bad", "someday", &["a"], false)),
        ]);
        let loader = ContentLoader::new(&quill);
        let index = PostIndex::build(&loader);
        assert_eq!(index.len(), 1);
        assert_eq!(index.posts()[0].slug, "good");
    }

    #[test]
    fn test_duplicate_slug_last_wins() {
        // alpha.mdx and alpha.md collapse to the same slug
        let (_dir, quill) = site_with_posts(&[
            ("alpha.mdx", post_source("From Mdx", "2024-01-01", &["a"], false)),
            ("alpha.md", post_source("From Md", "2024-01-02", &["a"], false)),
        ]);
        let loader = ContentLoader::new(&quill);
        let index = PostIndex::build(&loader);
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_tag_frequencies_lowercased_and_sorted() {
        let (_dir, quill) = site_with_posts(&[
            ("a.mdx", post_source("A", "2024-03-01", &["CTF", "security"], false)),
            ("b.mdx", post_source("B", "2024-02-01", &["ctf"], false)),
            ("c.mdx", post_source("C", "2024-01-01", &["webdev"], false)),
        ]);
        let loader = ContentLoader::new(&quill);
        let index = PostIndex::build(&loader);
        let freqs = index.tag_frequencies();
        assert_eq!(
            freqs[0],
            TagCount {
                tag: "ctf".to_string(),
                count: 2
            }
        );
        // security was seen before webdev; equal counts keep that order
        assert_eq!(freqs[1].tag, "security");
        assert_eq!(freqs[2].tag, "webdev");
    }

    #[test]
    fn test_end_to_end_scenario() {
        let (_dir, quill) = site_with_posts(&[
            ("p1.mdx", post_source("P1", "2024-05-01", &["ctf", "security"], false)),
            ("p2.mdx", post_source("P2", "2024-04-01", &["ctf", "security"], false)),
            ("p3.mdx", post_source("P3", "2024-03-01", &["webdev"], false)),
            ("p4.mdx", post_source("P4", "2024-02-01", &["webdev"], false)),
            ("p5.mdx", post_source("P5", "2024-01-01", &["ctf"], true)),
        ]);
        let loader = ContentLoader::new(&quill);
        let index = PostIndex::build(&loader);

        assert_eq!(index.len(), 4);

        let freqs = index.tag_frequencies();
        let ctf = freqs.iter().find(|f| f.tag == "ctf").unwrap();
        assert_eq!(ctf.count, 2);

        let ctf_posts = crate::query::filter_by_tag(index.posts(), "ctf");
        let slugs: Vec<_> = ctf_posts.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["p1", "p2"]);
    }
}
