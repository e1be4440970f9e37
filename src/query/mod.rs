//! Query engine over the published index
//!
//! Every function here takes the already-filtered, already-sorted slice
//! from `PostIndex` and preserves its order unless stated otherwise.

use std::collections::HashSet;

use crate::content::Post;

/// Case-insensitive substring search over title, summary and tags.
/// An empty or whitespace-only query returns the input unchanged.
pub fn search<'a>(posts: &'a [Post], query: &str) -> Vec<&'a Post> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return posts.iter().collect();
    }

    posts
        .iter()
        .filter(|p| {
            p.title.to_lowercase().contains(&needle)
                || p.summary.to_lowercase().contains(&needle)
                || p.tags.iter().any(|t| t.to_lowercase().contains(&needle))
        })
        .collect()
}

/// Posts carrying `tag`, compared case-insensitively
pub fn filter_by_tag<'a>(posts: &'a [Post], tag: &str) -> Vec<&'a Post> {
    posts.iter().filter(|p| p.has_tag(tag)).collect()
}

/// Posts promoted via the `featured` flag
pub fn featured(posts: &[Post]) -> Vec<&Post> {
    posts.iter().filter(|p| p.featured).collect()
}

/// Up to `limit` posts sharing at least one tag with `target`, ordered by
/// shared-tag count descending. The sort is stable, so equal counts keep
/// the corpus's newest-first order.
pub fn related_posts<'a>(target: &Post, posts: &'a [Post], limit: usize) -> Vec<&'a Post> {
    let target_tags: HashSet<String> = target.tags.iter().map(|t| t.to_lowercase()).collect();
    if target_tags.is_empty() {
        return Vec::new();
    }

    let mut scored: Vec<(&Post, usize)> = posts
        .iter()
        .filter(|p| p.slug != target.slug)
        .map(|p| {
            let overlap = p
                .tags
                .iter()
                .filter(|t| target_tags.contains(&t.to_lowercase()))
                .count();
            (p, overlap)
        })
        .filter(|(_, overlap)| *overlap > 0)
        .collect();

    scored.sort_by(|a, b| b.1.cmp(&a.1));
    scored.truncate(limit);
    scored.into_iter().map(|(p, _)| p).collect()
}

/// Reading-order neighbours of a post
#[derive(Debug, Clone, Copy, Default)]
pub struct AdjacentPosts<'a> {
    /// The chronologically older post
    pub previous: Option<&'a Post>,
    /// The chronologically newer post
    pub next: Option<&'a Post>,
}

/// Neighbours of `slug` in the newest-first corpus. "Previous" is the
/// older post (the one after the target in the list) and "next" the newer
/// one; the naming follows reverse-chronological browsing, not list order.
pub fn adjacent_posts<'a>(posts: &'a [Post], slug: &str) -> AdjacentPosts<'a> {
    let Some(pos) = posts.iter().position(|p| p.slug == slug) else {
        return AdjacentPosts::default();
    };

    AdjacentPosts {
        previous: posts.get(pos + 1),
        next: if pos > 0 { posts.get(pos - 1) } else { None },
    }
}
