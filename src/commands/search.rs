//! Search the published index

use anyhow::Result;

use crate::helpers::format_iso_date;
use crate::query;
use crate::Quill;

/// Run a substring search and/or tag filter over the published posts
pub fn run(quill: &Quill, query_str: &str, tag: Option<&str>) -> Result<()> {
    let index = quill.build_index();

    let hits = query::search(index.posts(), query_str);
    let hits: Vec<_> = match tag {
        Some(tag) => hits
            .into_iter()
            .filter(|p| p.has_tag(tag))
            .collect(),
        None => hits,
    };

    if hits.is_empty() {
        println!("No matching posts.");
        return Ok(());
    }

    println!("Matches ({}):", hits.len());
    for post in hits {
        println!(
            "  {} - {} [{}]",
            format_iso_date(&post.date),
            post.title,
            post.slug
        );
    }

    Ok(())
}
