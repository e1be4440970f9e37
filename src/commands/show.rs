//! Show a single post

use anyhow::Result;

use crate::content::{ContentLoader, MarkdownRenderer};
use crate::helpers::{format_display_date, generate_toc};
use crate::query;
use crate::Quill;

/// Print one post's metadata, table of contents and neighbours.
/// Drafts resolve here (direct slug access), but never appear as
/// related posts or neighbours since those come from the index.
pub fn run(quill: &Quill, slug: &str, html: bool) -> Result<()> {
    let loader = ContentLoader::new(quill);
    let Some(post) = loader.load_post(slug) else {
        anyhow::bail!("Post not found: {}", slug);
    };

    println!("{}", post.title);
    println!(
        "{} | {} | by {}",
        format_display_date(&post.date),
        post.reading_time,
        post.author
    );
    if !post.tags.is_empty() {
        println!("Tags: {}", post.tags.join(", "));
    }
    if post.draft {
        println!("(draft)");
    }
    println!();
    println!("{}", post.summary);

    let toc = generate_toc(&post.content);
    if !toc.is_empty() {
        println!("\nContents:");
        for entry in &toc {
            let indent = if entry.level == 3 { "    " } else { "  " };
            println!("{}{} (#{})", indent, entry.text, entry.id);
        }
    }

    let index = quill.build_index();
    let related = query::related_posts(&post, index.posts(), quill.config.related_posts);
    if !related.is_empty() {
        println!("\nRelated:");
        for p in related {
            println!("  {} [{}]", p.title, p.slug);
        }
    }

    let adjacent = query::adjacent_posts(index.posts(), slug);
    if let Some(prev) = adjacent.previous {
        println!("\nPrevious: {} [{}]", prev.title, prev.slug);
    }
    if let Some(next) = adjacent.next {
        println!("Next: {} [{}]", next.title, next.slug);
    }

    if html {
        let renderer = MarkdownRenderer::new();
        let rendered = renderer.render(&post.content)?;
        println!("\n{}", rendered);
    }

    Ok(())
}
