//! List site content

use anyhow::Result;

use crate::helpers::format_iso_date;
use crate::query;
use crate::Quill;

/// List site content by type
pub fn run(quill: &Quill, content_type: &str, json: bool) -> Result<()> {
    let index = quill.build_index();

    match content_type {
        "post" | "posts" => {
            if json {
                println!("{}", serde_json::to_string_pretty(index.posts())?);
                return Ok(());
            }
            println!("Posts ({}):", index.len());
            for post in index.posts() {
                println!(
                    "  {} - {} [{}]",
                    format_iso_date(&post.date),
                    post.title,
                    post.slug
                );
            }
        }
        "featured" => {
            let featured = query::featured(index.posts());
            if json {
                println!("{}", serde_json::to_string_pretty(&featured)?);
                return Ok(());
            }
            println!("Featured posts ({}):", featured.len());
            for post in featured {
                println!(
                    "  {} - {} [{}]",
                    format_iso_date(&post.date),
                    post.title,
                    post.slug
                );
            }
        }
        "tag" | "tags" => {
            let tags = index.tag_frequencies();
            if json {
                println!("{}", serde_json::to_string_pretty(&tags)?);
                return Ok(());
            }
            println!("Tags ({}):", tags.len());
            for entry in tags {
                println!("  {} ({})", entry.tag, entry.count);
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: post, featured, tag",
                content_type
            );
        }
    }

    Ok(())
}
