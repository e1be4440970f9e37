//! CLI entry point for quill-rs

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "quill-rs")]
#[command(version = "0.1.0")]
#[command(about = "A content indexing and query pipeline for blog corpora", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List published content
    #[command(alias = "l")]
    List {
        /// Type of content to list (post, featured, tag)
        #[arg(default_value = "post")]
        r#type: String,

        /// Emit JSON instead of plain text
        #[arg(long)]
        json: bool,
    },

    /// Show a single post with its table of contents and neighbours
    Show {
        /// Slug of the post
        slug: String,

        /// Also render the body to HTML
        #[arg(long)]
        html: bool,
    },

    /// Search published posts
    Search {
        /// Query matched against titles, summaries and tags
        #[arg(default_value = "")]
        query: String,

        /// Restrict results to posts carrying this tag
        #[arg(short, long)]
        tag: Option<String>,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "quill_rs=debug,info"
    } else {
        "quill_rs=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = cli.cwd.unwrap_or_else(|| {
        std::env::current_dir().expect("cannot determine current directory")
    });

    match cli.command {
        Commands::List { r#type, json } => {
            let quill = quill_rs::Quill::new(&base_dir)?;
            quill_rs::commands::list::run(&quill, &r#type, json)?;
        }

        Commands::Show { slug, html } => {
            let quill = quill_rs::Quill::new(&base_dir)?;
            quill_rs::commands::show::run(&quill, &slug, html)?;
        }

        Commands::Search { query, tag } => {
            let quill = quill_rs::Quill::new(&base_dir)?;
            quill_rs::commands::search::run(&quill, &query, tag.as_deref())?;
        }

        Commands::Version => {
            println!("quill-rs version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
