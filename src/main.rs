//! CLI entry point for folio

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use folio::commands::show::{self, Format};
use folio::commands::list;
use folio::Folio;

#[derive(Parser)]
#[command(name = "folio")]
#[command(version)]
#[command(about = "Inspect the markdown content of a portfolio and blog", long_about = None)]
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
    /// List site content
    #[command(alias = "ls")]
    List {
        /// Type of content to list (post, page, tag)
        #[arg(default_value = "post")]
        r#type: String,
    },

    /// Show a blog post
    Post {
        /// Slug of the post (its filename without extension)
        slug: String,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },

    /// Show a singleton page such as "about"
    Page {
        /// Name of the page
        name: String,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },

    /// List posts carrying a tag
    Tag {
        /// Tag to filter by (exact match)
        tag: String,
    },

    /// List the newest posts
    Recent {
        /// Number of posts (defaults to `recent_posts` from the config)
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "folio=debug,info"
    } else {
        "folio=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    let site = || -> Result<Folio> {
        let site = Folio::new(&base_dir)?;
        tracing::debug!("Content root: {:?}", site.content_dir);
        Ok(site)
    };

    match cli.command {
        Commands::List { r#type } => list::run(&site()?, &r#type)?,
        Commands::Post { slug, format } => show::post(&site()?, &slug, format)?,
        Commands::Page { name, format } => show::page(&site()?, &name, format)?,
        Commands::Tag { tag } => list::tagged(&site()?, &tag)?,
        Commands::Recent { limit } => list::recent(&site()?, limit)?,
        Commands::Version => {
            println!("folio version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
