//! Show a single post or page

use anyhow::{Context, Result};
use clap::ValueEnum;
use std::fmt::Write;

use crate::content::Document;
use crate::helpers::format_date;
use crate::Folio;

/// Output format for a single document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Format {
    /// Header summary followed by the raw body
    #[default]
    Text,
    /// The document as JSON
    Json,
    /// The reassembled markdown file
    Markdown,
}

/// Show a blog post by slug
pub fn post(folio: &Folio, slug: &str, format: Format) -> Result<()> {
    let repo = folio.repository();
    let Some(post) = repo.get_post_by_slug(slug)? else {
        anyhow::bail!("Post not found: {}", slug);
    };

    let related = match format {
        Format::Text => repo.related_posts(slug, folio.config.related_posts)?,
        _ => Vec::new(),
    };

    print!("{}", render(folio, &post, format, &related)?);
    Ok(())
}

/// Show a singleton page by name
pub fn page(folio: &Folio, name: &str, format: Format) -> Result<()> {
    let Some(page) = folio.repository().get_page(name)? else {
        anyhow::bail!("Page not found: {}", name);
    };

    print!("{}", render(folio, &page, format, &[])?);
    Ok(())
}

/// Render a document in the requested format
pub fn render(
    folio: &Folio,
    doc: &Document,
    format: Format,
    related: &[Document],
) -> Result<String> {
    match format {
        Format::Json => {
            let mut json = serde_json::to_string_pretty(doc)?;
            json.push('\n');
            Ok(json)
        }
        Format::Markdown => doc
            .to_markdown()
            .with_context(|| format!("Failed to rebuild markdown for {}", doc.slug)),
        Format::Text => render_text(folio, doc, related),
    }
}

fn render_text(folio: &Folio, doc: &Document, related: &[Document]) -> Result<String> {
    let mut out = String::new();
    writeln!(out, "{}", doc.title())?;

    let reading = format!("{} min read", doc.reading_time(folio.config.words_per_minute));
    match doc.date() {
        Some(date) => writeln!(
            out,
            "{} · {}",
            format_date(&date, &folio.config.date_format),
            reading
        )?,
        None => writeln!(out, "{}", reading)?,
    }

    if !doc.front_matter.tags.is_empty() {
        writeln!(out, "Tags: {}", doc.front_matter.tags.join(", "))?;
    }
    if let Some(excerpt) = doc.excerpt() {
        writeln!(out, "\n{}", excerpt)?;
    }

    writeln!(out, "\n{}", doc.content.trim_end())?;

    if !related.is_empty() {
        writeln!(out, "\nRelated posts:")?;
        for post in related {
            writeln!(out, "  - {} [{}]", post.title(), post.slug)?;
        }
    }

    Ok(out)
}
