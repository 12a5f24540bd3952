//! List site content

use anyhow::Result;
use std::fmt::Write;

use crate::content::Document;
use crate::helpers::format_date;
use crate::Folio;

/// List site content by type
pub fn run(folio: &Folio, content_type: &str) -> Result<()> {
    print!("{}", render(folio, content_type)?);
    Ok(())
}

/// Render a listing of posts, pages or tags
pub fn render(folio: &Folio, content_type: &str) -> Result<String> {
    let repo = folio.repository();
    let mut out = String::new();

    match content_type {
        "post" | "posts" => {
            let posts = repo.list_all_posts()?;
            writeln!(out, "Posts ({}):", posts.len())?;
            write_posts(&mut out, &posts)?;
        }
        "page" | "pages" => {
            let names = repo.list_page_names()?;
            writeln!(out, "Pages ({}):", names.len())?;
            for name in names {
                match repo.get_page(&name)? {
                    Some(page) => writeln!(out, "  {} [{}]", page.title(), page.slug)?,
                    // Removed between listing and reading
                    None => continue,
                }
            }
        }
        "tag" | "tags" => {
            let tags = repo.tag_counts()?;
            writeln!(out, "Tags ({}):", tags.len())?;
            for (tag, count) in tags {
                writeln!(out, "  {} ({})", tag, count)?;
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: post, page, tag",
                content_type
            );
        }
    }

    Ok(out)
}

/// Posts carrying a tag
pub fn tagged(folio: &Folio, tag: &str) -> Result<()> {
    let posts = folio.repository().list_posts_by_tag(tag)?;
    if posts.is_empty() {
        anyhow::bail!("No posts tagged with \"{}\"", tag);
    }

    let mut out = String::new();
    writeln!(out, "Posts tagged with \"{}\" ({}):", tag, posts.len())?;
    write_posts(&mut out, &posts)?;
    print!("{}", out);
    Ok(())
}

/// The newest posts, as shown on the home page
pub fn recent(folio: &Folio, limit: Option<usize>) -> Result<()> {
    let limit = limit.unwrap_or(folio.config.recent_posts);
    let posts = folio.repository().recent_posts(limit)?;

    let mut out = String::new();
    writeln!(out, "Recent posts ({}):", posts.len())?;
    write_posts(&mut out, &posts)?;
    print!("{}", out);
    Ok(())
}

fn write_posts(out: &mut String, posts: &[Document]) -> std::fmt::Result {
    for post in posts {
        let date = post
            .date()
            .map(|d| format_date(&d, "%Y-%m-%d"))
            .unwrap_or_else(|| "----------".to_string());
        writeln!(out, "  {} - {} [{}]", date, post.title(), post.slug)?;
        if !post.front_matter.tags.is_empty() {
            writeln!(out, "      #{}", post.front_matter.tags.join(" #"))?;
        }
    }
    Ok(())
}
