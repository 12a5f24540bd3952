//! Content module - documents, front-matter and the content repository

mod document;
mod error;
mod frontmatter;
pub mod markdown;
mod repository;

pub use document::Document;
pub use error::{ContentError, Result};
pub use frontmatter::{FrontMatter, FrontMatterError};
pub use repository::{ContentRepository, BLOG_COLLECTION, MARKDOWN_EXTENSION};
